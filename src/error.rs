// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for txdict.
//!
//! Only construction-time operations fail: opening, decoding and building.
//! A word that is not in the dictionary is an ordinary answer (`-1`, an empty
//! vector, `None`), never an error.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied offset was out of the accepted domain
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A file could not be opened, read or written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Serialized data failed validation
    #[error("corrupt data: {0}")]
    Corrupt(String),

    /// The parts of a key/value map do not fit together
    #[error("map parts disagree: {0}")]
    Mismatch(String),
}

impl Error {
    /// Create an I/O error bound to a path
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a corrupt-data error
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Error::Corrupt(msg.into())
    }

    /// Create a mismatch error
    pub fn mismatch(msg: impl Into<String>) -> Self {
        Error::Mismatch(msg.into())
    }

    /// Is this a validation failure of loaded bytes?
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Error::Corrupt(_))
    }
}

/// Decoders report through `io::Error`; at the open boundary every decode
/// failure is corruption.
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Corrupt(err.to_string())
    }
}
