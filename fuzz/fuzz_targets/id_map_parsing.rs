// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Map id file parsing under adversarial input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use txdict::binary::{decode_id_map, encode_id_map};

fuzz_target!(|data: &[u8]| {
    if let Ok(map) = decode_id_map(data) {
        assert_eq!(encode_id_map(&map), data);
    }
});
