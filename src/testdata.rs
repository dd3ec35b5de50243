// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Fixed inputs for reproducible test runs.

pub mod rng_test {
    /// Seeds used by the test suite, in order.
    pub const STATIC_TEST_SEEDS: [u64; 8] = [
        0x0000_0000_0000_0000,
        0x9e37_79b9_7f4a_7c15,
        0xdead_beef_cafe_babe,
        0x0123_4567_89ab_cdef,
        0xffff_ffff_ffff_ffff,
        0x5555_5555_aaaa_aaaa,
        0x61c8_8646_80b5_83eb,
        0x0000_0000_0000_0001,
    ];
}
