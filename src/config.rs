// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Settings of a test suite run.

use crate::{error::SuiteError, testdata};

const DEFAULT_SAMPLE_SIZE_EXPONENT: u32 = 20;
const DEFAULT_SEED_COUNT: usize = 4;
const MIN_SAMPLE_SIZE_EXPONENT: u32 = 8;
// 2^exponent must fit in usize.
const MAX_SAMPLE_SIZE_EXPONENT: u32 = if usize::BITS - 1 < 32 {
    usize::BITS - 1
} else {
    32
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Every test draws 2^sample_size_exponent values.
    pub sample_size_exponent: u32,
    /// Number of seeds taken from the front of the static seed table.
    pub seed_count: usize,
    pub result_file_path: String,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        SuiteConfig {
            sample_size_exponent: DEFAULT_SAMPLE_SIZE_EXPONENT,
            seed_count: DEFAULT_SEED_COUNT,
            result_file_path: "rslt.txt".to_owned(),
        }
    }
}

impl SuiteConfig {
    /// Read `[sample_size_exponent] [result_file_path]` from command line arguments,
    /// program name already removed. Missing values keep their defaults.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, SuiteError> {
        let mut config = SuiteConfig::default();
        if let Some(exponent) = args.next() {
            config.sample_size_exponent = exponent.parse().map_err(|_| {
                SuiteError::InvalidConfig(format!("sample size exponent '{}' is not a number", exponent))
            })?;
        }
        if let Some(path) = args.next() {
            config.result_file_path = path;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SuiteError> {
        if !(MIN_SAMPLE_SIZE_EXPONENT..=MAX_SAMPLE_SIZE_EXPONENT).contains(&self.sample_size_exponent) {
            return Err(SuiteError::InvalidConfig(format!(
                "sample size exponent {} outside {}..={}",
                self.sample_size_exponent, MIN_SAMPLE_SIZE_EXPONENT, MAX_SAMPLE_SIZE_EXPONENT
            )));
        }
        let max_seeds = testdata::rng_test::STATIC_TEST_SEEDS.len();
        if self.seed_count == 0 || self.seed_count > max_seeds {
            return Err(SuiteError::InvalidConfig(format!(
                "seed count {} outside 1..={}",
                self.seed_count, max_seeds
            )));
        }
        Ok(())
    }

    pub fn sample_size(&self) -> usize {
        1 << self.sample_size_exponent
    }

    pub fn seeds(&self) -> &'static [u64] {
        &testdata::rng_test::STATIC_TEST_SEEDS[0..self.seed_count]
    }
}
