// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Errors of the test suite. The distribution itself never fails.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("could not write results: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
