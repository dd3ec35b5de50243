// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Unbiased uniform integer distributions over inclusive ranges,
//! plus a statistical test suite for them.

pub mod config;
pub mod dist_testing;
pub mod distribution;
pub mod error;
pub mod extended_mult;
pub mod natural_order;
pub mod rngs;
pub mod sized_types;
pub mod stats;
mod strings;
pub mod testdata;
pub mod utils;

pub use distribution::UniformIntegerDistribution;
pub use extended_mult::{extended_mult, ExtendedMult, ExtendedProduct};
pub use natural_order::NaturalOrder;
pub use rngs::{FillBits, RNG};
pub use sized_types::{DoubleWidth, DoubleWidthUnsigned, SizedUnsigned};
