// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Uniform distribution over an inclusive integer range.
//!
//! Based on Lemire's multiply-and-reject method: a random word `x` is
//! multiplied by the range size and the upper half of the product is the
//! offset into the range. Only draws whose lower half lands below the
//! rejection threshold are biased and get redrawn.
//!
//! The threshold needs a modulo, so it is computed once at construction.
//! That makes a single use slightly slower than the textbook algorithm and
//! repeated use of one distribution faster.

use crate::extended_mult::ExtendedMult;
use crate::natural_order::{NaturalOrder, UnsignedWord};
use crate::rngs::{FillBits, RNG};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UniformIntegerDistribution<T: NaturalOrder> {
    /// Left bound in natural order, used on every draw.
    lower_bound: T::Unsigned,
    /// Right bound, only needed for the accessor.
    upper_bound: T,
    /// Number of values in [a, b], 0 if that is every value of T.
    range_size: T::Unsigned,
    rejection_threshold: T::Unsigned,
}

impl<T: NaturalOrder> UniformIntegerDistribution<T> {
    /// Distribution over `[a, b]`. Requires `a <= b`.
    pub fn new(a: T, b: T) -> Self {
        debug_assert!(a <= b, "empty range: {:?} > {:?}", a, b);
        let lower_bound = a.transpose_to();
        // Wraps to 0 when [a, b] covers the whole type.
        let range_size = b
            .transpose_to()
            .wrapping_sub(lower_bound)
            .wrapping_add(T::Unsigned::ONE);
        UniformIntegerDistribution {
            lower_bound,
            upper_bound: b,
            range_size,
            rejection_threshold: Self::rejection_threshold_for(range_size),
        }
    }

    /// 2^BITS mod range_size, the count of low product halves that would bias the result.
    fn rejection_threshold_for(range_size: T::Unsigned) -> T::Unsigned {
        if range_size == T::Unsigned::ZERO {
            return T::Unsigned::ZERO;
        }
        range_size.wrapping_neg().remainder(range_size)
    }

    /// Draw one value from `[a, b]`.
    pub fn sample(&self, rng: &mut impl RNG) -> T {
        if self.range_size == T::Unsigned::ZERO {
            return T::transpose_back(T::Unsigned::fill_bits_from(rng));
        }

        let mut product = T::Unsigned::fill_bits_from(rng).extended_mult(self.range_size);
        // The threshold is below range_size, so most draws skip the check entirely.
        if product.lower < self.range_size {
            while product.lower < self.rejection_threshold {
                product = T::Unsigned::fill_bits_from(rng).extended_mult(self.range_size);
            }
        }

        T::transpose_back(self.lower_bound.wrapping_add(product.upper))
    }

    /// Endless stream of samples drawn from `rng`.
    pub fn sample_iter<'a, R: RNG>(&'a self, rng: &'a mut R) -> impl Iterator<Item = T> + 'a {
        std::iter::repeat_with(move || self.sample(rng))
    }

    pub fn a(&self) -> T {
        T::transpose_back(self.lower_bound)
    }

    pub fn b(&self) -> T {
        self.upper_bound
    }

    /// Number of distinct values, 0 meaning all values of `T`.
    pub fn range_size(&self) -> T::Unsigned {
        self.range_size
    }

    pub fn rejection_threshold(&self) -> T::Unsigned {
        self.rejection_threshold
    }
}
