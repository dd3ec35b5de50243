// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Double-width multiplication of fixed-width unsigned integers.
//! The product is computed by schoolbook long multiplication on half-width
//! digits, so no wider native type is needed. This matters for u64 where
//! the operand width may already be the widest the platform handles well.

use std::ops::{Add, BitOr, Mul, Shl};

/// Upper and lower halves of a double-width product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ExtendedProduct<T> {
    pub upper: T,
    pub lower: T,
}

/// Unsigned integers that can be multiplied without losing the overflow.
pub trait ExtendedMult: Copy {
    /// Returns the exact product of `self` and `rhs`,
    /// `upper * 2^BITS + lower == self * rhs`.
    fn extended_mult(self, rhs: Self) -> ExtendedProduct<Self>;
}

/// Free function form of [`ExtendedMult::extended_mult`].
#[inline]
pub fn extended_mult<T: ExtendedMult>(lhs: T, rhs: T) -> ExtendedProduct<T> {
    lhs.extended_mult(rhs)
}

/// Split of a word into two half-width digits.
trait HalfDigits:
    Copy + Add<Output = Self> + Mul<Output = Self> + Shl<u32, Output = Self> + BitOr<Output = Self>
{
    const HALF_BITS: u32;
    /// Lower half of the word.
    fn low_digit(self) -> Self;
    /// Upper half of the word, shifted down.
    fn high_digit(self) -> Self;
}

macro_rules! impl_extended_mult {
    ($($t:ty),*) => {$(
        impl HalfDigits for $t {
            const HALF_BITS: u32 = <$t>::BITS / 2;

            #[inline]
            fn low_digit(self) -> Self {
                self & (<$t>::MAX >> Self::HALF_BITS)
            }

            #[inline]
            fn high_digit(self) -> Self {
                self >> Self::HALF_BITS
            }
        }

        impl ExtendedMult for $t {
            #[inline]
            fn extended_mult(self, rhs: Self) -> ExtendedProduct<Self> {
                long_mult(self, rhs)
            }
        }
    )*};
}

impl_extended_mult!(u8, u16, u32, u64);

//            H      H      H      H
//     lhs                  L1     L2
//   * rhs                  R1     R2
//            ------------------------
//                       |  R2 * L2  |
//                 |  R2 * L1  |
//                 |  R1 * L2  |
//           |  R1 * L1  |
//           -------------------------
//           |  a  |  b  |  c  |  d  |
#[inline]
fn long_mult<T: HalfDigits>(lhs: T, rhs: T) -> ExtendedProduct<T> {
    // Every digit product is below (2^H - 1)^2 and fits in one word.
    let r2l2 = rhs.low_digit() * lhs.low_digit();
    let r2l1 = rhs.low_digit() * lhs.high_digit();
    let r1l2 = rhs.high_digit() * lhs.low_digit();
    let r1l1 = rhs.high_digit() * lhs.high_digit();

    // Column sums hold at most three half-width digits plus a carry.
    let d = r2l2.low_digit();
    let c = r2l2.high_digit() + r2l1.low_digit() + r1l2.low_digit();
    let b = r2l1.high_digit() + r1l2.high_digit() + r1l1.low_digit();
    let a = r1l1.high_digit();

    // d is already a single digit, so carrying starts at c.
    let b = b + c.high_digit();
    let a = a + b.high_digit();

    ExtendedProduct {
        upper: (a.low_digit() << T::HALF_BITS) | b.low_digit(),
        lower: (c.low_digit() << T::HALF_BITS) | d,
    }
}
