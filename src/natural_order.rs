// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Mapping of integers to an unsigned representation whose ordering
//! matches the original type.
//! Unsigned types map onto themselves. Signed types are reinterpreted
//! as unsigned with the sign bit flipped, so i8::MIN becomes 0 and
//! i8::MAX becomes u8::MAX.

use std::fmt::Debug;

use crate::extended_mult::ExtendedMult;
use crate::rngs::FillBits;

/// Unsigned machine word used as the natural order representation.
pub trait UnsignedWord: ExtendedMult + FillBits + Copy + Ord + Debug {
    const ZERO: Self;
    const ONE: Self;
    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_neg(self) -> Self;
    /// `self % rhs`, `rhs` must not be zero.
    fn remainder(self, rhs: Self) -> Self;
}

/// Integers with a bijective, order preserving unsigned encoding.
pub trait NaturalOrder: Copy + Ord + Debug {
    type Unsigned: UnsignedWord;
    /// Encode `self` so that unsigned comparison matches `Ord` on `Self`.
    fn transpose_to(self) -> Self::Unsigned;
    /// Inverse of [`NaturalOrder::transpose_to`].
    fn transpose_back(value: Self::Unsigned) -> Self;
}

macro_rules! impl_unsigned_word {
    ($($u:ty),*) => {$(
        impl UnsignedWord for $u {
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$u>::wrapping_add(self, rhs)
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$u>::wrapping_sub(self, rhs)
            }

            #[inline]
            fn wrapping_neg(self) -> Self {
                <$u>::wrapping_neg(self)
            }

            #[inline]
            fn remainder(self, rhs: Self) -> Self {
                self % rhs
            }
        }

        impl NaturalOrder for $u {
            type Unsigned = $u;

            #[inline]
            fn transpose_to(self) -> $u {
                self
            }

            #[inline]
            fn transpose_back(value: $u) -> Self {
                value
            }
        }
    )*};
}

macro_rules! impl_signed_natural_order {
    ($($t:ty => $u:ty),*) => {$(
        impl NaturalOrder for $t {
            type Unsigned = $u;

            #[inline]
            fn transpose_to(self) -> $u {
                (self as $u) ^ (1 << (<$u>::BITS - 1))
            }

            #[inline]
            fn transpose_back(value: $u) -> Self {
                (value ^ (1 << (<$u>::BITS - 1))) as $t
            }
        }
    )*};
}

impl_unsigned_word!(u8, u16, u32, u64);
impl_signed_natural_order!(i8 => u8, i16 => u16, i32 => u32, i64 => u64);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn signed_extremes() {
        assert_eq!(i8::MIN.transpose_to(), 0);
        assert_eq!((-1i8).transpose_to(), 0x7f);
        assert_eq!(0i8.transpose_to(), 0x80);
        assert_eq!(i8::MAX.transpose_to(), u8::MAX);
        assert_eq!(i64::MIN.transpose_to(), 0);
        assert_eq!(i64::MAX.transpose_to(), u64::MAX);
    }

    #[test]
    fn unsigned_is_identity() {
        assert_eq!(0u32.transpose_to(), 0);
        assert_eq!(u32::MAX.transpose_to(), u32::MAX);
        assert_eq!(u16::transpose_back(1234), 1234);
    }

    #[test]
    fn round_trip_all_narrow_values() {
        for v in i8::MIN..=i8::MAX {
            assert_eq!(i8::transpose_back(v.transpose_to()), v);
        }
        for v in u8::MIN..=u8::MAX {
            assert_eq!(u8::transpose_back(v.transpose_to()), v);
        }
        for v in i16::MIN..=i16::MAX {
            assert_eq!(i16::transpose_back(v.transpose_to()), v);
        }
    }

    #[test]
    fn order_preserved_across_i16() {
        let mut last = i16::MIN.transpose_to();
        for v in (i16::MIN + 1)..=i16::MAX {
            let current = v.transpose_to();
            assert!(current > last, "{v}");
            last = current;
        }
    }

    proptest! {
        #[test]
        fn i64_round_trip(v in any::<i64>()) {
            prop_assert_eq!(i64::transpose_back(v.transpose_to()), v);
        }

        #[test]
        fn i32_order_preserved(x in any::<i32>(), y in any::<i32>()) {
            prop_assert_eq!(x.cmp(&y), x.transpose_to().cmp(&y.transpose_to()));
        }

        #[test]
        fn i64_order_preserved(x in any::<i64>(), y in any::<i64>()) {
            prop_assert_eq!(x.cmp(&y), x.transpose_to().cmp(&y.transpose_to()));
        }
    }
}
