// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Type level lookup of unsigned integers by byte width.
//! Asking for a width without an impl is a compile error.

use std::mem::size_of;

/// Marker for a width of `N` bytes.
pub struct ByteWidth<const N: usize>;

/// Maps a [`ByteWidth`] to the unsigned integer of exactly that size.
pub trait SizedUnsignedType {
    type Type;
}

impl SizedUnsignedType for ByteWidth<1> {
    type Type = u8;
}
impl SizedUnsignedType for ByteWidth<2> {
    type Type = u16;
}
impl SizedUnsignedType for ByteWidth<4> {
    type Type = u32;
}
impl SizedUnsignedType for ByteWidth<8> {
    type Type = u64;
}
// Only reachable as the double width of the 64 bit types.
impl SizedUnsignedType for ByteWidth<16> {
    type Type = u128;
}

/// Unsigned integer that is `N` bytes wide.
pub type SizedUnsigned<const N: usize> = <ByteWidth<N> as SizedUnsignedType>::Type;

/// Integers with an unsigned counterpart of twice their size.
pub trait DoubleWidth: Copy {
    type Wide;
    /// Zero-extend the bit pattern of `self` into the wide type.
    fn widen(self) -> Self::Wide;
}

/// Unsigned integer twice as wide as `T`.
pub type DoubleWidthUnsigned<T> = <T as DoubleWidth>::Wide;

macro_rules! impl_double_width {
    ($($t:ty => $bits:ty),*) => {$(
        impl DoubleWidth for $t {
            type Wide = SizedUnsigned<{ 2 * size_of::<$t>() }>;

            #[inline]
            fn widen(self) -> Self::Wide {
                <Self::Wide>::from(self as $bits)
            }
        }
    )*};
}

impl_double_width!(
    u8 => u8, u16 => u16, u32 => u32, u64 => u64,
    i8 => u8, i16 => u16, i32 => u32, i64 => u64
);
