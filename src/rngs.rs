// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Bit sources for the distributions.
//! All implement the RNG interface, [`FillBits`] turns their output
//! into unsigned words of the width a distribution asks for.

use rand::{RngCore, SeedableRng};

/// General trait for PRNGs
pub trait RNG {
    /// Initialize with specified seed.
    fn new(seed: u64) -> Self;
    /// Generate u32 and advance the state one step.
    fn next_u32(&mut self) -> u32;
    /// Generate u64 and advance the state one step.
    /// For generators that dont support full u64 might advance
    /// state more than one step.
    fn next(&mut self) -> u64;
    /// Advance the generator state by the specified amount of steps.
    fn advance(&mut self, delta: usize);
    /// Reset to inital state, equivalent to replacing with ::new(seed).
    fn reseed(&mut self, seed: u64);
}

/// Unsigned words that can be filled completely from one RNG call.
pub trait FillBits: Sized {
    fn fill_bits_from(rng: &mut impl RNG) -> Self;
}

// Narrow words keep the high bits, which are the better ones for most LCGs.
macro_rules! impl_fill_bits_narrow {
    ($($t:ty),*) => {$(
        impl FillBits for $t {
            #[inline]
            fn fill_bits_from(rng: &mut impl RNG) -> Self {
                (rng.next_u32() >> (u32::BITS - <$t>::BITS)) as $t
            }
        }
    )*};
}

impl_fill_bits_narrow!(u8, u16, u32);

impl FillBits for u64 {
    #[inline]
    fn fill_bits_from(rng: &mut impl RNG) -> Self {
        rng.next()
    }
}

/// Wraps the rand crates StdRng.
pub struct ReferenceRand {
    rng: rand::rngs::StdRng,
}

impl RNG for ReferenceRand {
    fn new(seed: u64) -> Self {
        ReferenceRand {
            rng: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }

    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn advance(&mut self, delta: usize) {
        for _ in 0..delta {
            let _ = self.next();
        }
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = rand::rngs::StdRng::seed_from_u64(seed);
    }
}

// Xorshift PRNGs
pub mod xorshift {
    use super::RNG;

    #[derive(Debug, Copy, Clone)]
    pub struct XORShift128 {
        state: [u32; 4],
    }

    impl XORShift128 {
        fn initial_state(seed: u64) -> [u32; 4] {
            // An all zero state is a fixed point.
            let seed = if seed == 0 { !0 } else { seed };
            [seed as u32, (seed >> 32) as u32, seed as u32, (seed >> 32) as u32]
        }
    }

    impl RNG for XORShift128 {
        fn new(seed: u64) -> Self {
            XORShift128 {
                state: Self::initial_state(seed),
            }
        }

        fn next_u32(&mut self) -> u32 {
            let mut t: u32 = self.state[3];
            let s: u32 = self.state[0];
            self.state[3] = self.state[2];
            self.state[2] = self.state[1];
            self.state[1] = s;
            t ^= t << 11;
            t ^= t >> 8;
            self.state[0] = t ^ s ^ (s >> 19);
            self.state[0]
        }

        fn next(&mut self) -> u64 {
            let a: u64 = self.next_u32() as u64;
            let b: u64 = self.next_u32() as u64;
            (a << 32) | b
        }

        fn advance(&mut self, delta: usize) {
            for _ in 0..delta {
                let _ = self.next_u32();
            }
        }

        fn reseed(&mut self, seed: u64) {
            self.state = Self::initial_state(seed);
        }
    }
}

// Linear congruential generators
pub mod lcg {
    use super::RNG;

    /// Originaly designed by Donald Knuth
    #[derive(Debug, Copy, Clone)]
    pub struct Mmix {
        state: u64,
    }

    impl RNG for Mmix {
        fn new(seed: u64) -> Self {
            Mmix { state: seed }
        }

        /// High half of the state, the low bits have short periods.
        fn next_u32(&mut self) -> u32 {
            (self.next() >> 32) as u32
        }

        fn next(&mut self) -> u64 {
            self.state = self.state.wrapping_mul(0x5851f42d4c957f2d);
            self.state = self.state.wrapping_add(0x14057b7ef767814f);
            self.state
        }

        fn advance(&mut self, delta: usize) {
            for _ in 0..delta {
                let _ = self.next();
            }
        }

        fn reseed(&mut self, seed: u64) {
            self.state = seed;
        }
    }
}

/// Degenerate sources for exercising edge cases.
/// OnlyZero never satisfies a nonzero rejection threshold, so a
/// distribution sampling from it only terminates for ranges whose size
/// divides 2^BITS.
pub mod testgens {
    use super::RNG;

    pub struct OnlyOne {}
    impl RNG for OnlyOne {
        fn new(_seed: u64) -> Self {
            OnlyOne {}
        }

        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next(&mut self) -> u64 {
            u64::MAX
        }

        fn advance(&mut self, _delta: usize) {}

        fn reseed(&mut self, _seed: u64) {}
    }

    pub struct OnlyZero {}
    impl RNG for OnlyZero {
        fn new(_seed: u64) -> Self {
            OnlyZero {}
        }

        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next(&mut self) -> u64 {
            0
        }

        fn advance(&mut self, _delta: usize) {}

        fn reseed(&mut self, _seed: u64) {}
    }

    /// Alternates between all zero and all one words.
    pub struct AlternatingBlocks {
        state: u64,
    }
    impl RNG for AlternatingBlocks {
        fn new(_seed: u64) -> Self {
            AlternatingBlocks { state: 0 }
        }

        fn next_u32(&mut self) -> u32 {
            self.next() as u32
        }

        fn next(&mut self) -> u64 {
            self.advance(1);
            self.state
        }

        fn advance(&mut self, delta: usize) {
            if delta & 1 == 1 {
                self.state = !self.state;
            }
        }

        fn reseed(&mut self, _seed: u64) {
            self.state = 0;
        }
    }

    /// Cycles through a fixed list of words.
    /// `next_u32` returns the high half of the next word, so narrow
    /// draws see the top bits of each word.
    #[derive(Debug, Clone)]
    pub struct Replay {
        words: Vec<u64>,
        position: usize,
    }

    impl Replay {
        pub fn from_words(words: Vec<u64>) -> Self {
            assert!(!words.is_empty(), "Replay needs at least one word");
            Replay { words, position: 0 }
        }

        /// Number of words handed out since construction or the last reseed.
        pub fn words_consumed(&self) -> usize {
            self.position
        }
    }

    impl RNG for Replay {
        /// Replays the seed itself as the only word.
        fn new(seed: u64) -> Self {
            Replay::from_words(vec![seed])
        }

        fn next_u32(&mut self) -> u32 {
            (self.next() >> 32) as u32
        }

        fn next(&mut self) -> u64 {
            let word = self.words[self.position % self.words.len()];
            self.position += 1;
            word
        }

        fn advance(&mut self, delta: usize) {
            self.position += delta;
        }

        /// Rewinds to the first word, the seed is ignored.
        fn reseed(&mut self, _seed: u64) {
            self.position = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testgens::{OnlyOne, Replay};
    use super::xorshift::XORShift128;
    use super::*;

    #[test]
    fn narrow_fill_takes_high_bits() {
        let mut r = Replay::from_words(vec![0xabcd_ef01_2345_6789]);
        assert_eq!(u8::fill_bits_from(&mut r), 0xab);
        assert_eq!(u16::fill_bits_from(&mut r), 0xabcd);
        assert_eq!(u32::fill_bits_from(&mut r), 0xabcd_ef01);
        assert_eq!(u64::fill_bits_from(&mut r), 0xabcd_ef01_2345_6789);
        assert_eq!(r.words_consumed(), 4);
    }

    #[test]
    fn only_one_fills_every_width() {
        let mut r = OnlyOne::new(0);
        assert_eq!(u8::fill_bits_from(&mut r), u8::MAX);
        assert_eq!(u16::fill_bits_from(&mut r), u16::MAX);
        assert_eq!(u64::fill_bits_from(&mut r), u64::MAX);
    }

    #[test]
    fn reseed_restarts_sequence() {
        let mut a = ReferenceRand::new(17);
        let first: Vec<u64> = (0..8).map(|_| a.next()).collect();
        a.reseed(17);
        let second: Vec<u64> = (0..8).map(|_| a.next()).collect();
        assert_eq!(first, second);

        let mut x = XORShift128::new(0);
        let first = x.next();
        x.reseed(0);
        assert_eq!(first, x.next());
        assert_ne!(first, 0);
    }

    #[test]
    fn replay_cycles() {
        let mut r = Replay::from_words(vec![1, 2, 3]);
        let seen: Vec<u64> = (0..5).map(|_| r.next()).collect();
        assert_eq!(seen, vec![1, 2, 3, 1, 2]);
        r.reseed(99);
        assert_eq!(r.next(), 1);
    }
}
