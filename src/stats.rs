// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Statistical checks of distribution output.
//! Each test draws 'sample_size' values through a UniformIntegerDistribution
//! and returns a p value. A value outside the requested range is reported
//! as p = 0.

use crate::{
    distribution::UniformIntegerDistribution, natural_order::NaturalOrder, rngs::RNG, utils,
};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Get p value for given degrees of freedom and chi squared value.
fn chi_squared_p_value(df: u32, chi_squared: f64) -> f64 {
    match ChiSquared::new(df as f64) {
        Ok(dist) => 1.0 - dist.cdf(chi_squared),
        Err(_) => 0.0,
    }
}

/// Chi squared test of bucket counts against a uniform expectation.
/// Returns chi2 statistic, p value
pub fn bucket_frequency_test(counts: &[u64]) -> (f64, f64) {
    let total: u64 = counts.iter().sum();
    if counts.len() < 2 || total == 0 {
        return (0.0, 0.0);
    }
    let expected: f64 = total as f64 / counts.len() as f64;
    let mut chi_squared: f64 = 0.0;
    for &value in counts {
        chi_squared += (value as f64 - expected).powi(2) / expected;
    }
    let p = chi_squared_p_value(counts.len() as u32 - 1, chi_squared);
    (chi_squared, p)
}

/// Two sided test for an excess of one outcome out of two equally likely ones.
/// 'difference' is (count of A) - (count of B) over 'sample_size' trials.
pub fn balance_test(difference: i64, sample_size: usize) -> f64 {
    statrs::function::erf::erfc(
        (difference.abs() as f64 / f64::sqrt(sample_size as f64)) * utils::INV_ROOT2,
    )
}

/// Sample 'sample_size' values from [a, b] and count them into buckets.
/// Returns None as soon as a value leaves the range.
fn bucket_samples<T: NaturalOrder>(
    test_rng: &mut impl RNG,
    sample_size: usize,
    a: T,
    b: T,
    bucket_count: usize,
    bucket_of: impl Fn(T) -> usize,
) -> Option<Vec<u64>> {
    let dist = UniformIntegerDistribution::new(a, b);
    let mut counts = vec![0u64; bucket_count];
    for value in dist.sample_iter(test_rng).take(sample_size) {
        if value < a || value > b {
            return None;
        }
        counts[bucket_of(value)] += 1;
    }
    Some(counts)
}

fn bucketed_p_value(counts: Option<Vec<u64>>) -> f64 {
    counts.map_or(0.0, |counts| bucket_frequency_test(&counts).1)
}

/// u8 over [0, 5], one bucket per value.
pub fn small_range_test(test_rng: &mut impl RNG, sample_size: usize) -> f64 {
    bucketed_p_value(bucket_samples(test_rng, sample_size, 0u8, 5, 6, |v| {
        v as usize
    }))
}

/// i32 over [-50, 49], one bucket per value.
pub fn signed_span_test(test_rng: &mut impl RNG, sample_size: usize) -> f64 {
    bucketed_p_value(bucket_samples(test_rng, sample_size, -50i32, 49, 100, |v| {
        (v + 50) as usize
    }))
}

/// u64 over [0, 3 * 2^62), a range with a rejection threshold of 2^62.
/// Bucketed by the top two bits.
pub fn odd_width_test(test_rng: &mut impl RNG, sample_size: usize) -> f64 {
    bucketed_p_value(bucket_samples(
        test_rng,
        sample_size,
        0u64,
        (3 << 62) - 1,
        3,
        |v| (v >> 62) as usize,
    ))
}

/// i32 over [-2^30, 2^31), three equally sized blocks of 2^30 values.
pub fn signed_odd_width_test(test_rng: &mut impl RNG, sample_size: usize) -> f64 {
    bucketed_p_value(bucket_samples(
        test_rng,
        sample_size,
        -(1i32 << 30),
        i32::MAX,
        3,
        |v| ((v >> 30) + 1) as usize,
    ))
}

/// u16 over its whole domain, bucketed by the high byte.
pub fn full_domain_u16_test(test_rng: &mut impl RNG, sample_size: usize) -> f64 {
    bucketed_p_value(bucket_samples(
        test_rng,
        sample_size,
        u16::MIN,
        u16::MAX,
        256,
        |v| (v >> 8) as usize,
    ))
}

/// i64 over its whole domain, balance of negative against non negative values.
pub fn full_domain_i64_test(test_rng: &mut impl RNG, sample_size: usize) -> f64 {
    let dist = UniformIntegerDistribution::new(i64::MIN, i64::MAX);
    let mut difference: i64 = 0;
    for value in dist.sample_iter(test_rng).take(sample_size) {
        difference += if value < 0 { 1 } else { -1 };
    }
    balance_test(difference, sample_size)
}

/// i16 over [-7, -7]. Every sample must equal the bound.
/// p is 0.5 when they all do, so the p log stat treats it as unremarkable.
pub fn single_value_test(test_rng: &mut impl RNG, sample_size: usize) -> f64 {
    let dist = UniformIntegerDistribution::new(-7i16, -7);
    if dist.sample_iter(test_rng).take(sample_size).all(|v| v == -7) {
        0.5
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rngs::testgens::{AlternatingBlocks, OnlyOne};
    use crate::rngs::ReferenceRand;

    const SAMPLES: usize = 1 << 16;

    #[test]
    fn perfectly_flat_counts() {
        let (chi_squared, p) = bucket_frequency_test(&[100, 100, 100, 100]);
        assert_eq!(chi_squared, 0.0);
        assert!((p - 1.0).abs() < 1e-12);
    }

    #[test]
    fn lopsided_counts() {
        let (chi_squared, p) = bucket_frequency_test(&[1000, 0, 0, 0]);
        assert_eq!(chi_squared, 3000.0);
        assert!(p < 1e-12);
    }

    #[test]
    fn degenerate_bucket_input() {
        assert_eq!(bucket_frequency_test(&[]), (0.0, 0.0));
        assert_eq!(bucket_frequency_test(&[5]), (0.0, 0.0));
        assert_eq!(bucket_frequency_test(&[0, 0]), (0.0, 0.0));
    }

    #[test]
    fn balance() {
        assert!((balance_test(0, 1000) - 1.0).abs() < 1e-12);
        assert!(balance_test(1000, 1000) < 1e-12);
        assert_eq!(balance_test(-40, 1600), balance_test(40, 1600));
    }

    #[test]
    fn reference_rng_passes() {
        let tests: [fn(&mut ReferenceRand, usize) -> f64; 7] = [
            small_range_test,
            signed_span_test,
            odd_width_test,
            signed_odd_width_test,
            full_domain_u16_test,
            full_domain_i64_test,
            single_value_test,
        ];
        for (id, test) in tests.iter().enumerate() {
            let mut rng = ReferenceRand::new(0xdead_beef);
            let p = test(&mut rng, SAMPLES);
            assert!(p > 1e-6, "test {id} p = {p}");
        }
    }

    #[test]
    fn constant_source_fails() {
        let mut rng = OnlyOne::new(0);
        assert!(small_range_test(&mut rng, SAMPLES) < 1e-6);
        assert!(full_domain_u16_test(&mut rng, SAMPLES) < 1e-6);
        assert!(full_domain_i64_test(&mut rng, SAMPLES) < 1e-6);
    }

    #[test]
    fn single_value_holds_for_any_source() {
        assert_eq!(single_value_test(&mut ReferenceRand::new(1), SAMPLES), 0.5);
        assert_eq!(single_value_test(&mut OnlyOne::new(0), SAMPLES), 0.5);
        assert_eq!(single_value_test(&mut AlternatingBlocks::new(0), SAMPLES), 0.5);
    }

    #[test]
    fn alternating_source_is_balanced_in_sign_only() {
        // 0 and u64::MAX map to i64::MIN and i64::MAX.
        let mut rng = AlternatingBlocks::new(0);
        assert!((full_domain_i64_test(&mut rng, SAMPLES) - 1.0).abs() < 1e-12);
        let mut rng = AlternatingBlocks::new(0);
        assert!(signed_span_test(&mut rng, SAMPLES) < 1e-6);
    }
}
