// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Statistical testing of distribution output for a given bit source.

use std::{ops::Mul, time::Duration, time::Instant};

use crate::{
    config::SuiteConfig,
    distribution::UniformIntegerDistribution,
    error::SuiteError,
    rngs::{self, RNG},
    stats, strings,
    utils::{self, write_and_print},
};

const P_LOG_STAT_LIMIT: f64 = 3.0;
const TEST_COUNT: usize = 7;

fn test_f_pointers<R: RNG>() -> [fn(&mut R, usize) -> f64; TEST_COUNT] {
    [
        stats::small_range_test,
        stats::signed_span_test,
        stats::odd_width_test,
        stats::signed_odd_width_test,
        stats::full_domain_u16_test,
        stats::full_domain_i64_test,
        stats::single_value_test,
    ]
}

#[derive(Debug, Copy, Clone)]
struct TestResult {
    test_id: usize,
    p: f64,
    time_used: Duration,
}

impl TestResult {
    pub fn logstat(&self) -> f64 {
        p_log_stat(self.p)
    }
    pub fn passed(&self) -> bool {
        self.logstat() < P_LOG_STAT_LIMIT
    }
    pub fn format(&self) -> String {
        format!(
            "{:<8}: Time: {}     p: {:.6}     pls: {:.4}   - {}",
            strings::TEST_NAMES[self.test_id],
            utils::format_elapsed_time(self.time_used),
            self.p,
            self.logstat(),
            if self.passed() {
                strings::PASS_STR
            } else {
                strings::FAIL_STR
            }
        )
    }
}

/// Run the test located at `test_f_pointers()[test_id]`
/// and return the result and excution time.
fn run_single_test<R: RNG>(test_rng: &mut R, sample_size: usize, test_id: usize) -> TestResult {
    let start: Instant = Instant::now();
    let p: f64 = test_f_pointers::<R>()[test_id](test_rng, sample_size);
    let time_used: Duration = start.elapsed();
    TestResult {
        test_id,
        p,
        time_used,
    }
}

/// Logarithmic quantity to specify how close to 1.0 or 0.0 a p-value is.
/// Has a range of 0-9.9999.
/// -0.2 * (log2(min(p, 1-p)) - 1) clamped to 9.9999
fn p_log_stat(p: f64) -> f64 {
    (p.min(1.0 - p).log2() - 1.0).mul(-0.2).min(9.9999)
}

/// Samples per second of a small u64 range drawn through `test_rng`.
fn measure_sample_rate(test_rng: &mut impl RNG, sample_size: usize) -> f64 {
    let dist = UniformIntegerDistribution::new(0u64, 999);
    let start = Instant::now();
    let checksum = dist
        .sample_iter(test_rng)
        .take(sample_size)
        .fold(0u64, |acc, v| acc.wrapping_add(v));
    let elapsed = start.elapsed().as_secs_f64().max(f64::MIN_POSITIVE);
    std::hint::black_box(checksum);
    sample_size as f64 / elapsed
}

/// Measure sampling speed over sample size and report it
/// relative to the rand crates default RNG.
fn speed_test(test_rng: &mut impl RNG, sample_size: usize, seed: u64) -> String {
    test_rng.reseed(seed);
    let speed = measure_sample_rate(test_rng, sample_size);
    let mut ref_rng = rngs::ReferenceRand::new(seed);
    let ref_speed = measure_sample_rate(&mut ref_rng, sample_size);
    format!(
        "Drew {} samples. (Speed: {}samples/s  ({:.4}%))",
        sample_size,
        utils::format_sample_rate(speed),
        (speed / ref_speed) * 100.0
    )
}

/// Peform all tests and add the results to `test_results`.
fn test_single_seed(
    test_rng: &mut impl RNG,
    sample_size: usize,
    seed: u64,
    test_results: &mut Vec<TestResult>,
    result_file_path: &str,
) -> Result<(), SuiteError> {
    write_and_print(format!("Testing for seed: {:#018x}", seed), result_file_path)?;
    for test_id in 0..TEST_COUNT {
        // Every test starts from the same stream position.
        test_rng.reseed(seed);
        let rslt = run_single_test(test_rng, sample_size, test_id);
        write_and_print(rslt.format(), result_file_path)?;
        test_results.push(rslt);
    }
    Ok(())
}

/// Format a slice of `TestResults` as a summary of the results.
fn format_test_results_summary(test_results: &[TestResult]) -> String {
    const P_LOG_STAT_BINS: usize = 10;
    let mut p_logstat_bins = [0u32; P_LOG_STAT_BINS];
    let mut passed_tests = 0usize;
    for rslt in test_results {
        p_logstat_bins[(rslt.logstat().floor() as usize).min(P_LOG_STAT_BINS - 1)] += 1;
        if rslt.passed() {
            passed_tests += 1;
        }
    }
    let logstat_summary: String = p_logstat_bins
        .iter()
        .enumerate()
        .map(|(bin, &value)| {
            if bin == P_LOG_STAT_BINS - 1 {
                format!("{:>2}+ : {:04}", bin, value) // Handle last bin with '+'
            } else {
                format!("{:>2} : {:04}|", bin, value)
            }
        })
        .collect::<Vec<String>>()
        .join("");
    format!(
        "P log stats: \n{}\nOverall result: {}          ( {} / {} passed)",
        logstat_summary,
        if passed_tests == test_results.len() {
            strings::PASS_STR
        } else {
            strings::FAIL_STR
        },
        passed_tests,
        test_results.len()
    )
}

/// Run every distribution test on the supplied RNG for each configured seed.
/// Returns whether all tests passed.
pub fn test_suite(
    test_rng: &mut impl RNG,
    config: &SuiteConfig,
    rng_name: &str,
) -> Result<bool, SuiteError> {
    config.validate()?;
    run_suite(test_rng, config, config.seeds(), rng_name)
}

/// Run every distribution test on the supplied RNG.
/// Allows supplying a custom list of seeds for testing.
pub fn test_suite_with_seeds(
    test_rng: &mut impl RNG,
    config: &SuiteConfig,
    seeds: &[u64],
    rng_name: &str,
) -> Result<bool, SuiteError> {
    config.validate()?;
    run_suite(test_rng, config, seeds, rng_name)
}

/// Shared body of the suite entry points, `config` is already validated.
fn run_suite(
    test_rng: &mut impl RNG,
    config: &SuiteConfig,
    seeds: &[u64],
    rng_name: &str,
) -> Result<bool, SuiteError> {
    let full_start = Instant::now();
    let result_file_path = config.result_file_path.as_str();
    let sample_size = config.sample_size();
    write_and_print(
        format!(
            "\nTesting: {}    ({})",
            rng_name,
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ),
        result_file_path,
    )?;
    let mut test_results: Vec<TestResult> = vec![];
    let speed_seed = seeds.first().copied().unwrap_or_default();
    write_and_print(speed_test(test_rng, sample_size, speed_seed), result_file_path)?;
    for &seed in seeds.iter() {
        test_single_seed(
            test_rng,
            sample_size,
            seed,
            &mut test_results,
            result_file_path,
        )?;
    }
    write_and_print(format!("\nSummary for: {}", rng_name), result_file_path)?;
    write_and_print(format_test_results_summary(&test_results), result_file_path)?;
    write_and_print(
        format!("Total runtime: {:?}", full_start.elapsed()),
        result_file_path,
    )?;
    Ok(test_results.iter().all(TestResult::passed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rngs::testgens::OnlyOne;
    use crate::rngs::ReferenceRand;

    fn temp_config(name: &str) -> SuiteConfig {
        let path = std::env::temp_dir().join(format!(
            "lemire_uniform_{}_{}.txt",
            name,
            std::process::id()
        ));
        SuiteConfig {
            sample_size_exponent: 12,
            seed_count: 2,
            result_file_path: path.to_string_lossy().into_owned(),
        }
    }

    fn result(p: f64) -> TestResult {
        TestResult {
            test_id: 0,
            p,
            time_used: Duration::from_millis(1),
        }
    }

    #[test]
    fn p_log_stat_limits() {
        assert!((p_log_stat(0.5) - 0.4).abs() < 1e-12);
        assert_eq!(p_log_stat(0.0), 9.9999);
        assert_eq!(p_log_stat(1.0), 9.9999);
        assert!(result(0.3).passed());
        assert!(!result(1e-9).passed());
        assert!(!result(1.0 - 1e-9).passed());
    }

    #[test]
    fn summary_counts_passes() {
        let results = [result(0.5), result(0.25), result(0.0)];
        let summary = format_test_results_summary(&results);
        assert!(summary.contains("( 2 / 3 passed)"), "{summary}");
        assert!(summary.contains(strings::FAIL_STR));
        assert!(summary.contains(" 0 : 0002|"), "{summary}");
        assert!(summary.contains(" 9+ : 0001"), "{summary}");

        let summary = format_test_results_summary(&results[..2]);
        assert!(summary.contains(strings::PASS_STR));
    }

    #[test]
    fn result_line_names_the_test() {
        let line = TestResult {
            test_id: 4,
            p: 0.5,
            time_used: Duration::from_millis(3),
        }
        .format();
        assert!(line.starts_with("FullU16"), "{line}");
        assert!(line.ends_with(strings::PASS_STR), "{line}");
    }

    #[test]
    fn suite_writes_result_file() {
        let config = temp_config("suite");
        let _ = std::fs::remove_file(&config.result_file_path);
        let mut rng = ReferenceRand::new(0);
        test_suite(&mut rng, &config, "Reference").unwrap();
        let content = std::fs::read_to_string(&config.result_file_path).unwrap();
        assert!(content.contains("Testing: Reference"));
        assert_eq!(content.matches("Testing for seed").count(), 2);
        for name in strings::TEST_NAMES {
            assert_eq!(content.matches(name).count(), 2, "{name}");
        }
        let _ = std::fs::remove_file(&config.result_file_path);
    }

    #[test]
    fn constant_source_fails_suite() {
        let config = temp_config("constant");
        let mut rng = OnlyOne::new(0);
        let passed = test_suite_with_seeds(&mut rng, &config, &[0], "OnlyOne").unwrap();
        assert!(!passed);
        let _ = std::fs::remove_file(&config.result_file_path);
    }

    #[test]
    fn table_covers_every_named_test() {
        assert_eq!(test_f_pointers::<ReferenceRand>().len(), strings::TEST_NAMES.len());
        let line = TestResult {
            test_id: TEST_COUNT - 1,
            p: 0.5,
            time_used: Duration::from_millis(3),
        }
        .format();
        assert!(line.starts_with("Single"), "{line}");
    }

    #[test]
    fn invalid_config_is_reported() {
        let mut config = temp_config("invalid");
        config.sample_size_exponent = 1;
        let mut rng = ReferenceRand::new(0);
        assert!(matches!(
            test_suite(&mut rng, &config, "Reference"),
            Err(SuiteError::InvalidConfig(_))
        ));
        assert!(matches!(
            test_suite_with_seeds(&mut rng, &config, &[0], "Reference"),
            Err(SuiteError::InvalidConfig(_))
        ));
        // Nothing is written for a rejected configuration.
        assert!(!std::path::Path::new(&config.result_file_path).exists());
    }
}
