// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Runs the distribution test suite against every bundled bit source.
//! Usage: lemire-uniform [sample_size_exponent] [result_file_path]

use lemire_uniform::{
    config::SuiteConfig,
    dist_testing::{test_suite, test_suite_with_seeds},
    error::SuiteError,
    rngs::{self, RNG},
};

fn run(config: &SuiteConfig) -> Result<(), SuiteError> {
    let mut r = rngs::ReferenceRand::new(0);
    test_suite(&mut r, config, "Reference")?;
    let mut r = rngs::xorshift::XORShift128::new(0);
    test_suite(&mut r, config, "XORShift128")?;
    let mut r = rngs::lcg::Mmix::new(0);
    test_suite(&mut r, config, "MMIX")?;
    let mut r = rngs::testgens::OnlyOne::new(0);
    test_suite_with_seeds(&mut r, config, &[0], "OnlyOnes")?;
    let mut r = rngs::testgens::AlternatingBlocks::new(0);
    test_suite_with_seeds(&mut r, config, &[0], "AlternatingBlocks")?;
    Ok(())
}

fn main() {
    let start = std::time::Instant::now();
    let result = SuiteConfig::from_args(std::env::args().skip(1)).and_then(|config| run(&config));
    if let Err(err) = result {
        eprintln!("{}", err);
        std::process::exit(1);
    }
    println!("Full program runtime: {:?}", start.elapsed());
}
