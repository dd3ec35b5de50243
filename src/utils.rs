// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Misc utility functions.

use std::{fs::OpenOptions, io::Write, time::Duration};

pub const INV_ROOT2: f64 = 0.7071067811865475;

/// Print a line to stdout and append it to the file at `file_path`.
pub fn write_and_print(text: String, file_path: &str) -> std::io::Result<()> {
    println!("{}", text);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;
    writeln!(file, "{}", text)?;
    Ok(())
}

/// Format a duration with a unit fitting its size.
/// e.g. 1500 µs is 1.500 ms
pub fn format_elapsed_time(elapsed: Duration) -> String {
    let nanos = elapsed.as_nanos();
    if nanos >= 1_000_000_000 {
        format!("{:>8.3} s ", elapsed.as_secs_f64())
    } else if nanos >= 1_000_000 {
        format!("{:>8.3} ms", nanos as f64 / 1_000_000.0)
    } else if nanos >= 1_000 {
        format!("{:>8.3} µs", nanos as f64 / 1_000.0)
    } else {
        format!("{:>8.3} ns", nanos as f64)
    }
}

/// Format a rate of samples per second into a pretty String.
/// e.g. 2500000 is 2.50 M
pub fn format_sample_rate(samples_per_second: f64) -> String {
    if samples_per_second > 1e9 {
        format!("{:.2} G", samples_per_second / 1e9)
    } else if samples_per_second > 1e6 {
        format!("{:.2} M", samples_per_second / 1e6)
    } else if samples_per_second > 1e3 {
        format!("{:.2} k", samples_per_second / 1e3)
    } else {
        format!("{:.2} ", samples_per_second)
    }
}
