//! 2021 day 1: count depth increases.

use anyhow::{Context, Result};

fn depths(input: &[String]) -> Result<Vec<u64>> {
    input
        .iter()
        .map(|line| {
            line.trim()
                .parse()
                .with_context(|| format!("parse depth {line:?}"))
        })
        .collect()
}

fn increases(values: &[u64], gap: usize) -> u64 {
    values
        .iter()
        .zip(values.iter().skip(gap))
        .filter(|(before, after)| after > before)
        .count() as u64
}

pub fn part1(input: &[String]) -> Result<u64> {
    Ok(increases(&depths(input)?, 1))
}

/// Sliding windows of three share two terms, so comparing window sums reduces
/// to comparing values three apart.
pub fn part2(input: &[String]) -> Result<u64> {
    Ok(increases(&depths(input)?, 3))
}
