//! Puzzle solutions, one module per day.

pub mod y2021_d01;
pub mod y2023_d01;
