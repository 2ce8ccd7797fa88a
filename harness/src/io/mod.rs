//! I/O helpers for harness runs.

pub mod cache;
pub mod config;
pub mod input;
pub mod store;
