//! Stable exit codes for `solve` commands.

/// Command succeeded; for `solve run`, the harness produced a confirmed answer.
pub const OK: i32 = 0;
/// Invalid arguments, config, or cache I/O errors.
pub const INVALID: i32 = 1;
/// `solve run` finished without a confirmed answer (example or puzzle failed).
pub const UNSOLVED: i32 = 2;
