//! Stable exit codes for patrol CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Malformed input or config, or any other failure.
pub const INVALID: i32 = 1;
/// The unobstructed walk loops, so there is no visited count.
pub const UNEXPECTED_LOOP: i32 = 2;
/// The obstruction search hit its configured deadline.
pub const TIMED_OUT: i32 = 3;
