//! Directional-agent grid patrol simulation.
//!
//! An agent walks a rectangular grid, turning clockwise at obstacles, until
//! it steps off the edge or repeats a state. The crate answers two questions
//! about a grid: how many cells the agent visits before escaping, and which
//! single added obstacle would trap it in a cycle.
//!
//! - **[`core`]**: Pure, deterministic logic (grid, simulator, search).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Config and input file handling.
//!
//! [`solve`] coordinates core logic with I/O to implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod solve;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
