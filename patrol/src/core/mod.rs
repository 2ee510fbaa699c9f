//! Deterministic, pure simulation logic.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! grids and return deterministic outputs suitable for tests.

pub mod budget;
pub mod direction;
pub mod error;
pub mod grid;
pub mod search;
pub mod simulator;
pub mod state;
