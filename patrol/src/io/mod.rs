//! I/O helpers for patrol commands.

pub mod config;
pub mod input;
