//! Error taxonomy for grid parsing, simulation, and obstruction search.
//!
//! Every variant is fatal to the operation that raised it. `Escaped` and
//! `Looped` are simulation outcomes, not errors.

use thiserror::Error;

use crate::core::state::Position;

/// Errors raised by the pure simulation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatrolError {
    /// Input contained no rows.
    #[error("grid is empty")]
    EmptyGrid,

    /// A row's length differs from the first row.
    #[error("row {row} has length {found}, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A character other than `.`, `#`, or `^` was found.
    #[error("unknown cell {ch:?} at ({x}, {y})")]
    UnknownCell { x: usize, y: usize, ch: char },

    /// No `^` marker in the input.
    #[error("no start marker '^' found")]
    NoStart,

    /// More than one `^` marker in the input.
    #[error("ambiguous start: {} markers found at {}", .found.len(), format_positions(.found))]
    AmbiguousStart { found: Vec<Position> },

    /// Tried to add an obstacle on a cell that is not empty.
    #[error("cannot place obstacle at {at}: cell is not empty")]
    InvalidPlacement { at: Position },

    /// The unobstructed baseline run cycled instead of escaping.
    #[error("baseline patrol loops; no escape path to count")]
    UnexpectedLoop,

    /// The defensive step budget was exhausted. Always an implementation bug.
    #[error("simulation exceeded step budget of {budget}")]
    InvariantViolation { budget: usize },

    /// The search deadline passed before every trial finished.
    #[error("search deadline exceeded after {completed} of {total} trials")]
    DeadlineExceeded { completed: usize, total: usize },
}

/// Result type for core operations.
pub type PatrolResult<T> = Result<T, PatrolError>;

fn format_positions(positions: &[Position]) -> String {
    positions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
