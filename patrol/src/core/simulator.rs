//! Deterministic patrol state machine.
//!
//! The agent moves forward until the cell ahead is an obstacle (turn right,
//! stay put) or off the grid (escape). A repeated `(position, direction)`
//! pair means the walk is periodic and will never escape.
//!
//! There are exactly `width * height * 4` distinct states, and every
//! iteration either records a new state or terminates, so a walk ends within
//! `width * height * 4 + 1` iterations. The step budget enforces that bound.

use std::collections::HashSet;

use tracing::trace;

use crate::core::error::{PatrolError, PatrolResult};
use crate::core::grid::{Cell, Grid};
use crate::core::state::{AgentState, Position};

/// Terminal result of one walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationOutcome {
    /// The agent stepped off the grid. `visited` includes the start cell.
    Escaped { visited: HashSet<Position> },
    /// A state repeated; the agent patrols forever.
    Looped,
}

impl SimulationOutcome {
    pub fn is_looped(&self) -> bool {
        matches!(self, SimulationOutcome::Looped)
    }
}

/// Upper bound on loop iterations for any walk on `grid`.
pub fn default_step_budget(grid: &Grid) -> usize {
    grid.state_space() + 1
}

/// Walk from `initial` until the agent escapes or repeats a state.
///
/// `step_budget` defaults to [`default_step_budget`]. Exceeding it yields
/// [`PatrolError::InvariantViolation`], which a correct walk never hits.
pub fn run(
    grid: &Grid,
    initial: AgentState,
    step_budget: Option<usize>,
) -> PatrolResult<SimulationOutcome> {
    let walk = walk(grid, initial, step_budget, |_| {})?;
    Ok(match walk.end {
        WalkEnd::Escaped => SimulationOutcome::Escaped {
            visited: walk.visited,
        },
        WalkEnd::Looped => SimulationOutcome::Looped,
    })
}

/// Distinct positions of an escaping walk in first-visit order.
///
/// Returns `None` when the walk loops.
pub fn trace_path(
    grid: &Grid,
    initial: AgentState,
    step_budget: Option<usize>,
) -> PatrolResult<Option<Vec<Position>>> {
    let mut path = Vec::new();
    let walk = walk(grid, initial, step_budget, |at| path.push(at))?;
    Ok(match walk.end {
        WalkEnd::Escaped => Some(path),
        WalkEnd::Looped => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkEnd {
    Escaped,
    Looped,
}

struct Walk {
    end: WalkEnd,
    visited: HashSet<Position>,
}

/// Core step loop. `on_new_position` fires once per distinct position, in
/// the order the agent first reaches it.
fn walk<F: FnMut(Position)>(
    grid: &Grid,
    initial: AgentState,
    step_budget: Option<usize>,
    mut on_new_position: F,
) -> PatrolResult<Walk> {
    let budget = step_budget.unwrap_or_else(|| default_step_budget(grid));
    let mut seen: HashSet<AgentState> = HashSet::new();
    let mut visited: HashSet<Position> = HashSet::new();
    let mut state = initial;
    let mut steps = 0usize;

    loop {
        steps += 1;
        if steps > budget {
            return Err(PatrolError::InvariantViolation { budget });
        }

        if !seen.insert(state) {
            trace!(steps, states = seen.len(), "walk looped");
            return Ok(Walk {
                end: WalkEnd::Looped,
                visited,
            });
        }
        if visited.insert(state.position) {
            on_new_position(state.position);
        }

        let ahead = state.ahead();
        state = match grid.classify(ahead) {
            Cell::OutOfBounds => {
                trace!(steps, visited = visited.len(), "walk escaped");
                return Ok(Walk {
                    end: WalkEnd::Escaped,
                    visited,
                });
            }
            Cell::Obstacle => state.turned(),
            Cell::Empty => AgentState::new(ahead, state.direction),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::direction::Direction;
    use crate::test_support::{BOXED_GRID, SAMPLE_GRID, grid};

    #[test]
    fn sample_escapes_after_visiting_41_cells() {
        let grid = grid(SAMPLE_GRID);
        let outcome = run(&grid, AgentState::start(&grid), None).expect("run");
        match outcome {
            SimulationOutcome::Escaped { visited } => {
                assert_eq!(visited.len(), 41);
                assert!(visited.contains(&grid.start()));
            }
            SimulationOutcome::Looped => panic!("sample must escape"),
        }
    }

    #[test]
    fn boxed_agent_loops_within_four_states() {
        let grid = grid(BOXED_GRID);
        // Four recorded states plus the iteration that detects the repeat.
        let outcome = run(&grid, AgentState::start(&grid), Some(5)).expect("run");
        assert_eq!(outcome, SimulationOutcome::Looped);
    }

    #[test]
    fn immediate_escape_still_counts_start() {
        let grid = grid("^..\n...");
        let outcome = run(&grid, AgentState::start(&grid), None).expect("run");
        let SimulationOutcome::Escaped { visited } = outcome else {
            panic!("expected escape");
        };
        assert_eq!(visited, HashSet::from([Position::new(0, 0)]));
    }

    #[test]
    fn turns_on_obstacle_without_moving() {
        // Blocked above, so the first move is to the right.
        let grid = grid("#..\n^..\n...");
        let path = trace_path(&grid, AgentState::start(&grid), None)
            .expect("trace")
            .expect("escapes");
        assert_eq!(
            path,
            vec![Position::new(0, 1), Position::new(1, 1), Position::new(2, 1)]
        );
    }

    #[test]
    fn exhausted_budget_is_an_invariant_violation() {
        let grid = grid(SAMPLE_GRID);
        let err = run(&grid, AgentState::start(&grid), Some(3)).expect_err("budget");
        assert_eq!(err, PatrolError::InvariantViolation { budget: 3 });
    }

    #[test]
    fn default_budget_matches_state_space() {
        let grid = grid(SAMPLE_GRID);
        assert_eq!(default_step_budget(&grid), 401);
    }

    #[test]
    fn runs_are_deterministic() {
        let grid = grid(SAMPLE_GRID);
        let initial = AgentState::new(grid.start(), Direction::Up);
        let first = run(&grid, initial, None).expect("first");
        let second = run(&grid, initial, None).expect("second");
        assert_eq!(first, second);
    }

    #[test]
    fn trace_path_returns_none_for_loops() {
        let grid = grid(BOXED_GRID);
        let path = trace_path(&grid, AgentState::start(&grid), None).expect("trace");
        assert_eq!(path, None);
    }
}
