//! Regression fixtures for the canonical example and hand-built edge cases.

use std::collections::HashSet;

use patrol::core::direction::Direction;
use patrol::core::error::PatrolError;
use patrol::core::grid::Grid;
use patrol::core::search::find_loop_causing_obstructions;
use patrol::core::simulator::{SimulationOutcome, run};
use patrol::core::state::{AgentState, Position};
use patrol::solve::count_visited;
use patrol::test_support::{BOXED_GRID, SAMPLE_GRID, grid};

#[test]
fn canonical_example_answers() {
    let grid = grid(SAMPLE_GRID);
    let initial = AgentState::start(&grid);

    assert_eq!(count_visited(&grid, initial), Ok(41));
    let found = find_loop_causing_obstructions(&grid, initial).expect("search");
    assert_eq!(found.len(), 6);
}

#[test]
fn boxed_agent_spins_through_every_direction() {
    let grid = grid(BOXED_GRID);
    let start = grid.start();
    // Each direction is a distinct state; a fifth iteration sees a repeat.
    for direction in Direction::ALL {
        let outcome = run(&grid, AgentState::new(start, direction), Some(5)).expect("run");
        assert_eq!(outcome, SimulationOutcome::Looped);
    }
    assert_eq!(
        run(&grid, AgentState::start(&grid), Some(4)),
        Err(PatrolError::InvariantViolation { budget: 4 })
    );
}

#[test]
fn corridor_escape_visits_whole_column() {
    let grid = grid(".\n.\n.\n^\n");
    let outcome = run(&grid, AgentState::start(&grid), None).expect("run");
    let expected: HashSet<Position> = (0..4).map(|y| Position::new(0, y)).collect();
    assert_eq!(outcome, SimulationOutcome::Escaped { visited: expected });
}

#[test]
fn single_obstacle_closes_the_spiral() {
    // Baseline: up, right, down, then left out of row 2. Blocking (0, 2)
    // turns the agent back up column 1 onto the route it already walked.
    let text = "\
.#...
....#
.....
.^.#.
...#.
";
    let grid = grid(text);
    let initial = AgentState::start(&grid);
    assert_eq!(count_visited(&grid, initial), Ok(8));

    let found = find_loop_causing_obstructions(&grid, initial).expect("search");
    assert_eq!(found, HashSet::from([Position::new(0, 2)]));
    let trial = grid.with_obstacle_at(Position::new(0, 2)).expect("place");
    assert_eq!(run(&trial, initial, None), Ok(SimulationOutcome::Looped));
}

#[test]
fn malformed_inputs_fail_fast() {
    assert_eq!(Grid::parse("....\n...."), Err(PatrolError::NoStart));
    assert!(matches!(
        Grid::parse("^^"),
        Err(PatrolError::AmbiguousStart { .. })
    ));
    assert!(matches!(
        Grid::parse("^..\n.."),
        Err(PatrolError::RaggedGrid { row: 1, .. })
    ));
}
