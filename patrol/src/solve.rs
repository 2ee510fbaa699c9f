//! Orchestration for `patrol solve` and `patrol validate`.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use tracing::{debug, info};

use crate::core::error::{PatrolError, PatrolResult};
use crate::core::grid::Grid;
use crate::core::search::search;
use crate::core::simulator::{self, SimulationOutcome};
use crate::core::state::{AgentState, Position};
use crate::io::config::PatrolConfig;

/// Which answers to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Part {
    /// Distinct cells visited on the unobstructed walk.
    A,
    /// Cells where one added obstacle traps the agent.
    B,
    /// Both answers.
    #[default]
    Both,
}

impl Part {
    fn wants_a(self) -> bool {
        matches!(self, Part::A | Part::Both)
    }

    fn wants_b(self) -> bool {
        matches!(self, Part::B | Part::Both)
    }
}

/// Puzzle answers; parts that were not requested are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Answers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_a: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_b: Option<usize>,
}

/// Shape of a parsed grid, reported by `patrol validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridSummary {
    pub width: usize,
    pub height: usize,
    pub start: Position,
    pub obstacles: usize,
}

/// Count distinct cells visited before the agent leaves `grid`.
///
/// Fails with [`PatrolError::UnexpectedLoop`] if the walk never escapes.
pub fn count_visited(grid: &Grid, initial: AgentState) -> PatrolResult<usize> {
    count_visited_within(grid, initial, None)
}

fn count_visited_within(
    grid: &Grid,
    initial: AgentState,
    step_budget: Option<usize>,
) -> PatrolResult<usize> {
    match simulator::run(grid, initial, step_budget)? {
        SimulationOutcome::Escaped { visited } => Ok(visited.len()),
        SimulationOutcome::Looped => Err(PatrolError::UnexpectedLoop),
    }
}

/// Parse `text` once and compute the requested answers.
pub fn solve(text: &str, part: Part, cfg: &PatrolConfig) -> Result<Answers> {
    let grid = Grid::parse(text).context("parse grid")?;
    info!(
        width = grid.width(),
        height = grid.height(),
        start = %grid.start(),
        "grid parsed"
    );
    let initial = AgentState::start(&grid);
    let mut answers = Answers::default();

    if part.wants_a() {
        let started = Instant::now();
        let visited = count_visited_within(&grid, initial, cfg.simulator.step_budget)
            .context("count visited cells")?;
        debug!(visited, elapsed = ?started.elapsed(), "part a done");
        answers.part_a = Some(visited);
    }

    if part.wants_b() {
        let started = Instant::now();
        let report =
            search(&grid, initial, &cfg.search_options()).context("search obstructions")?;
        debug!(
            obstructions = report.obstructions.len(),
            trials = report.trials,
            elapsed = ?started.elapsed(),
            "part b done"
        );
        answers.part_b = Some(report.obstructions.len());
    }

    Ok(answers)
}

/// Parse `text` and summarize the grid without simulating.
pub fn summarize(text: &str) -> Result<GridSummary> {
    let grid = Grid::parse(text).context("parse grid")?;
    Ok(GridSummary {
        width: grid.width(),
        height: grid.height(),
        start: grid.start(),
        obstacles: grid.obstacle_count(),
    })
}
