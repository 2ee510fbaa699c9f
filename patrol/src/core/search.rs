//! Obstruction search: which single added obstacle traps the agent.
//!
//! Each trial copies the base grid with one extra obstacle and walks it from
//! the same initial state. Trials share nothing but the read-only base grid,
//! so they can run on a rayon pool and be merged by set union.

use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::budget::check_deadline;
use crate::core::error::PatrolResult;
use crate::core::grid::{Cell, Grid};
use crate::core::simulator::{self, trace_path};
use crate::core::state::{AgentState, Position};

/// Which cells are tried as obstruction candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStrategy {
    /// Every empty cell except the start.
    Exhaustive,
    /// Only empty cells on the unobstructed escape path.
    ///
    /// An obstacle the agent never walks into cannot change its route, so
    /// this yields the same set as `Exhaustive`.
    #[default]
    OnPath,
}

/// Tuning knobs for [`search`].
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub strategy: CandidateStrategy,
    /// Run trials on the rayon global pool.
    pub parallel: bool,
    /// Abort with `DeadlineExceeded` once this instant passes.
    pub deadline: Option<Instant>,
    /// Per-trial step budget; `None` derives it from the grid size.
    pub step_budget: Option<usize>,
}

/// Loop-causing obstruction cells plus the number of trials simulated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub obstructions: BTreeSet<Position>,
    pub trials: usize,
}

/// Exhaustive, sequential search over every empty cell of `base`.
pub fn find_loop_causing_obstructions(
    base: &Grid,
    initial: AgentState,
) -> PatrolResult<HashSet<Position>> {
    let options = SearchOptions {
        strategy: CandidateStrategy::Exhaustive,
        ..SearchOptions::default()
    };
    let report = search(base, initial, &options)?;
    Ok(report.obstructions.into_iter().collect())
}

/// Run one trial per candidate cell and collect those that make the walk loop.
///
/// Any trial error aborts the whole search; a partial set is never returned.
pub fn search(
    base: &Grid,
    initial: AgentState,
    options: &SearchOptions,
) -> PatrolResult<SearchReport> {
    let candidates = candidates(base, initial, options)?;
    let total = candidates.len();
    debug!(
        strategy = ?options.strategy,
        parallel = options.parallel,
        candidates = total,
        "starting obstruction search"
    );

    let obstructions: BTreeSet<Position> = if options.parallel {
        let completed = AtomicUsize::new(0);
        candidates
            .par_iter()
            .map(|&at| -> PatrolResult<Option<Position>> {
                check_deadline(options.deadline, completed.load(Ordering::Relaxed), total)?;
                let looped = trial(base, initial, at, options.step_budget)?;
                completed.fetch_add(1, Ordering::Relaxed);
                Ok(looped.then_some(at))
            })
            .collect::<PatrolResult<Vec<Option<Position>>>>()?
            .into_iter()
            .flatten()
            .collect()
    } else {
        let mut found = BTreeSet::new();
        for (completed, &at) in candidates.iter().enumerate() {
            check_deadline(options.deadline, completed, total)?;
            if trial(base, initial, at, options.step_budget)? {
                found.insert(at);
            }
        }
        found
    };

    debug!(
        trials = total,
        obstructions = obstructions.len(),
        "obstruction search finished"
    );
    Ok(SearchReport {
        obstructions,
        trials: total,
    })
}

fn candidates(
    base: &Grid,
    initial: AgentState,
    options: &SearchOptions,
) -> PatrolResult<Vec<Position>> {
    if options.strategy == CandidateStrategy::OnPath {
        if let Some(path) = trace_path(base, initial, options.step_budget)? {
            let start = base.start();
            return Ok(path
                .into_iter()
                .filter(|&at| at != start && base.classify(at) == Cell::Empty)
                .collect());
        }
        debug!("baseline walk loops; falling back to exhaustive candidates");
    }
    Ok(base.empty_cells().collect())
}

fn trial(
    base: &Grid,
    initial: AgentState,
    at: Position,
    step_budget: Option<usize>,
) -> PatrolResult<bool> {
    let grid = base.with_obstacle_at(at)?;
    Ok(simulator::run(&grid, initial, step_budget)?.is_looped())
}
