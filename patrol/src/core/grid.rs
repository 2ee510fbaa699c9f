//! Immutable grid snapshot: dimensions, obstacle layout, and start marker.
//!
//! Grids are never mutated in place. Adding an obstacle produces a new value,
//! so the baseline grid stays valid while trials run against derived copies.

use crate::core::error::{PatrolError, PatrolResult};
use crate::core::state::Position;

const EMPTY: char = '.';
const OBSTACLE: char = '#';
const START: char = '^';

/// Classification of a coordinate relative to a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Obstacle,
    OutOfBounds,
}

/// Rectangular grid parsed from puzzle text.
///
/// The start cell is stored as [`Cell::Empty`]; its coordinate is kept
/// separately and returned by [`Grid::start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: Position,
}

impl Grid {
    /// Parse one row per line using `.` (empty), `#` (obstacle), `^` (start).
    ///
    /// Trailing whitespace and trailing blank lines are ignored.
    pub fn parse(text: &str) -> PatrolResult<Grid> {
        let mut rows: Vec<&str> = text.lines().map(str::trim_end).collect();
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }
        let Some(first) = rows.first() else {
            return Err(PatrolError::EmptyGrid);
        };
        let width = first.chars().count();
        if width == 0 {
            return Err(PatrolError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        let mut starts = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(PatrolError::RaggedGrid {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    EMPTY => Cell::Empty,
                    OBSTACLE => Cell::Obstacle,
                    START => {
                        starts.push(Position::new(x as i64, y as i64));
                        Cell::Empty
                    }
                    other => return Err(PatrolError::UnknownCell { x, y, ch: other }),
                };
                cells.push(cell);
            }
        }

        let start = find_start(starts)?;
        Ok(Grid {
            width,
            height: rows.len(),
            cells,
            start,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Coordinate of the start marker.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Number of distinct `(position, direction)` states on this grid.
    pub fn state_space(&self) -> usize {
        self.width * self.height * 4
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Cell::Obstacle).count()
    }

    /// Classify `at`; anything outside `0..width` x `0..height` is out of bounds.
    pub fn classify(&self, at: Position) -> Cell {
        match self.index(at) {
            Some(idx) => self.cells[idx],
            None => Cell::OutOfBounds,
        }
    }

    /// Return a copy of this grid with one extra obstacle at `at`.
    ///
    /// Only plain empty cells accept an obstacle; the start cell, existing
    /// obstacles, and out-of-bounds coordinates are rejected.
    pub fn with_obstacle_at(&self, at: Position) -> PatrolResult<Grid> {
        let idx = match self.index(at) {
            Some(idx) if at != self.start && self.cells[idx] == Cell::Empty => idx,
            _ => return Err(PatrolError::InvalidPlacement { at }),
        };
        let mut cells = self.cells.clone();
        cells[idx] = Cell::Obstacle;
        Ok(Grid {
            width: self.width,
            height: self.height,
            cells,
            start: self.start,
        })
    }

    /// Row-major iterator over cells that may receive an obstacle.
    ///
    /// Excludes the start coordinate and existing obstacles. The iterator
    /// borrows the grid and can be recreated any number of times.
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Position::new(x as i64, y as i64)))
            .filter(move |&at| at != self.start && self.classify(at) == Cell::Empty)
    }

    fn index(&self, at: Position) -> Option<usize> {
        let x = usize::try_from(at.x).ok()?;
        let y = usize::try_from(at.y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }
}

fn find_start(mut starts: Vec<Position>) -> PatrolResult<Position> {
    match starts.len() {
        0 => Err(PatrolError::NoStart),
        1 => Ok(starts.remove(0)),
        _ => Err(PatrolError::AmbiguousStart { found: starts }),
    }
}
