//! Test-only grid fixtures.

use crate::core::grid::Grid;

/// Canonical 10x10 example: 41 visited cells, 6 loop-causing obstructions.
pub const SAMPLE_GRID: &str = "\
....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...
";

/// Agent fully enclosed by obstacles; it can only spin in place.
pub const BOXED_GRID: &str = "\
###
#^#
###
";

/// Parse a fixture that is known to be well formed.
pub fn grid(text: &str) -> Grid {
    Grid::parse(text).expect("fixture grid must parse")
}
