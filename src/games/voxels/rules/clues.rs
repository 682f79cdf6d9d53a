//! Per-line clue derivation.

use super::super::{Axis, Grid, Split};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Clue for one grid line.
///
/// `coord1`/`coord2` are the fixed coordinates: `(y, z)` for X lines,
/// `(x, z)` for Y lines and `(x, y)` for Z lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clue {
    /// Axis the line runs along.
    axis: Axis,
    /// First fixed coordinate.
    coord1: usize,
    /// Second fixed coordinate.
    coord2: usize,
    /// Total solid cells on the line.
    count: usize,
    /// Split classification.
    split: Split,
}

/// Scores one line of cells, in order.
///
/// `count` is the total number of solid cells, not the longest run. `split`
/// advances on every void cell that follows at least one solid cell, so a
/// single solid cell followed by two voids already reads `Split3Plus`.
pub fn line_clue(cells: impl IntoIterator<Item = bool>) -> (usize, Split) {
    let mut count = 0;
    let mut split = Split::NoSplit;
    for solid in cells {
        if solid {
            count += 1;
        } else if count > 0 {
            split = split.advance();
        }
    }
    (count, split)
}

/// Computes clues for every line of the grid.
///
/// Emits all X lines (`y` outer, `z` inner), then Y lines (`x` outer, `z`
/// inner), then Z lines (`x` outer, `y` inner).
#[instrument(skip(grid), fields(dimensions = ?grid.dimensions()))]
pub fn clues(grid: &Grid) -> Vec<Clue> {
    let (size_x, size_y, size_z) = grid.dimensions();
    let plan = [
        (Axis::X, size_y, size_z),
        (Axis::Y, size_x, size_z),
        (Axis::Z, size_x, size_y),
    ];

    let mut clues = Vec::with_capacity(size_y * size_z + size_x * size_z + size_x * size_y);
    for (axis, outer, inner) in plan {
        for coord1 in 0..outer {
            for coord2 in 0..inner {
                let (count, split) = line_clue(grid.line(axis, coord1, coord2));
                clues.push(Clue {
                    axis,
                    coord1,
                    coord2,
                    count,
                    split,
                });
            }
        }
    }

    trace!(count = clues.len(), "Clues computed");
    clues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line() {
        assert_eq!(line_clue([false, false, false]), (0, Split::NoSplit));
    }

    #[test]
    fn test_leading_voids_do_not_split() {
        assert_eq!(line_clue([false, false, true, true]), (2, Split::NoSplit));
    }

    #[test]
    fn test_single_gap_between_runs() {
        assert_eq!(line_clue([true, false, true]), (2, Split::Split2));
    }

    #[test]
    fn test_trailing_voids_escalate_each_step() {
        assert_eq!(line_clue([true, false]), (1, Split::Split2));
        assert_eq!(line_clue([true, false, false]), (1, Split::Split3Plus));
    }

    #[test]
    fn test_split_saturates() {
        let cells = [true, false, true, false, true, false, false, true];
        assert_eq!(line_clue(cells), (4, Split::Split3Plus));
    }

    #[test]
    fn test_count_is_total_not_longest_run() {
        assert_eq!(line_clue([true, true, false, true]), (3, Split::Split2));
    }

    #[test]
    fn test_total_clue_count() {
        let grid = Grid::from_layers(vec![vec![vec![false; 4]; 3]; 2]).expect("valid grid");
        assert_eq!(clues(&grid).len(), 3 * 2 + 4 * 2 + 4 * 3);
    }

    #[test]
    fn test_fixed_coordinates_per_axis() {
        // Single solid cell at (x=1, y=0, z=1) in a 2x1x2 grid.
        let grid = Grid::from_layers(vec![vec![vec![false, false]], vec![vec![false, true]]])
            .expect("valid grid");
        let solid: Vec<_> = clues(&grid)
            .into_iter()
            .filter(|c| *c.count() > 0)
            .map(|c| (*c.axis(), *c.coord1(), *c.coord2()))
            .collect();
        assert_eq!(solid, vec![(Axis::X, 0, 1), (Axis::Y, 1, 1), (Axis::Z, 1, 0)]);
    }
}
