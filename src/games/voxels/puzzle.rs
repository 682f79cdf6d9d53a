//! Immutable puzzle definitions.

use super::grid::Grid;
use super::rules::{Clue, clues};
use derive_getters::Getters;
use tracing::{debug, instrument};

/// A puzzle as loaded into the catalog. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PuzzleDefinition {
    /// Unique identifier.
    id: String,
    /// Display name.
    name: String,
    /// Puzzle author.
    author: String,
    /// Occupancy grid.
    grid: Grid,
    /// Lives granted when a game starts.
    starting_lives: u32,
}

impl PuzzleDefinition {
    /// Creates a validated puzzle definition.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError`] if the id is blank, no lives are granted, or
    /// the grid has no void cell to carve.
    #[instrument(skip_all, fields(dimensions = ?grid.dimensions(), starting_lives = starting_lives))]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        author: impl Into<String>,
        grid: Grid,
        starting_lives: u32,
    ) -> Result<Self, PuzzleError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PuzzleError::BlankId);
        }
        if starting_lives == 0 {
            return Err(PuzzleError::NoLives);
        }
        if grid.void_count() == 0 {
            return Err(PuzzleError::NoVoidCells);
        }

        debug!(puzzle_id = %id, voids = grid.void_count(), "Puzzle validated");
        Ok(Self {
            id,
            name: name.into(),
            author: author.into(),
            grid,
            starting_lives,
        })
    }

    /// Grid extent along x.
    pub fn size_x(&self) -> usize {
        self.grid.dimensions().0
    }

    /// Grid extent along y.
    pub fn size_y(&self) -> usize {
        self.grid.dimensions().1
    }

    /// Grid extent along z.
    pub fn size_z(&self) -> usize {
        self.grid.dimensions().2
    }

    /// Computes every line clue for this puzzle.
    pub fn clues(&self) -> Vec<Clue> {
        clues(&self.grid)
    }
}

/// Reasons a puzzle definition is rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PuzzleError {
    /// One of the grid dimensions is zero.
    #[display("Grid must have at least one cell along every axis")]
    EmptyGrid,

    /// A layer or row has the wrong length.
    #[display("Ragged grid at layer {z} (row {y:?}): expected length {expected}, found {found}")]
    Ragged {
        /// Layer index.
        z: usize,
        /// Row index, `None` when the layer itself has the wrong row count.
        y: Option<usize>,
        /// Length shared by the first layer or row.
        expected: usize,
        /// Length actually found.
        found: usize,
    },

    /// Every cell is solid, so the puzzle would be complete at start.
    #[display("Grid has no void cells to carve")]
    NoVoidCells,

    /// Starting lives must be positive.
    #[display("Starting lives must be positive")]
    NoLives,

    /// Puzzle id is empty or whitespace.
    #[display("Puzzle id must not be blank")]
    BlankId,
}

impl std::error::Error for PuzzleError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(layers: Vec<Vec<Vec<bool>>>) -> Grid {
        Grid::from_layers(layers).expect("valid grid")
    }

    #[test]
    fn test_sizes_follow_grid() {
        let puzzle = PuzzleDefinition::new(
            "p",
            "Name",
            "Author",
            grid(vec![vec![vec![true, false, true]; 2]; 4]),
            3,
        )
        .expect("valid puzzle");
        assert_eq!((puzzle.size_x(), puzzle.size_y(), puzzle.size_z()), (3, 2, 4));
        assert_eq!(*puzzle.starting_lives(), 3);
    }

    #[test]
    fn test_all_solid_rejected() {
        let result = PuzzleDefinition::new("p", "n", "a", grid(vec![vec![vec![true; 2]; 2]]), 3);
        assert_eq!(result, Err(PuzzleError::NoVoidCells));
    }

    #[test]
    fn test_zero_lives_rejected() {
        let result = PuzzleDefinition::new("p", "n", "a", grid(vec![vec![vec![false]]]), 0);
        assert_eq!(result, Err(PuzzleError::NoLives));
    }

    #[test]
    fn test_blank_id_rejected() {
        let result = PuzzleDefinition::new("  ", "n", "a", grid(vec![vec![vec![false]]]), 1);
        assert_eq!(result, Err(PuzzleError::BlankId));
    }
}
