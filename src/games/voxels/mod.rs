//! 3D nonogram carving: grid model, clue engine, game state and rules.

mod action;
mod grid;
mod puzzle;
mod state;
mod types;

pub mod rules;

pub use action::{ActionError, ActionResult};
pub use grid::Grid;
pub use puzzle::{PuzzleDefinition, PuzzleError};
pub use rules::{Clue, clues, is_complete, start_game, submit, submit_at};
pub use state::GameState;
pub use types::{Axis, Split, Voxel};
