//! Game rules for voxel carving.
//!
//! Pure functions over a grid and a game state: clue derivation,
//! completion detection and the carve validator. Nothing here performs
//! I/O or locking.

pub mod carve;
pub mod clues;
pub mod completion;

pub use carve::{start_game, submit, submit_at};
pub use clues::{Clue, clues, line_clue};
pub use completion::is_complete;
