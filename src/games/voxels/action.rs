//! Outcomes of a single carve attempt.

use super::types::Voxel;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Result reported to the player after a carve attempt.
///
/// A miss on a solid voxel is a normal outcome (`success == false`), not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    /// Whether the voxel was void and got carved.
    success: bool,
    /// Lives left after this action.
    remaining_lives: i64,
    /// Whether every void voxel has now been carved.
    completed: bool,
    /// Whole seconds since the game started, only on the completing action.
    #[serde(rename = "completionTime", skip_serializing_if = "Option::is_none", default)]
    completion_time_seconds: Option<u64>,
}

impl ActionResult {
    pub(super) fn miss(remaining_lives: i64) -> Self {
        Self {
            success: false,
            remaining_lives,
            completed: false,
            completion_time_seconds: None,
        }
    }

    pub(super) fn carved(remaining_lives: i64, completion_time_seconds: Option<u64>) -> Self {
        Self {
            success: true,
            remaining_lives,
            completed: completion_time_seconds.is_some(),
            completion_time_seconds,
        }
    }
}

/// Rejected carve attempts. None of these change the game state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ActionError {
    /// The game state belongs to a different puzzle.
    #[display("Session mismatch: game is for puzzle {expected:?}, action targets {found:?}")]
    SessionMismatch {
        /// Puzzle the session is playing.
        expected: String,
        /// Puzzle the action was submitted against.
        found: String,
    },

    /// The voxel was carved by an earlier action.
    #[display("Voxel {_0} already removed")]
    AlreadyRemoved(Voxel),

    /// The voxel lies outside the grid.
    #[display("Voxel {_0} is out of bounds")]
    OutOfBounds(Voxel),
}

impl std::error::Error for ActionError {}
