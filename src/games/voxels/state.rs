//! Per-session game state.

use super::types::Voxel;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One player's attempt at one puzzle.
///
/// Serializes to exactly `puzzleId`, `remainingLives`, `startTime` (epoch
/// milliseconds) and `removed` (list of `[x, y, z]`).
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Puzzle this attempt belongs to.
    puzzle_id: String,
    /// Lives left. Not floored; goes negative if the player keeps missing.
    remaining_lives: i64,
    /// Void voxels carved so far.
    removed: BTreeSet<Voxel>,
    /// When the attempt started.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    start_time: DateTime<Utc>,
}

impl GameState {
    /// Creates a fresh attempt with no voxels removed.
    pub fn new(puzzle_id: impl Into<String>, lives: u32, start_time: DateTime<Utc>) -> Self {
        Self {
            puzzle_id: puzzle_id.into(),
            remaining_lives: i64::from(lives),
            removed: BTreeSet::new(),
            start_time,
        }
    }

    /// Whether `voxel` has already been carved.
    pub fn has_removed(&self, voxel: Voxel) -> bool {
        self.removed.contains(&voxel)
    }

    /// Deducts one life (unchecked - use `rules::submit` for validation).
    pub(super) fn lose_life(&mut self) {
        self.remaining_lives -= 1;
    }

    /// Records a carved voxel (unchecked - use `rules::submit` for validation).
    pub(super) fn record_removal(&mut self, voxel: Voxel) -> bool {
        self.removed.insert(voxel)
    }
}
