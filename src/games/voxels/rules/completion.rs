//! Completion detection.

use super::super::{Grid, Voxel};
use std::collections::BTreeSet;
use tracing::instrument;

/// Checks whether every void voxel of the grid has been removed.
///
/// Vacuously true for a grid without void cells.
#[instrument(skip_all, fields(removed = removed.len()))]
pub fn is_complete(grid: &Grid, removed: &BTreeSet<Voxel>) -> bool {
    grid.void_voxels().all(|voxel| removed.contains(&voxel))
}
