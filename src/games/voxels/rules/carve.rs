//! Carve validation: turns one coordinate guess into an outcome.

use super::super::{ActionError, ActionResult, GameState, PuzzleDefinition, Voxel};
use super::completion::is_complete;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

/// Starts a new attempt at `puzzle` with its full allowance of lives.
#[instrument(skip(puzzle), fields(puzzle_id = %puzzle.id()))]
pub fn start_game(puzzle: &PuzzleDefinition) -> GameState {
    info!(lives = puzzle.starting_lives(), "Starting game");
    GameState::new(puzzle.id().clone(), *puzzle.starting_lives(), Utc::now())
}

/// Submits a carve attempt, timing completion against the system clock.
///
/// See [`submit_at`].
pub fn submit(
    state: &mut GameState,
    puzzle: &PuzzleDefinition,
    voxel: Voxel,
) -> Result<ActionResult, ActionError> {
    submit_at(state, puzzle, voxel, Utc::now())
}

/// Submits a carve attempt at time `now`.
///
/// Checks run in order: puzzle match, already removed, bounds, solidity.
/// A solid voxel costs one life and is reported as `success == false`;
/// lives are never floored and play is never halted. A void voxel is
/// recorded, and if it was the last one the elapsed whole seconds since
/// `state.start_time()` are reported.
///
/// # Errors
///
/// Returns [`ActionError`] for mismatched puzzles, repeated voxels and
/// out-of-bounds voxels. The state is left untouched in every error case.
#[instrument(skip_all, fields(puzzle_id = %puzzle.id(), %voxel))]
pub fn submit_at(
    state: &mut GameState,
    puzzle: &PuzzleDefinition,
    voxel: Voxel,
    now: DateTime<Utc>,
) -> Result<ActionResult, ActionError> {
    if state.puzzle_id() != puzzle.id() {
        return Err(ActionError::SessionMismatch {
            expected: state.puzzle_id().clone(),
            found: puzzle.id().clone(),
        });
    }

    if state.has_removed(voxel) {
        debug!("Voxel already removed");
        return Err(ActionError::AlreadyRemoved(voxel));
    }

    let solid = puzzle
        .grid()
        .is_solid(voxel)
        .ok_or(ActionError::OutOfBounds(voxel))?;

    if solid {
        state.lose_life();
        info!(remaining_lives = state.remaining_lives(), "Incorrect voxel");
        return Ok(ActionResult::miss(*state.remaining_lives()));
    }

    state.record_removal(voxel);

    if !is_complete(puzzle.grid(), state.removed()) {
        debug!(removed = state.removed().len(), "Voxel carved");
        return Ok(ActionResult::carved(*state.remaining_lives(), None));
    }

    let elapsed = (now - *state.start_time()).num_seconds().max(0) as u64;
    info!(elapsed_seconds = elapsed, "Puzzle completed");
    Ok(ActionResult::carved(*state.remaining_lives(), Some(elapsed)))
}
