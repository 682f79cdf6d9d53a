//! Puzzle service: runs game operations against the catalog and session store.

use crate::catalog::{PuzzleCatalog, PuzzleSummary};
use crate::games::voxels::{
    self, ActionError, ActionResult, Clue, GameState, PuzzleDefinition, Voxel,
};
use crate::session::{SessionStore, StoreError};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Full public view of a puzzle, with computed clues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleDetail {
    /// Puzzle id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Puzzle author.
    pub author: String,
    /// Grid extent along x.
    pub size_x: usize,
    /// Grid extent along y.
    pub size_y: usize,
    /// Grid extent along z.
    pub size_z: usize,
    /// Line clues for all three axes.
    pub clues: Vec<Clue>,
}

impl From<&PuzzleDefinition> for PuzzleDetail {
    fn from(puzzle: &PuzzleDefinition) -> Self {
        Self {
            id: puzzle.id().clone(),
            name: puzzle.name().clone(),
            author: puzzle.author().clone(),
            size_x: puzzle.size_x(),
            size_y: puzzle.size_y(),
            size_z: puzzle.size_z(),
            clues: puzzle.clues(),
        }
    }
}

/// Progress view of a session's current game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// Puzzle being played.
    pub puzzle_id: String,
    /// Lives left.
    pub remaining_lives: i64,
    /// Voxels carved so far.
    pub removed: usize,
    /// Void voxels in the puzzle.
    pub total_void: usize,
    /// Whether every void voxel has been carved.
    pub completed: bool,
}

/// Errors surfaced by the puzzle service.
#[derive(Debug, Clone, Display, From)]
pub enum ServiceError {
    /// Unknown puzzle id.
    #[display("Puzzle {_0:?} not found")]
    #[from(skip)]
    NotFound(String),

    /// The carve attempt was rejected by the game rules.
    #[display("{_0}")]
    Action(ActionError),

    /// No game is running for this session.
    #[display("No game in progress for this session")]
    #[from(skip)]
    NoSession,

    /// The session store failed; stored state is unchanged.
    #[display("{_0}")]
    Persistence(StoreError),
}

impl std::error::Error for ServiceError {}

/// Game operations over an injected catalog and session store.
#[derive(Debug, Clone)]
pub struct PuzzleService<S> {
    catalog: Arc<PuzzleCatalog>,
    store: S,
}

impl<S: SessionStore> PuzzleService<S> {
    /// Creates a service over `catalog` and `store`.
    pub fn new(catalog: Arc<PuzzleCatalog>, store: S) -> Self {
        Self { catalog, store }
    }

    /// The puzzle catalog.
    pub fn catalog(&self) -> &PuzzleCatalog {
        &self.catalog
    }

    /// The session store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Summaries of every puzzle.
    pub fn summaries(&self) -> Vec<PuzzleSummary> {
        self.catalog.summaries()
    }

    /// Puzzle detail with clues.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for an unknown id.
    #[instrument(skip(self))]
    pub fn detail(&self, puzzle_id: &str) -> Result<PuzzleDetail, ServiceError> {
        let puzzle = self.puzzle(puzzle_id)?;
        Ok(PuzzleDetail::from(puzzle.as_ref()))
    }

    /// Starts `puzzle_id` for the session, discarding any previous game.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for an unknown id and
    /// [`ServiceError::Persistence`] if the store fails.
    #[instrument(skip(self))]
    pub fn start_game(&self, session_key: &str, puzzle_id: &str) -> Result<GameState, ServiceError> {
        self.with_key_lock(session_key, || {
            let puzzle = self.puzzle(puzzle_id)?;
            self.store.destroy(session_key)?;
            let state = voxels::start_game(&puzzle);
            self.store.save(session_key, &state)?;

            info!(lives = state.remaining_lives(), "Game started");
            Ok(state)
        })
    }

    /// Submits a carve attempt for the session's current game.
    ///
    /// The whole load, validate and save cycle runs under the session's key
    /// lock. The validator works on a loaded copy, so a failed save leaves
    /// the stored state as it was.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::SessionMismatch`] when the session is not
    /// playing `puzzle_id` (or has no game), [`ServiceError::NotFound`] for
    /// an unknown puzzle, the validator's other [`ActionError`]s, and
    /// [`ServiceError::Persistence`] if the store fails.
    #[instrument(skip(self, voxel), fields(%voxel))]
    pub fn submit_action(
        &self,
        session_key: &str,
        puzzle_id: &str,
        voxel: Voxel,
    ) -> Result<ActionResult, ServiceError> {
        self.with_key_lock(session_key, || {
            let mut state = match self.store.load(session_key)? {
                Some(state) if state.puzzle_id() == puzzle_id => state,
                other => {
                    let expected = other.map(|s| s.puzzle_id().clone()).unwrap_or_default();
                    warn!(%expected, "Session mismatch");
                    return Err(ActionError::SessionMismatch {
                        expected,
                        found: puzzle_id.to_string(),
                    }
                    .into());
                }
            };

            let puzzle = self.puzzle(puzzle_id)?;
            let result = voxels::submit(&mut state, &puzzle, voxel)?;

            if let Err(e) = self.store.save(session_key, &state) {
                warn!(error = %e, "Failed to save session, discarding action");
                return Err(e.into());
            }

            debug!(success = result.success(), completed = result.completed(), "Action applied");
            Ok(result)
        })
    }

    /// Progress of the session's current game.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NoSession`] if no game is running,
    /// [`ServiceError::NotFound`] if its puzzle left the catalog, and
    /// [`ServiceError::Persistence`] if the store fails.
    #[instrument(skip(self))]
    pub fn session(&self, session_key: &str) -> Result<SessionView, ServiceError> {
        let state = self.store.load(session_key)?.ok_or(ServiceError::NoSession)?;
        let puzzle = self.puzzle(state.puzzle_id())?;
        Ok(SessionView {
            puzzle_id: state.puzzle_id().clone(),
            remaining_lives: *state.remaining_lives(),
            removed: state.removed().len(),
            total_void: puzzle.grid().void_count(),
            completed: voxels::is_complete(puzzle.grid(), state.removed()),
        })
    }

    /// Ends the session's current game, if any.
    ///
    /// Waits for any in-flight action on the session, so an abandoned game
    /// cannot be saved back afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Persistence`] if the store fails.
    #[instrument(skip(self))]
    pub fn abandon(&self, session_key: &str) -> Result<(), ServiceError> {
        self.with_key_lock(session_key, || {
            self.store.destroy(session_key)?;
            info!("Session abandoned");
            Ok(())
        })
    }

    /// Runs `f` while holding the session's key lock, then hands the lock
    /// back to the store so idle keys do not accumulate.
    fn with_key_lock<T>(
        &self,
        session_key: &str,
        f: impl FnOnce() -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let lock = self.store.key_lock(session_key)?;
        let result = match lock.lock() {
            Ok(_guard) => f(),
            Err(_) => Err(StoreError::new("Session lock poisoned").into()),
        };
        drop(lock);

        if let Err(e) = self.store.release_lock(session_key) {
            warn!(error = %e, "Failed to release session lock");
        }
        result
    }

    fn puzzle(&self, puzzle_id: &str) -> Result<Arc<PuzzleDefinition>, ServiceError> {
        self.catalog.get(puzzle_id).ok_or_else(|| {
            debug!(puzzle_id, "Puzzle not found");
            ServiceError::NotFound(puzzle_id.to_string())
        })
    }
}
