//! Session storage for per-player game state.

use crate::games::voxels::GameState;
use derive_more::{Display, Error};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument, warn};

/// Opaque key identifying one player session.
pub type SessionKey = String;

/// Storage backend for game state, keyed by session.
///
/// Callers serialize load-modify-save cycles on one key by holding the lock
/// returned from [`SessionStore::key_lock`] for the whole cycle, then call
/// [`SessionStore::release_lock`] after dropping it.
pub trait SessionStore: Send + Sync {
    /// Loads the state stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<GameState>, StoreError>;

    /// Stores `state` under `key`, replacing any previous state.
    fn save(&self, key: &str, state: &GameState) -> Result<(), StoreError>;

    /// Removes any state stored under `key`.
    fn destroy(&self, key: &str) -> Result<(), StoreError>;

    /// Returns the mutex guarding read-modify-write cycles on `key`.
    fn key_lock(&self, key: &str) -> Result<Arc<Mutex<()>>, StoreError>;

    /// Called once the caller has dropped its handle from [`SessionStore::key_lock`].
    ///
    /// Stores that track locks per key drop the entry here when nobody else
    /// holds it.
    fn release_lock(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

/// In-process session store.
///
/// States are kept in their serialized JSON form so every save and load goes
/// through the persisted field set. An optional capacity bounds the number
/// of live sessions; saving a new key past it fails.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionKey, String>>>,
    locks: Arc<Mutex<HashMap<SessionKey, Arc<Mutex<()>>>>>,
    max_sessions: Option<usize>,
}

impl MemorySessionStore {
    /// Creates an unbounded store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory session store");
        Self::default()
    }

    /// Creates a store holding at most `max_sessions` sessions.
    #[instrument]
    pub fn with_capacity_limit(max_sessions: usize) -> Self {
        info!(max_sessions, "Creating bounded in-memory session store");
        Self {
            max_sessions: Some(max_sessions),
            ..Self::default()
        }
    }

    /// Number of stored sessions.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.sessions.lock().map_err(StoreError::poisoned)?.len())
    }

    /// Whether no sessions are stored.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Number of keys with a live lock entry.
    pub fn lock_count(&self) -> Result<usize, StoreError> {
        Ok(self.locks.lock().map_err(StoreError::poisoned)?.len())
    }
}

impl SessionStore for MemorySessionStore {
    #[instrument(skip(self))]
    fn load(&self, key: &str) -> Result<Option<GameState>, StoreError> {
        let sessions = self.sessions.lock().map_err(StoreError::poisoned)?;
        let Some(raw) = sessions.get(key) else {
            debug!("Session not found");
            return Ok(None);
        };
        let state = serde_json::from_str(raw)
            .map_err(|e| StoreError::new(format!("Corrupt session '{}': {}", key, e)))?;
        Ok(Some(state))
    }

    #[instrument(skip(self, state), fields(puzzle_id = %state.puzzle_id()))]
    fn save(&self, key: &str, state: &GameState) -> Result<(), StoreError> {
        let raw = serde_json::to_string(state)
            .map_err(|e| StoreError::new(format!("Failed to encode session '{}': {}", key, e)))?;

        let mut sessions = self.sessions.lock().map_err(StoreError::poisoned)?;
        if let Some(max) = self.max_sessions
            && !sessions.contains_key(key)
            && sessions.len() >= max
        {
            warn!(max, "Session store full");
            return Err(StoreError::new(format!(
                "Session store full ({} sessions)",
                max
            )));
        }
        sessions.insert(key.to_string(), raw);
        debug!("Session saved");
        Ok(())
    }

    #[instrument(skip(self))]
    fn destroy(&self, key: &str) -> Result<(), StoreError> {
        let removed = self
            .sessions
            .lock()
            .map_err(StoreError::poisoned)?
            .remove(key)
            .is_some();
        debug!(removed, "Session destroyed");
        Ok(())
    }

    fn key_lock(&self, key: &str) -> Result<Arc<Mutex<()>>, StoreError> {
        let mut locks = self.locks.lock().map_err(StoreError::poisoned)?;
        Ok(Arc::clone(locks.entry(key.to_string()).or_default()))
    }

    fn release_lock(&self, key: &str) -> Result<(), StoreError> {
        let mut locks = self.locks.lock().map_err(StoreError::poisoned)?;
        // Handles are only cloned under this table lock, so a count of one
        // means no caller holds or waits on the entry.
        if locks.get(key).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(key);
        }
        Ok(())
    }
}

/// Session storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Session store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    #[track_caller]
    fn poisoned<T>(_: std::sync::PoisonError<T>) -> Self {
        Self::new("Session store lock poisoned")
    }
}
