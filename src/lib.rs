//! Strictly Voxels library - a 3D nonogram carving game
//!
//! Players carve the void voxels out of a hidden shape one guess at a time,
//! guided by per-line clues, with a limited number of lives.
//!
//! # Architecture
//!
//! - **Games**: grid model, clue engine and carve rules (pure, no I/O)
//! - **Catalog**: read-only puzzle definitions, bundled or loaded from TOML
//! - **Session**: per-player game state storage with per-key locking
//! - **Service**: start/submit operations over catalog and store
//! - **HTTP**: axum router exposing the service
//!
//! # Example
//!
//! ```
//! use strictly_voxels::{PuzzleCatalog, Voxel, start_game, submit};
//!
//! let catalog = PuzzleCatalog::builtin();
//! let puzzle = catalog.get("1").expect("bundled puzzle");
//! let mut state = start_game(&puzzle);
//!
//! let result = submit(&mut state, &puzzle, Voxel::new(1, 0, 0)).expect("in bounds");
//! assert!(*result.success());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod catalog;
mod config;
mod games;
mod http;
mod service;
mod session;

// Crate-level exports - Catalog
pub use catalog::{CatalogError, PuzzleCatalog, PuzzleSummary};

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - HTTP API
pub use http::{ActionRequest, SESSION_HEADER, StartResponse, router};

// Crate-level exports - Service
pub use service::{PuzzleDetail, PuzzleService, ServiceError, SessionView};

// Crate-level exports - Session management
pub use session::{MemorySessionStore, SessionKey, SessionStore, StoreError};

// Crate-level exports - Game types
pub use games::voxels::{
    ActionError, ActionResult, Axis, Clue, GameState, Grid, PuzzleDefinition, PuzzleError, Split,
    Voxel, clues, is_complete, rules, start_game, submit, submit_at,
};
