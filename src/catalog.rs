//! Read-only puzzle catalog.

use crate::games::voxels::{Grid, PuzzleDefinition};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Public listing entry for a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSummary {
    /// Puzzle id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Puzzle author.
    pub author: String,
}

/// On-disk puzzle format (one puzzle per TOML file).
#[derive(Debug, Clone, Deserialize)]
struct PuzzleFile {
    id: String,
    name: String,
    author: String,
    #[serde(alias = "lives")]
    starting_lives: u32,
    /// Layers indexed `[z][y][x]`.
    grid: Vec<Vec<Vec<bool>>>,
}

impl PuzzleFile {
    fn into_definition(self) -> Result<PuzzleDefinition, CatalogError> {
        let id = self.id;
        let grid = Grid::from_layers(self.grid)
            .map_err(|e| CatalogError::new(format!("Puzzle '{}': {}", id, e)))?;
        PuzzleDefinition::new(id.clone(), self.name, self.author, grid, self.starting_lives)
            .map_err(|e| CatalogError::new(format!("Puzzle '{}': {}", id, e)))
    }
}

/// Immutable map from puzzle id to definition.
///
/// Constructed once and shared behind an `Arc`; lookups need no locking.
#[derive(Debug, Clone, Default)]
pub struct PuzzleCatalog {
    puzzles: BTreeMap<String, Arc<PuzzleDefinition>>,
}

impl PuzzleCatalog {
    /// Builds a catalog from definitions.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if two definitions share an id.
    #[instrument(skip(puzzles))]
    pub fn new(puzzles: impl IntoIterator<Item = PuzzleDefinition>) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for puzzle in puzzles {
            let id = puzzle.id().clone();
            if map.insert(id.clone(), Arc::new(puzzle)).is_some() {
                warn!(puzzle_id = %id, "Duplicate puzzle id");
                return Err(CatalogError::new(format!("Duplicate puzzle id '{}'", id)));
            }
        }
        info!(count = map.len(), "Puzzle catalog built");
        Ok(Self { puzzles: map })
    }

    /// Catalog holding only the bundled introductory puzzle.
    pub fn builtin() -> Self {
        let mut puzzles = BTreeMap::new();
        puzzles.insert("1".to_string(), Arc::new(intro_puzzle()));
        Self { puzzles }
    }

    /// Loads every `*.toml` puzzle file in `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the directory or a file cannot be read,
    /// a file does not parse, a puzzle is invalid, or ids collide.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| {
            CatalogError::new(format!("Failed to read puzzle dir '{}': {}", dir.display(), e))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| CatalogError::new(format!("Failed to list puzzle dir: {}", e)))?
                .path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut puzzles = Vec::with_capacity(paths.len());
        for path in paths {
            debug!(path = %path.display(), "Loading puzzle file");
            let content = std::fs::read_to_string(&path).map_err(|e| {
                CatalogError::new(format!("Failed to read '{}': {}", path.display(), e))
            })?;
            let file: PuzzleFile = toml::from_str(&content).map_err(|e| {
                CatalogError::new(format!("Failed to parse '{}': {}", path.display(), e))
            })?;
            puzzles.push(file.into_definition()?);
        }

        Self::new(puzzles)
    }

    /// Looks up a puzzle by id.
    pub fn get(&self, id: &str) -> Option<Arc<PuzzleDefinition>> {
        self.puzzles.get(id).cloned()
    }

    /// All puzzles, ordered by id.
    pub fn list(&self) -> impl Iterator<Item = &Arc<PuzzleDefinition>> {
        self.puzzles.values()
    }

    /// Summaries of all puzzles, ordered by id.
    pub fn summaries(&self) -> Vec<PuzzleSummary> {
        self.list()
            .map(|p| PuzzleSummary {
                id: p.id().clone(),
                name: p.name().clone(),
                author: p.author().clone(),
            })
            .collect()
    }

    /// Number of puzzles.
    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    /// Whether the catalog holds no puzzles.
    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }
}

fn intro_puzzle() -> PuzzleDefinition {
    let layers = vec![
        vec![vec![true, false], vec![false, false]],
        vec![vec![false, false], vec![true, true]],
    ];
    match Grid::from_layers(layers).and_then(|grid| {
        PuzzleDefinition::new("1", "Intro Puzzle", "Admin", grid, 5)
    }) {
        Ok(puzzle) => puzzle,
        Err(e) => unreachable!("bundled intro puzzle is valid: {}", e),
    }
}

/// Catalog loading error.
#[derive(Debug, Clone, Display, Error)]
#[display("Catalog error: {} at {}:{}", message, file, line)]
pub struct CatalogError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl CatalogError {
    /// Creates a new catalog error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
