//! Tests for puzzle catalog loading.

use std::fs;
use strictly_voxels::{Grid, PuzzleCatalog, PuzzleDefinition, PuzzleSummary};
use tempfile::TempDir;

const TINY: &str = r#"
id = "tiny"
name = "Tiny"
author = "Tester"
starting_lives = 2
grid = [[[true, false]]]
"#;

fn write(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).expect("Failed to write puzzle file");
}

#[test]
fn test_builtin_has_intro_puzzle() {
    let catalog = PuzzleCatalog::builtin();
    let puzzle = catalog.get("1").expect("intro puzzle");
    assert_eq!(puzzle.name(), "Intro Puzzle");
    assert_eq!(puzzle.author(), "Admin");
    assert_eq!(puzzle.grid().dimensions(), (2, 2, 2));
    assert_eq!(*puzzle.starting_lives(), 5);
    assert_eq!(puzzle.grid().void_count(), 5);
}

#[test]
fn test_unknown_id_not_found() {
    assert!(PuzzleCatalog::builtin().get("nope").is_none());
}

#[test]
fn test_from_dir_loads_toml_files() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(&dir, "tiny.toml", TINY);
    write(
        &dir,
        "other.toml",
        r#"
id = "other"
name = "Other"
author = "Someone"
lives = 4
grid = [[[false]], [[true]]]
"#,
    );
    write(&dir, "notes.txt", "not a puzzle");

    let catalog = PuzzleCatalog::from_dir(dir.path()).expect("Failed to load catalog");
    assert_eq!(catalog.len(), 2);

    let other = catalog.get("other").expect("other puzzle");
    assert_eq!(other.grid().dimensions(), (1, 1, 2));
    assert_eq!(*other.starting_lives(), 4);

    assert_eq!(
        catalog.summaries(),
        vec![
            PuzzleSummary {
                id: "other".to_string(),
                name: "Other".to_string(),
                author: "Someone".to_string(),
            },
            PuzzleSummary {
                id: "tiny".to_string(),
                name: "Tiny".to_string(),
                author: "Tester".to_string(),
            },
        ]
    );
}

#[test]
fn test_bundled_puzzle_dir_loads() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("puzzles");
    let catalog = PuzzleCatalog::from_dir(dir).expect("Failed to load bundled puzzles");
    assert_eq!(
        catalog.get("1").as_deref(),
        PuzzleCatalog::builtin().get("1").as_deref()
    );
    assert!(catalog.get("arch").is_some());
}

#[test]
fn test_from_dir_rejects_invalid_grid() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(
        &dir,
        "solid.toml",
        r#"
id = "solid"
name = "Solid"
author = "Tester"
starting_lives = 1
grid = [[[true, true]]]
"#,
    );
    let err = PuzzleCatalog::from_dir(dir.path()).expect_err("all-solid puzzle should fail");
    assert!(err.message.contains("no void cells"), "{}", err);
}

#[test]
fn test_from_dir_rejects_malformed_toml() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(&dir, "broken.toml", "id = ");
    let err = PuzzleCatalog::from_dir(dir.path()).expect_err("broken file should fail");
    assert!(err.message.contains("Failed to parse"), "{}", err);
}

#[test]
fn test_duplicate_ids_rejected() {
    let make = || {
        let grid = Grid::from_layers(vec![vec![vec![false]]]).expect("valid grid");
        PuzzleDefinition::new("dup", "Dup", "Tester", grid, 1).expect("valid puzzle")
    };
    let err = PuzzleCatalog::new([make(), make()]).expect_err("duplicate ids should fail");
    assert!(err.message.contains("Duplicate puzzle id"));
}

#[test]
fn test_missing_dir_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let missing = dir.path().join("missing");
    assert!(PuzzleCatalog::from_dir(missing).is_err());
}
