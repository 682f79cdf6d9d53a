//! Tests for the carve validator and completion check.

use chrono::{Duration, TimeZone, Utc};
use std::collections::BTreeSet;
use strictly_voxels::{
    ActionError, GameState, Grid, PuzzleDefinition, Voxel, is_complete, start_game, submit,
    submit_at,
};

/// 2x2x2 puzzle with voids at (1,0,0), (0,1,0), (0,0,1) and (1,1,1).
fn puzzle() -> PuzzleDefinition {
    let grid = Grid::from_layers(vec![
        vec![vec![true, false], vec![false, true]],
        vec![vec![false, true], vec![true, false]],
    ])
    .expect("valid grid");
    PuzzleDefinition::new("checker", "Checker", "Tester", grid, 5).expect("valid puzzle")
}

fn voids() -> Vec<Voxel> {
    vec![
        Voxel::new(1, 0, 0),
        Voxel::new(0, 1, 0),
        Voxel::new(0, 0, 1),
        Voxel::new(1, 1, 1),
    ]
}

#[test]
fn test_start_game_grants_starting_lives() {
    let state = start_game(&puzzle());
    assert_eq!(state.puzzle_id(), "checker");
    assert_eq!(*state.remaining_lives(), 5);
    assert!(state.removed().is_empty());
}

#[test]
fn test_out_of_bounds_leaves_state_unchanged() {
    let puzzle = puzzle();
    let mut state = start_game(&puzzle);
    for voxel in [
        Voxel::new(-1, 0, 0),
        Voxel::new(0, -1, 0),
        Voxel::new(0, 0, -1),
        Voxel::new(2, 0, 0),
        Voxel::new(0, 2, 0),
        Voxel::new(0, 0, 2),
        Voxel::new(i64::MAX, i64::MIN, 0),
    ] {
        let before = state.clone();
        let result = submit(&mut state, &puzzle, voxel);
        assert_eq!(result, Err(ActionError::OutOfBounds(voxel)));
        assert_eq!(state, before);
    }
}

#[test]
fn test_solid_voxel_costs_one_life() {
    let puzzle = puzzle();
    let mut state = start_game(&puzzle);
    for (i, voxel) in [Voxel::new(0, 0, 0), Voxel::new(1, 1, 0), Voxel::new(1, 0, 1)]
        .into_iter()
        .enumerate()
    {
        let result = submit(&mut state, &puzzle, voxel).expect("in bounds");
        assert!(!*result.success());
        assert!(!*result.completed());
        assert_eq!(*result.remaining_lives(), 4 - i as i64);
        assert_eq!(*state.remaining_lives(), 4 - i as i64);
        assert!(state.removed().is_empty());
    }
}

#[test]
fn test_lives_go_negative_without_halting_play() {
    let puzzle = puzzle();
    let mut state = start_game(&puzzle);
    for _ in 0..7 {
        submit(&mut state, &puzzle, Voxel::new(0, 0, 0)).expect("in bounds");
    }
    assert_eq!(*state.remaining_lives(), -2);

    let result = submit(&mut state, &puzzle, Voxel::new(1, 0, 0)).expect("in bounds");
    assert!(*result.success());
    assert_eq!(*result.remaining_lives(), -2);
}

#[test]
fn test_void_voxel_removed_once() {
    let puzzle = puzzle();
    let mut state = start_game(&puzzle);
    let voxel = Voxel::new(0, 1, 0);

    let result = submit(&mut state, &puzzle, voxel).expect("void voxel");
    assert!(*result.success());
    assert!(!*result.completed());
    assert_eq!(*result.completion_time_seconds(), None);
    assert_eq!(state.removed(), &BTreeSet::from([voxel]));
    assert_eq!(*state.remaining_lives(), 5);
}

#[test]
fn test_resubmitting_removed_voxel_is_rejected() {
    let puzzle = puzzle();
    let mut state = start_game(&puzzle);
    let voxel = Voxel::new(1, 0, 0);
    submit(&mut state, &puzzle, voxel).expect("void voxel");

    let before = state.clone();
    assert_eq!(
        submit(&mut state, &puzzle, voxel),
        Err(ActionError::AlreadyRemoved(voxel))
    );
    assert_eq!(state, before);
}

#[test]
fn test_mismatched_puzzle_is_rejected() {
    let puzzle = puzzle();
    let mut state = GameState::new("other", 3, Utc::now());
    let before = state.clone();
    let result = submit(&mut state, &puzzle, Voxel::new(1, 0, 0));
    assert!(matches!(result, Err(ActionError::SessionMismatch { .. })));
    assert_eq!(state, before);
}

#[test]
fn test_completion_reports_elapsed_seconds_once() {
    let puzzle = puzzle();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let mut state = GameState::new("checker", 5, start);
    let voids = voids();
    let (last, rest) = voids.split_last().expect("voids");

    for voxel in rest {
        let result = submit_at(&mut state, &puzzle, *voxel, start).expect("void voxel");
        assert!(!*result.completed());
    }

    let finish = start + Duration::milliseconds(42_900);
    let result = submit_at(&mut state, &puzzle, *last, finish).expect("void voxel");
    assert!(*result.success());
    assert!(*result.completed());
    assert_eq!(*result.completion_time_seconds(), Some(42));

    // Further guesses only hit solid or removed voxels and never re-report.
    let again = submit_at(&mut state, &puzzle, Voxel::new(0, 0, 0), finish).expect("in bounds");
    assert!(!*again.completed());
    assert_eq!(*again.completion_time_seconds(), None);
}

#[test]
fn test_completion_time_never_negative() {
    let puzzle = puzzle();
    let start = Utc::now();
    let mut state = GameState::new("checker", 5, start);
    let mut last = None;
    for voxel in voids() {
        last = Some(submit_at(&mut state, &puzzle, voxel, start - Duration::seconds(30)));
    }
    let result = last.expect("submitted").expect("void voxel");
    assert_eq!(*result.completion_time_seconds(), Some(0));
}

#[test]
fn test_is_complete_tracks_void_set() {
    let puzzle = puzzle();
    let mut removed = BTreeSet::new();
    for voxel in voids() {
        assert!(!is_complete(puzzle.grid(), &removed));
        removed.insert(voxel);
    }
    assert!(is_complete(puzzle.grid(), &removed));
}

#[test]
fn test_game_state_persisted_fields() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let puzzle = puzzle();
    let mut state = GameState::new("checker", 5, start);
    submit_at(&mut state, &puzzle, Voxel::new(0, 0, 1), start).expect("void voxel");

    let value = serde_json::to_value(&state).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "puzzleId": "checker",
            "remainingLives": 5,
            "removed": [[0, 0, 1]],
            "startTime": start.timestamp_millis(),
        })
    );
    let back: GameState = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, state);
}
