//! Verse-of-the-day cycle tests against the file-backed pool store
//!
//! These tests drive the picker through whole cycles with the pool stored
//! on disk, covering the reset paths a user can hit between runs: first run,
//! finished cycle, hand-edited or corrupt pool files and catalog changes.

use std::collections::HashSet;
use std::fs;

use manna::{
    FilePoolStore, PickError, Picker, PoolState, PoolStore, ResetReason, VerseId, VotdCatalog,
};
use tempfile::tempdir;

fn small_catalog() -> VotdCatalog {
    VotdCatalog::from_json(
        r#"[
            {"id": 1, "book_code": "GEN", "chapter": 1, "verse_start": 1, "verse_end": 1},
            {"id": 2, "book_code": "GEN", "chapter": 1, "verse_start": 2, "verse_end": 3},
            {"id": 3, "book_code": "PSA", "chapter": 23, "verse_start": 1, "verse_end": 6},
            {"id": 4, "book_code": "JHN", "chapter": 3, "verse_start": 16, "verse_end": 16},
            {"id": 5, "book_code": "REV", "chapter": 21, "verse_start": 4, "verse_end": 4}
        ]"#,
    )
    .expect("catalog should parse")
}

fn stored_ids(path: &std::path::Path) -> Vec<u32> {
    let text = fs::read_to_string(path).expect("pool file should exist");
    serde_json::from_str(&text).expect("pool file should be a JSON array")
}

/// N picks over an N-entry catalog, one fresh picker per run, show every entry once
#[test]
fn test_full_cycle_across_runs_never_repeats() {
    let dir = tempdir().unwrap();
    let pool_path = dir.path().join("state").join("unused_ids.json");
    let catalog = small_catalog();

    let mut seen = HashSet::new();
    for run in 0..catalog.len() {
        let mut picker = Picker::with_seed(&catalog, FilePoolStore::new(&pool_path), run as u64);
        let pick = picker.draw().unwrap();

        let expected_state = if run == 0 {
            PoolState::Reset(ResetReason::Missing)
        } else {
            PoolState::Resumed
        };
        assert_eq!(pick.pool_state, expected_state, "run {run}");
        assert!(
            seen.insert(pick.reference.id),
            "{} was picked twice in one cycle",
            pick.reference.id
        );
        assert_eq!(pick.remaining, catalog.len() - run - 1);
        assert_eq!(stored_ids(&pool_path).len(), pick.remaining);
    }

    assert_eq!(seen.len(), catalog.len());
    assert_eq!(stored_ids(&pool_path), Vec::<u32>::new());

    // Pick N+1 starts a new cycle from the exhausted pool
    let mut picker = Picker::new(&catalog, FilePoolStore::new(&pool_path));
    let pick = picker.draw().unwrap();
    assert_eq!(pick.pool_state, PoolState::Reset(ResetReason::Exhausted));
    assert_eq!(pick.remaining, catalog.len() - 1);
}

#[test]
fn test_stored_pool_is_sorted_and_excludes_pick() {
    let dir = tempdir().unwrap();
    let pool_path = dir.path().join("unused_ids.json");
    fs::write(&pool_path, "[5, 3, 1]").unwrap();

    let catalog = small_catalog();
    let mut picker = Picker::with_seed(&catalog, FilePoolStore::new(&pool_path), 11);
    let pick = picker.draw().unwrap();

    assert_eq!(pick.pool_state, PoolState::Resumed);
    assert!([1, 3, 5].contains(&pick.reference.id.0));

    let mut expected: Vec<u32> = vec![1, 3, 5];
    expected.retain(|&id| id != pick.reference.id.0);
    assert_eq!(stored_ids(&pool_path), expected);
}

#[test]
fn test_stale_id_resets_to_full_catalog() {
    let dir = tempdir().unwrap();
    let pool_path = dir.path().join("unused_ids.json");
    // 42 was removed from the catalog since the pool was written
    fs::write(&pool_path, "[2, 42]").unwrap();

    let catalog = small_catalog();
    let mut picker = Picker::with_seed(&catalog, FilePoolStore::new(&pool_path), 5);
    let pick = picker.draw().unwrap();

    assert_eq!(
        pick.pool_state,
        PoolState::Reset(ResetReason::Stale(VerseId::new(42)))
    );
    assert_eq!(pick.remaining, catalog.len() - 1);
}

#[test]
fn test_corrupt_pool_files_reset() {
    let catalog = small_catalog();

    for contents in ["", "   ", "[1, 2", "{\"unused\": [1]}", "[\"1\"]", "null"] {
        let dir = tempdir().unwrap();
        let pool_path = dir.path().join("unused_ids.json");
        fs::write(&pool_path, contents).unwrap();

        let loaded = FilePoolStore::new(&pool_path)
            .load(&catalog.ids())
            .unwrap();
        assert_eq!(
            loaded.state,
            PoolState::Reset(ResetReason::Unparsable),
            "contents {contents:?}"
        );
        assert_eq!(loaded.pool.len(), catalog.len());
    }
}

#[test]
fn test_duplicate_ids_reset() {
    let dir = tempdir().unwrap();
    let pool_path = dir.path().join("unused_ids.json");
    fs::write(&pool_path, "[1, 4, 4]").unwrap();

    let catalog = small_catalog();
    let loaded = FilePoolStore::new(&pool_path)
        .load(&catalog.ids())
        .unwrap();
    assert_eq!(
        loaded.state,
        PoolState::Reset(ResetReason::Duplicate(VerseId::new(4)))
    );
    assert_eq!(loaded.pool.len(), catalog.len());
}

#[test]
fn test_unreadable_pool_is_an_error_not_a_reset() {
    let dir = tempdir().unwrap();
    // A directory where the pool file should be
    let pool_path = dir.path().join("unused_ids.json");
    fs::create_dir(&pool_path).unwrap();

    let catalog = small_catalog();
    let mut picker = Picker::with_seed(&catalog, FilePoolStore::new(&pool_path), 1);

    let err = picker.draw().unwrap_err();
    assert!(matches!(err, PickError::Load(_)), "got {err:?}");
    assert!(pool_path.is_dir(), "pool path must be left untouched");
}

#[test]
fn test_embedded_catalog_cycle() {
    let dir = tempdir().unwrap();
    let pool_path = dir.path().join("unused_ids.json");
    let catalog = VotdCatalog::load_embedded().unwrap();

    let mut picker = Picker::with_seed(&catalog, FilePoolStore::new(&pool_path), 2024);
    let mut seen = HashSet::new();
    for _ in 0..catalog.len() {
        let reference = picker.pick().unwrap();
        assert!(seen.insert(reference.id));
    }
    assert_eq!(seen.len(), catalog.len());
}
