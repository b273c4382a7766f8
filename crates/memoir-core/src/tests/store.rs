use crate::TrackStore;

use std::fs;

/// WHAT: A fresh store reads as empty
/// WHY: First use must default to the sentinel without any IO failure
#[test]
fn given_no_counter_file_when_reading_then_sentinel() {
    // Given: A store whose backing file does not exist
    let dir = tempfile::tempdir().unwrap();
    let store = TrackStore::new(dir.path().join("memory.toml"));

    // When/Then: The counter reads empty and the next index is 0
    assert_eq!(store.last_index(), None);
    assert_eq!(store.next_index(), 0);
}

/// WHAT: Persisted counter round-trips
/// WHY: Recording start depends on durable, exact index allocation
#[test]
fn given_persisted_index_when_reading_then_round_trips() {
    // Given: A store with index 4 persisted
    let dir = tempfile::tempdir().unwrap();
    let store = TrackStore::new(dir.path().join("memory.toml"));
    store.set_last_index(Some(4)).unwrap();

    // When/Then: The counter reads back and the next index follows it
    assert_eq!(store.last_index(), Some(4));
    assert_eq!(store.next_index(), 5);
}

/// WHAT: Writing the sentinel resets the store to empty
/// WHY: Delete-all must leave the store claiming zero clips
#[test]
fn given_sentinel_write_when_reading_then_empty() {
    // Given: A store with a real index persisted
    let dir = tempfile::tempdir().unwrap();
    let store = TrackStore::new(dir.path().join("memory.toml"));
    store.set_last_index(Some(2)).unwrap();

    // When: Resetting to the sentinel
    store.set_last_index(None).unwrap();

    // Then: The store reads empty
    assert_eq!(store.last_index(), None);
    assert_eq!(store.next_index(), 0);
}

/// WHAT: A corrupt counter file reads as empty
/// WHY: Reads never fail; corruption is logged and treated as sentinel
#[test]
fn given_corrupt_file_when_reading_then_treated_as_empty() {
    // Given: A counter file containing garbage
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memory.toml");
    fs::write(&path, "not = [valid").unwrap();
    let store = TrackStore::new(path);

    // When/Then: The counter reads empty rather than erroring
    assert_eq!(store.last_index(), None);
}

/// WHAT: Persisting creates missing parent directories
/// WHY: First run starts from a clean data directory
#[test]
fn given_missing_parent_dir_when_persisting_then_created() {
    // Given: A store path under a directory that does not exist yet
    let dir = tempfile::tempdir().unwrap();
    let store = TrackStore::new(dir.path().join("nested").join("memory.toml"));

    // When: Persisting an index
    store.set_last_index(Some(0)).unwrap();

    // Then: The file exists and reads back
    assert!(store.path().exists());
    assert_eq!(store.last_index(), Some(0));
}
