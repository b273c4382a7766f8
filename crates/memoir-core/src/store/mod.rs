//! Persisted track index counter.
//!
//! One integer (`last_track`) in an application-private TOML file. `-1`
//! on disk is the sentinel for "no clips recorded yet"; the in-memory API
//! uses `Option<u32>` instead. Reads never fail: a missing or unreadable
//! file is logged and treated as the sentinel. Writes use the atomic
//! temp-file-then-rename pattern so the counter file can never be observed
//! half-written.

use crate::{MemoError, CoreResult};

use std::{fs, io::Write, panic::Location, path::{Path, PathBuf}};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Sentinel value persisted when no clips exist.
const EMPTY_SENTINEL: i64 = -1;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedCounter {
    last_track: i64,
}

/// Durable store for the highest allocated clip index.
///
/// Single-owner: no concurrency control. All mutation happens from the
/// application loop thread.
#[derive(Debug)]
pub struct TrackStore {
    path: PathBuf,
}

impl TrackStore {
    /// Create a store backed by the given file path. No IO is performed
    /// until the counter is read or written.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing counter file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted counter.
    ///
    /// Returns `None` when no counter has been recorded yet. Never fails:
    /// an unreadable or corrupt counter file is logged and read as empty.
    #[instrument(skip(self))]
    pub fn last_index(&self) -> Option<u32> {
        if !self.path.exists() {
            return None;
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Failed to read counter file, treating as empty");
                return None;
            }
        };

        let persisted: PersistedCounter = match toml::from_str(&contents) {
            Ok(p) => p,
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Corrupt counter file, treating as empty");
                return None;
            }
        };

        if persisted.last_track < 0 {
            None
        } else {
            Some(persisted.last_track as u32)
        }
    }

    /// Index the next recording should target.
    pub fn next_index(&self) -> u32 {
        self.last_index().map_or(0, |last| last + 1)
    }

    /// Persist the counter synchronously (`None` writes the sentinel).
    ///
    /// No range validation is performed; callers enforce contiguity of
    /// the clip index range.
    ///
    /// # Errors
    ///
    /// Returns error if the counter file cannot be written durably.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn set_last_index(&self, index: Option<u32>) -> CoreResult<()> {
        let persisted = PersistedCounter {
            last_track: index.map_or(EMPTY_SENTINEL, i64::from),
        };

        let contents = toml::to_string(&persisted).map_err(|e| MemoError::StoreError {
            reason: format!("Failed to serialize counter: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| MemoError::StoreError {
                reason: format!("Failed to create store directory: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
            debug!(dir = ?parent, "Created store directory");
        }

        // Atomic write: write to temp file then rename
        let temp_path = self.path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| MemoError::StoreError {
            reason: format!("Failed to create temp counter file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| MemoError::StoreError {
                reason: format!("Failed to write temp counter file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| MemoError::StoreError {
            reason: format!("Failed to sync temp counter file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &self.path).map_err(|e| MemoError::StoreError {
            reason: format!("Failed to rename temp counter to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(last_track = persisted.last_track, "Counter persisted (atomic write)");

        Ok(())
    }
}
