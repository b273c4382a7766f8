//! Memoir Core Library
//!
//! Sequential voice-memo engine: records short clips to contiguously
//! indexed WAV files, replays them newest-first as one completion-driven
//! chain, and deletes them all at once. Built on CPAL for capture, hound
//! for clip files, and rodio for playback.
//!
//! # Example
//!
//! ```no_run
//! use memoir_core::{MemoManager, TrackStore, CoreResult};
//!
//! use std::{path::PathBuf, thread::sleep, time::Duration};
//!
//! fn main() -> CoreResult<()> {
//!     let store = TrackStore::new(PathBuf::from("memory.toml"));
//!     let mut manager =
//!         MemoManager::new(store, PathBuf::from("clips"), None, Duration::from_secs(30))?;
//!
//!     let index = manager.start_recording()?;
//!     sleep(Duration::from_secs(3));
//!     manager.stop_recording()?;
//!     println!("Recorded clip {}", index);
//!
//!     let report = manager.start_playback()?;
//!     println!("Playing {} clips, newest first", report.clip_count);
//!     Ok(())
//! }
//! ```

mod audio;
mod clips;
mod error;
mod session;
mod store;

pub use {
    audio::{MemoManager, PlaybackStarted, SessionEvent, SkippedClip, microphone_available},
    clips::clip_path,
    error::{MemoError, Result as CoreResult},
    session::SessionState,
    store::TrackStore,
};

#[cfg(test)]
mod tests;
