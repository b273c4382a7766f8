//! Newest-first playback chain.
//!
//! Playback is a plan-then-drive pipeline: decoders for every clip are
//! prepared eagerly (newest index first) before anything plays, and clips
//! whose preparation fails are reported back to the caller instead of
//! being enqueued. The prepared queue is then driven to completion on a
//! dedicated thread, one clip at a time, each released as soon as it
//! finishes.

use crate::{MemoError, CoreResult, clips};

use std::{
    fs::File,
    io::BufReader,
    panic::Location,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    thread::JoinHandle,
};

use error_location::ErrorLocation;
use rodio::{Decoder, OutputStreamBuilder, Sink};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// A clip that could not be prepared for playback.
///
/// Surfaced to the caller rather than enqueued; the chain only ever plays
/// clips that decoded successfully.
#[derive(Debug)]
pub struct SkippedClip {
    /// Index of the unplayable clip.
    pub index: u32,
    /// Path of the clip file.
    pub path: PathBuf,
    /// Why preparation failed.
    pub reason: String,
}

/// A clip decoder ready to be appended to the output.
pub(crate) struct PreparedClip {
    pub(crate) index: u32,
    decoder: Decoder<BufReader<File>>,
}

/// Ordered playback queue (newest index first) plus its skip report.
pub(crate) struct PlaybackPlan {
    pub(crate) clips: Vec<PreparedClip>,
    pub(crate) skipped: Vec<SkippedClip>,
}

impl PlaybackPlan {
    /// Eagerly prepare decoders for indices `last_index` down to `0`.
    #[instrument]
    pub(crate) fn prepare(clips_dir: &Path, last_index: u32) -> Self {
        let mut clips = Vec::with_capacity(last_index as usize + 1);
        let mut skipped = Vec::new();

        for index in (0..=last_index).rev() {
            let path = clips::clip_path(clips_dir, index);
            match prepare_decoder(&path) {
                Ok(decoder) => clips.push(PreparedClip { index, decoder }),
                Err(reason) => {
                    warn!(index, path = ?path, reason = %reason, "Clip skipped: preparation failed");
                    skipped.push(SkippedClip {
                        index,
                        path,
                        reason,
                    });
                }
            }
        }

        debug!(
            prepared = clips.len(),
            skipped = skipped.len(),
            "Playback plan prepared"
        );

        Self { clips, skipped }
    }
}

fn prepare_decoder(path: &Path) -> Result<Decoder<BufReader<File>>, String> {
    let file = File::open(path).map_err(|e| format!("Failed to open clip: {}", e))?;
    Decoder::new(BufReader::new(file)).map_err(|e| format!("Failed to decode clip: {}", e))
}

/// Handle to a running playback chain.
///
/// The chain itself owns the output stream and runs on its own thread;
/// the handle only exposes completion (via the shared `active` flag) and
/// a best-effort join.
pub(crate) struct PlaybackHandle {
    active: Arc<AtomicBool>,
    /// Set by the chain thread when playback ended without playing
    /// (e.g. the output stream could not be opened), so the owner can
    /// surface the failure instead of silently returning to Idle.
    failure: Arc<Mutex<Option<String>>>,
    join: Option<JoinHandle<()>>,
}

impl PlaybackHandle {
    /// Spawn the chain thread for a prepared queue.
    ///
    /// # Errors
    ///
    /// Returns error if the playback thread cannot be spawned.
    #[track_caller]
    pub(crate) fn spawn(session_id: Uuid, clips: Vec<PreparedClip>) -> CoreResult<Self> {
        let active = Arc::new(AtomicBool::new(true));
        let failure = Arc::new(Mutex::new(None));
        let flag = Arc::clone(&active);
        let failure_slot = Arc::clone(&failure);

        let join = std::thread::Builder::new()
            .name("memoir-playback".into())
            .spawn(move || {
                if let Err(reason) = run_chain(session_id, clips) {
                    error!(session_id = %session_id, reason = %reason, "Playback chain failed");
                    // Recover from lock poison; the slot is a plain Option.
                    *failure_slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(reason);
                }
                flag.store(false, Ordering::Release);
            })
            .map_err(|e| MemoError::PlaybackThread {
                reason: format!("Failed to spawn playback thread: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            active,
            failure,
            join: Some(join),
        })
    }

    /// Whether the chain is still playing.
    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Join the finished chain thread (best-effort).
    pub(crate) fn finish(&mut self) {
        if let Some(join) = self.join.take()
            && join.join().is_err()
        {
            error!("Playback thread panicked");
        }
    }

    /// Take the chain's failure reason, if it ended without playing.
    pub(crate) fn take_failure(&mut self) -> Option<String> {
        self.failure.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    #[cfg(test)]
    pub(crate) fn failed_for_tests(reason: &str) -> Self {
        Self {
            active: Arc::new(AtomicBool::new(false)),
            failure: Arc::new(Mutex::new(Some(reason.to_string()))),
            join: None,
        }
    }
}

/// Drive the queue to completion, newest clip first, back-to-back.
///
/// Each clip's resources are released as soon as its sink drains; the
/// next clip starts immediately after. Cancellation is not supported:
/// once started the chain runs until the queue empties or the process
/// tears down. Returns the failure reason if nothing could play.
#[instrument(skip(clips))]
fn run_chain(session_id: Uuid, clips: Vec<PreparedClip>) -> Result<(), String> {
    let stream = OutputStreamBuilder::open_default_stream()
        .map_err(|e| format!("Failed to open audio output: {}", e))?;

    let clip_count = clips.len();
    for clip in clips {
        debug!(session_id = %session_id, index = clip.index, "Playing clip");
        let sink = Sink::connect_new(stream.mixer());
        sink.append(clip.decoder);
        // Completion event: returns once the sink drains, releasing the
        // decoder before the next clip starts.
        sink.sleep_until_end();
    }

    info!(session_id = %session_id, clip_count, "Playback chain complete");
    Ok(())
}
