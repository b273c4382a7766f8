use crate::{
    MemoError, CoreResult, SessionState, TrackStore,
    audio::ClipRecorder,
    audio::playback::{PlaybackHandle, PlaybackPlan, SkippedClip},
    clips,
};

use std::{fs, panic::Location, path::PathBuf, time::{Duration, Instant}};

use error_location::ErrorLocation;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Report returned when a playback chain is started.
#[derive(Debug)]
pub struct PlaybackStarted {
    /// Session ID of the chain, for log correlation.
    pub session_id: Uuid,
    /// Number of clips enqueued (newest first).
    pub clip_count: usize,
    /// Clips excluded from the queue because preparation failed.
    pub skipped: Vec<SkippedClip>,
}

/// Session progress observed by [`MemoManager::poll`].
#[derive(Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A recording hit the duration cap and was finalized as this clip.
    ClipSaved(u32),
    /// The playback chain ended without playing anything.
    PlaybackFailed(String),
}

/// Orchestrates recording, playback, and deletion of memo clips.
///
/// Owns the track index store, the session state machine, and whichever
/// capture or playback resource is currently live. NOT thread-safe:
/// single-owner use from the application loop, with a periodic [`poll`]
/// observing cap auto-stop and playback completion.
///
/// [`poll`]: MemoManager::poll
pub struct MemoManager {
    store: TrackStore,
    clips_dir: PathBuf,
    input_device: Option<String>,
    max_clip: Duration,
    state: SessionState,
    recorder: Option<ClipRecorder>,
    playback: Option<PlaybackHandle>,
}

impl MemoManager {
    /// Create a manager over the given store and clips directory.
    ///
    /// # Errors
    ///
    /// Returns error if the clips directory cannot be created.
    #[track_caller]
    #[instrument(skip(store))]
    pub fn new(
        store: TrackStore,
        clips_dir: PathBuf,
        input_device: Option<String>,
        max_clip: Duration,
    ) -> CoreResult<Self> {
        fs::create_dir_all(&clips_dir).map_err(|e| MemoError::ClipIo {
            path: clips_dir.clone(),
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(clips_dir = ?clips_dir, max_clip_secs = max_clip.as_secs(), "MemoManager initialized");

        Ok(Self {
            store,
            clips_dir,
            input_device,
            max_clip,
            state: SessionState::Idle,
            recorder: None,
            playback: None,
        })
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Highest recorded clip index, or `None` when no clips exist.
    pub fn last_index(&self) -> Option<u32> {
        self.store.last_index()
    }

    /// Number of clips currently recorded.
    pub fn clip_count(&self) -> u32 {
        self.last_index().map_or(0, |last| last + 1)
    }

    /// Observe session progress: reaps a finished playback chain and
    /// finalizes a recording that hit the duration cap.
    ///
    /// Returns the event observed, if any: the saved clip index when a
    /// capped recording was finalized, or the failure reason when a
    /// playback chain died before playing.
    ///
    /// # Errors
    ///
    /// Returns error if finalizing a capped clip fails.
    #[instrument(skip(self))]
    pub fn poll(&mut self) -> CoreResult<Option<SessionEvent>> {
        if let Some(reason) = self.reap_finished_playback() {
            return Ok(Some(SessionEvent::PlaybackFailed(reason)));
        }

        if matches!(self.state, SessionState::Recording { .. })
            && self.recorder.as_ref().is_some_and(ClipRecorder::reached_cap)
        {
            info!(max_clip_secs = self.max_clip.as_secs(), "Duration cap reached, auto-stopping");
            return Ok(self.stop_recording()?.map(SessionEvent::ClipSaved));
        }

        Ok(None)
    }

    /// Start recording the next clip.
    ///
    /// The counter is persisted only after the capture stream has
    /// started; if persisting fails the stream is torn down, so a failed
    /// start can never reserve an index.
    ///
    /// # Errors
    ///
    /// Rejected while recording or playing; fails if the capture stream
    /// cannot be opened or the counter cannot be persisted.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn start_recording(&mut self) -> CoreResult<u32> {
        self.reap_finished_playback();
        self.state.ensure_can_record()?;

        let clip_index = self.store.next_index();

        let mut recorder = ClipRecorder::new(self.input_device.as_deref(), self.max_clip)?;
        recorder.start()?;

        if let Err(e) = self.store.set_last_index(Some(clip_index)) {
            // Roll back: tear the stream down so no index gap is reserved.
            let _ = recorder.stop();
            return Err(e);
        }

        let session_id = Uuid::new_v4();
        self.recorder = Some(recorder);
        self.state = SessionState::Recording {
            session_id,
            clip_index,
            started_at: Instant::now(),
        };

        info!(session_id = %session_id, clip_index, "Recording started");

        Ok(clip_index)
    }

    /// Stop the active recording and finalize its clip file.
    ///
    /// No-op safe: returns `Ok(None)` when no recording is active.
    ///
    /// # Errors
    ///
    /// Returns error if the capture stream or clip file cannot be
    /// finalized.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn stop_recording(&mut self) -> CoreResult<Option<u32>> {
        let SessionState::Recording {
            session_id,
            clip_index,
            started_at,
        } = self.state
        else {
            return Ok(None);
        };

        // The stream is released regardless of how finalization goes.
        self.state = SessionState::Idle;
        let Some(mut recorder) = self.recorder.take() else {
            warn!(session_id = %session_id, "Recording state without an active recorder");
            return Ok(None);
        };

        let samples = recorder.stop()?;
        let path = clips::clip_path(&self.clips_dir, clip_index);
        clips::write_clip(&path, &samples, recorder.sample_rate(), recorder.channels())?;

        info!(
            session_id = %session_id,
            clip_index,
            duration_ms = started_at.elapsed().as_millis() as u64,
            sample_count = samples.len(),
            "Clip recorded"
        );

        Ok(Some(clip_index))
    }

    /// Start the newest-first playback chain over all recorded clips.
    ///
    /// Clips whose preparation fails are excluded from the queue and
    /// returned in the report's skip list. A plan with no playable clips
    /// does not spawn a session; the report alone is returned.
    ///
    /// # Errors
    ///
    /// Rejected while recording or while another chain plays; rejected
    /// with [`MemoError::NothingToPlay`] when no clips exist (no clip
    /// handle is constructed in that case).
    #[track_caller]
    #[instrument(skip(self))]
    pub fn start_playback(&mut self) -> CoreResult<PlaybackStarted> {
        self.reap_finished_playback();
        self.state.ensure_can_play()?;

        let last_index = self.store.last_index().ok_or(MemoError::NothingToPlay {
            location: ErrorLocation::from(Location::caller()),
        })?;

        let plan = PlaybackPlan::prepare(&self.clips_dir, last_index);
        let session_id = Uuid::new_v4();

        if plan.clips.is_empty() {
            warn!(session_id = %session_id, skipped = plan.skipped.len(), "No playable clips, not starting a chain");
            return Ok(PlaybackStarted {
                session_id,
                clip_count: 0,
                skipped: plan.skipped,
            });
        }

        let clip_count = plan.clips.len();
        let handle = PlaybackHandle::spawn(session_id, plan.clips)?;

        self.playback = Some(handle);
        self.state = SessionState::Playing { session_id };

        info!(session_id = %session_id, clip_count, "Playback chain started (newest first)");

        Ok(PlaybackStarted {
            session_id,
            clip_count,
            skipped: plan.skipped,
        })
    }

    /// Delete every clip and reset the counter to empty.
    ///
    /// The counter reset commits first; file deletion is best-effort
    /// (failures are logged per file). A crash mid-loop can orphan files
    /// but never leaves the counter claiming deleted clips. Returns the
    /// number of files actually deleted; no-op on an empty store.
    ///
    /// # Errors
    ///
    /// Rejected while recording or playing; fails if the counter reset
    /// cannot be persisted.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn delete_all(&mut self) -> CoreResult<u32> {
        self.reap_finished_playback();
        self.state.ensure_can_delete()?;

        let Some(last_index) = self.store.last_index() else {
            return Ok(0);
        };

        // Counter first: once this commits, no clip is claimed.
        self.store.set_last_index(None)?;

        let mut deleted = 0;
        for index in 0..=last_index {
            let path = clips::clip_path(&self.clips_dir, index);
            match fs::remove_file(&path) {
                Ok(()) => deleted += 1,
                Err(e) => warn!(index, path = ?path, error = %e, "Failed to delete clip file"),
            }
        }

        info!(deleted, last_index, "All clips deleted, counter reset");

        Ok(deleted)
    }

    /// Transition back to Idle once the playback chain has drained.
    ///
    /// Returns the chain's failure reason if it ended without playing.
    fn reap_finished_playback(&mut self) -> Option<String> {
        if matches!(self.state, SessionState::Playing { .. })
            && self.playback.as_ref().is_some_and(|h| !h.is_active())
        {
            let failure = self.playback.take().and_then(|mut handle| {
                handle.finish();
                handle.take_failure()
            });
            self.state = SessionState::Idle;
            match &failure {
                Some(reason) => warn!(reason = %reason, "Playback session failed"),
                None => info!("Playback session ended"),
            }
            return failure;
        }
        None
    }

    #[cfg(test)]
    pub(crate) fn set_state_for_tests(&mut self, state: SessionState) {
        self.state = state;
    }

    #[cfg(test)]
    pub(crate) fn set_playback_for_tests(&mut self, handle: PlaybackHandle) {
        self.playback = Some(handle);
    }

    #[cfg(test)]
    pub(crate) fn store_for_tests(&self) -> &TrackStore {
        &self.store
    }
}
