use crate::{AppCommand, AppResult};

use std::time::Duration;

use memoir_core::{MemoError, MemoManager, SessionEvent, SessionState};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, instrument};

/// How often session progress is observed (cap auto-stop, chain end).
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Main application state.
///
/// Owns the memo manager exclusively; every mutation happens on this
/// loop, serialized by the `select!` dispatch. Completion of background
/// sessions is observed through the periodic poll tick rather than
/// callbacks, so no two handlers ever interleave.
pub struct App {
    pub(crate) manager: MemoManager,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) max_clip_secs: u64,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Memoir starting");
        println!(
            "Memoir - {} clip(s) recorded. Commands: record, listen, delete, status, quit.",
            self.manager.clip_count()
        );

        let mut tick = tokio::time::interval(POLL_INTERVAL);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    match cmd {
                        AppCommand::ToggleRecording => self.toggle_recording(),
                        AppCommand::StartPlayback => self.start_playback(),
                        AppCommand::DeleteAll => self.delete_all(),
                        AppCommand::ShowStatus => self.show_status(),
                        AppCommand::Shutdown => {
                            info!("Shutdown requested");
                            break;
                        }
                    }
                }

                _ = tick.tick() => self.poll_sessions(),

                else => {
                    info!("Command channel closed, shutting down");
                    break;
                }
            }
        }

        // An active recording is saved rather than discarded on quit.
        match self.manager.stop_recording() {
            Ok(Some(index)) => println!("Saved clip {} before exit.", index),
            Ok(None) => {}
            Err(e) => error!(error = ?e, "Failed to finalize clip on shutdown"),
        }

        info!("Memoir shut down successfully");

        Ok(())
    }

    /// Record button analog: start when idle, stop and save when active.
    fn toggle_recording(&mut self) {
        if matches!(self.manager.state(), SessionState::Recording { .. }) {
            match self.manager.stop_recording() {
                Ok(Some(index)) => println!("Saved clip {}.", index),
                Ok(None) => {}
                Err(e) => {
                    error!(error = ?e, "Failed to stop recording");
                    println!("Could not save the clip; see log for details.");
                }
            }
            return;
        }

        match self.manager.start_recording() {
            Ok(index) => println!(
                "Recording clip {} (up to {}s). Type `record` again to stop.",
                index, self.max_clip_secs
            ),
            Err(e) => self.report_rejection(&e),
        }
    }

    /// Listen button analog: play every clip, newest first.
    fn start_playback(&mut self) {
        match self.manager.start_playback() {
            Ok(report) => {
                for skip in &report.skipped {
                    println!("Skipping clip {}: {}", skip.index, skip.reason);
                }
                if report.clip_count == 0 {
                    println!("No playable clips.");
                } else {
                    println!("Playing {} clip(s), newest first.", report.clip_count);
                }
            }
            Err(e) => self.report_rejection(&e),
        }
    }

    /// Delete-all button analog.
    fn delete_all(&mut self) {
        match self.manager.delete_all() {
            Ok(0) => println!("No clips to delete."),
            Ok(deleted) => println!("Deleted {} clip(s).", deleted),
            Err(e) => self.report_rejection(&e),
        }
    }

    fn show_status(&self) {
        let state = match self.manager.state() {
            SessionState::Idle => "idle".to_string(),
            SessionState::Recording { clip_index, .. } => {
                format!("recording clip {}", clip_index)
            }
            SessionState::Playing { .. } => "playing".to_string(),
        };
        println!("{} clip(s) recorded; currently {}.", self.manager.clip_count(), state);
    }

    /// Observe cap auto-stop and playback completion.
    fn poll_sessions(&mut self) {
        match self.manager.poll() {
            Ok(Some(SessionEvent::ClipSaved(index))) => println!(
                "Reached the {}s cap; saved clip {}.",
                self.max_clip_secs, index
            ),
            Ok(Some(SessionEvent::PlaybackFailed(reason))) => {
                println!("Playback failed: {}", reason);
            }
            Ok(None) => {}
            Err(e) => error!(error = ?e, "Failed to finalize capped recording"),
        }
    }

    /// Toast analog: map expected rejections to user-facing messages.
    fn report_rejection(&self, err: &MemoError) {
        match err {
            MemoError::PlaybackInProgress { .. } => {
                println!("Wait for the current playback to finish.");
            }
            MemoError::RecordingInProgress { .. } => {
                println!("Already recording; type `record` to stop first.");
            }
            MemoError::NothingToPlay { .. } => {
                println!("Nothing to play yet. Record a clip first.");
            }
            other => {
                error!(error = ?other, "Operation failed");
                println!("Operation failed; see log for details.");
            }
        }
    }
}
