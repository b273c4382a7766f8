use crate::{MemoError, CoreResult};

use std::{panic::Location, time::Instant};

use error_location::ErrorLocation;
use uuid::Uuid;

/// Session state for the memo manager.
///
/// A single enum rather than independent recording/playing flags, so
/// impossible combinations (recording while playing) cannot be
/// represented. At most one session of either kind exists at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session active.
    Idle,
    /// A capture session is active.
    Recording {
        /// Unique session ID for log correlation.
        session_id: Uuid,
        /// Clip index the session is recording into.
        clip_index: u32,
        /// When recording started.
        started_at: Instant,
    },
    /// A playback chain is running.
    Playing {
        /// Unique session ID for log correlation.
        session_id: Uuid,
    },
}

impl SessionState {
    /// Whether no session is active.
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    /// Guard for starting a recording: rejected under any active session.
    #[track_caller]
    pub(crate) fn ensure_can_record(&self) -> CoreResult<()> {
        match self {
            SessionState::Idle => Ok(()),
            SessionState::Recording { .. } => Err(MemoError::RecordingInProgress {
                location: ErrorLocation::from(Location::caller()),
            }),
            SessionState::Playing { .. } => Err(MemoError::PlaybackInProgress {
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Guard for starting playback: rejected under any active session.
    #[track_caller]
    pub(crate) fn ensure_can_play(&self) -> CoreResult<()> {
        // Same admission rule as recording: one session at a time.
        self.ensure_can_record()
    }

    /// Guard for delete-all: rejected under any active session.
    #[track_caller]
    pub(crate) fn ensure_can_delete(&self) -> CoreResult<()> {
        self.ensure_can_record()
    }
}
