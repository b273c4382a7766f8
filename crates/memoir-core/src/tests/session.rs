use crate::{MemoError, SessionState};

use std::time::Instant;

use uuid::Uuid;

fn recording() -> SessionState {
    SessionState::Recording {
        session_id: Uuid::new_v4(),
        clip_index: 0,
        started_at: Instant::now(),
    }
}

fn playing() -> SessionState {
    SessionState::Playing {
        session_id: Uuid::new_v4(),
    }
}

/// WHAT: Idle admits every operation
/// WHY: The state machine must not block a quiescent app
#[test]
fn given_idle_when_checking_guards_then_all_allowed() {
    // Given: The idle state
    let state = SessionState::Idle;

    // When/Then: All guards pass
    assert!(state.is_idle());
    assert!(state.ensure_can_record().is_ok());
    assert!(state.ensure_can_play().is_ok());
    assert!(state.ensure_can_delete().is_ok());
}

/// WHAT: An active recording rejects new sessions and deletion
/// WHY: One session at a time; impossible combinations cannot exist
#[test]
fn given_recording_state_when_starting_anything_then_rejected() {
    // Given: An active recording session
    let state = recording();

    // When/Then: Every admission guard yields the recording rejection
    assert!(!state.is_idle());
    assert!(matches!(
        state.ensure_can_record(),
        Err(MemoError::RecordingInProgress { .. })
    ));
    assert!(matches!(
        state.ensure_can_play(),
        Err(MemoError::RecordingInProgress { .. })
    ));
    assert!(matches!(
        state.ensure_can_delete(),
        Err(MemoError::RecordingInProgress { .. })
    ));
}

/// WHAT: An active playback chain rejects recording
/// WHY: Recording must wait for the chain to finish, per the UI contract
#[test]
fn given_playing_state_when_recording_then_playback_in_progress_error() {
    // Given: An active playback session
    let state = playing();

    // When/Then: Recording and playback admission are both rejected
    assert!(matches!(
        state.ensure_can_record(),
        Err(MemoError::PlaybackInProgress { .. })
    ));
    assert!(matches!(
        state.ensure_can_play(),
        Err(MemoError::PlaybackInProgress { .. })
    ));
}
