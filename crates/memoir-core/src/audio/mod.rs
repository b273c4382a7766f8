pub(crate) mod capture;
mod manager;
pub(crate) mod playback;

pub(crate) use capture::ClipRecorder;

pub use {
    capture::microphone_available,
    manager::{MemoManager, PlaybackStarted, SessionEvent},
    playback::SkippedClip,
};
