use error_location::ErrorLocation;
use thiserror::Error;

/// Voice-memo errors with source location tracking.
#[derive(Error, Debug)]
pub enum MemoError {
    /// No audio input device found.
    #[error("No microphone found {location}")]
    NoMicrophoneFound {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio device operation failed.
    #[error("Audio device error: {reason} {location}")]
    DeviceError {
        /// Description of the device error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Track index counter could not be persisted.
    #[error("Track store error: {reason} {location}")]
    StoreError {
        /// Description of the persistence failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Filesystem operation on a clip file failed.
    #[error("Clip IO error at {path:?}: {source} {location}")]
    ClipIo {
        /// Path of the clip file involved.
        path: std::path::PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Writing a clip's WAV data failed.
    #[error("Failed to write clip {path:?}: {reason} {location}")]
    ClipWrite {
        /// Path of the clip file being written.
        path: std::path::PathBuf,
        /// Description of the encoding failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Operation rejected because a recording session is active.
    #[error("A recording is in progress {location}")]
    RecordingInProgress {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Operation rejected because a playback session is active.
    #[error("A playback session is in progress {location}")]
    PlaybackInProgress {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Playback requested while no clips exist.
    #[error("No clips recorded yet {location}")]
    NothingToPlay {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The playback thread could not be spawned.
    #[error("Playback thread error: {reason} {location}")]
    PlaybackThread {
        /// Description of the spawn failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`MemoError`].
pub type Result<T> = std::result::Result<T, MemoError>;
