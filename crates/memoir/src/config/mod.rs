mod audio_config;
#[allow(clippy::module_inception)]
mod config;
mod recording_config;
mod storage_config;

pub(crate) use {
    audio_config::AudioConfig, config::Config, recording_config::RecordingConfig,
    storage_config::StorageConfig,
};

/// Fixed maximum clip duration (seconds) unless overridden in config.
pub(crate) const DEFAULT_MAX_CLIP_SECS: u64 = 30;

pub(crate) fn default_max_clip_secs() -> u64 {
    DEFAULT_MAX_CLIP_SECS
}
