use serde::{Deserialize, Serialize};

/// Recording behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Maximum clip duration in seconds; capture auto-stops at this bound.
    #[serde(default = "crate::config::default_max_clip_secs")]
    pub max_clip_secs: u64,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            max_clip_secs: crate::config::DEFAULT_MAX_CLIP_SECS,
        }
    }
}
