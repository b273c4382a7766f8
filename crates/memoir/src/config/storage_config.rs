use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Clip storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding clip files (None = application data directory).
    #[serde(default)]
    pub clips_dir: Option<PathBuf>,
}
