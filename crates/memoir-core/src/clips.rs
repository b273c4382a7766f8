//! Clip file naming and WAV finalization.
//!
//! Clips live at `{clips_dir}/{index}.wav`, indices starting at 0 and
//! contiguous up to the persisted counter. Container and codec are fixed:
//! WAV, 32-bit float, at the capture device's native rate and channel
//! count.

use crate::{MemoError, CoreResult};

use std::{
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::debug;

/// Deterministic clip path for an index.
pub fn clip_path(clips_dir: &Path, index: u32) -> PathBuf {
    clips_dir.join(format!("{index}.wav"))
}

/// Write captured samples to a clip file.
///
/// An empty capture still produces a (header-only) clip file, keeping the
/// on-disk index range contiguous with the persisted counter.
///
/// # Errors
///
/// Returns error if the WAV file cannot be created or finalized.
#[track_caller]
pub(crate) fn write_clip(
    path: &Path,
    samples: &[f32],
    sample_rate: u32,
    channels: u16,
) -> CoreResult<()> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| MemoError::ClipWrite {
        path: path.to_path_buf(),
        reason: format!("Failed to create WAV file: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    for sample in samples {
        writer
            .write_sample(*sample)
            .map_err(|e| MemoError::ClipWrite {
                path: path.to_path_buf(),
                reason: format!("Failed to write sample: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
    }

    writer.finalize().map_err(|e| MemoError::ClipWrite {
        path: path.to_path_buf(),
        reason: format!("Failed to finalize WAV file: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    debug!(path = ?path, sample_count = samples.len(), "Clip file written");

    Ok(())
}
