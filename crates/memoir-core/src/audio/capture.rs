use crate::{MemoError, CoreResult};

use std::{
    panic::Location,
    sync::{
        atomic::{AtomicBool, Ordering},
        {Arc, Mutex},
    },
    time::Duration,
};

use cpal::{
    Device, Host, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument};

/// Whether any audio input device is available.
///
/// Checked once at launch; the application cannot function without a
/// microphone.
pub fn microphone_available() -> bool {
    cpal::default_host().default_input_device().is_some()
}

/// Captures one clip's worth of audio from an input device.
///
/// Samples accumulate in a shared buffer sized for the maximum clip
/// duration. When the buffer fills, the callback stops accepting samples
/// and raises the cap flag; the owner observes the flag and finalizes the
/// clip exactly as an explicit stop would.
pub(crate) struct ClipRecorder {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    samples: Arc<Mutex<Vec<f32>>>,
    /// Sample budget for the clip (rate * channels * max duration).
    cap_samples: usize,
    /// Raised by the audio callback once the sample budget is exhausted.
    cap_reached: Arc<AtomicBool>,
    /// Signals the audio callback to stop writing. Set to `true` before
    /// dropping the stream to ensure no in-flight callback writes after
    /// the lock is acquired in `stop()`.
    shutdown: Arc<AtomicBool>,
}

impl ClipRecorder {
    /// Open a recorder on the preferred input device (or the default).
    ///
    /// # Errors
    ///
    /// Returns error if no matching input device or config is available.
    #[track_caller]
    #[instrument]
    pub fn new(preferred_device: Option<&str>, max_clip: Duration) -> CoreResult<Self> {
        let host = cpal::default_host();
        let device = Self::resolve_device(&host, preferred_device)?;

        let config = device
            .default_input_config()
            .map_err(|e| MemoError::DeviceError {
                reason: format!("Failed to get config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let config: StreamConfig = config.into();
        let cap_samples = (u128::from(config.sample_rate)
            * u128::from(config.channels)
            * max_clip.as_millis()
            / 1000) as usize;

        info!(
            sample_rate = config.sample_rate,
            channels = config.channels,
            cap_samples,
            "ClipRecorder initialized"
        );

        Ok(Self {
            device,
            config,
            stream: None,
            samples: Arc::new(Mutex::new(Vec::with_capacity(cap_samples))),
            cap_samples,
            cap_reached: Arc::new(AtomicBool::new(false)),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    #[track_caller]
    fn resolve_device(host: &Host, preferred: Option<&str>) -> CoreResult<Device> {
        let Some(name) = preferred else {
            return host
                .default_input_device()
                .ok_or(MemoError::NoMicrophoneFound {
                    location: ErrorLocation::from(Location::caller()),
                });
        };

        let mut devices = host.input_devices().map_err(|e| MemoError::DeviceError {
            reason: format!("Failed to enumerate input devices: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        devices
            .find(|d| d.name().is_ok_and(|n| n == name))
            .ok_or_else(|| MemoError::DeviceError {
                reason: format!("No input device named {:?}", name),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Start capturing into the clip buffer.
    ///
    /// # Errors
    ///
    /// Returns error if the input stream cannot be built or started.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn start(&mut self) -> CoreResult<()> {
        let samples = Arc::clone(&self.samples);
        let shutdown = Arc::clone(&self.shutdown);
        let cap_reached = Arc::clone(&self.cap_reached);
        let cap_samples = self.cap_samples;

        // Reset flags for a new clip
        self.shutdown.store(false, Ordering::Release);
        self.cap_reached.store(false, Ordering::Release);

        samples
            .lock()
            .map_err(|e| MemoError::DeviceError {
                reason: format!("Failed to lock samples: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .clear();

        let stream = self
            .device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    // Check shutdown flag before acquiring lock. Once stop()
                    // sets this flag, no new samples are written even if
                    // CPAL fires one more callback before the stream drops.
                    if shutdown.load(Ordering::Acquire) {
                        return;
                    }
                    // Recover from lock poison rather than silently dropping
                    // audio. A poisoned mutex means a previous holder
                    // panicked, but the buffer data is still valid.
                    let mut buf = samples.lock().unwrap_or_else(|e| {
                        error!("Sample buffer lock poisoned, recovering: {}", e);
                        e.into_inner()
                    });
                    append_capped(&mut buf, data, cap_samples, &cap_reached);
                },
                |err| {
                    error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| MemoError::DeviceError {
                reason: format!("Failed to build stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        stream.play().map_err(|e| MemoError::DeviceError {
            reason: format!("Failed to start stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        self.stream = Some(stream);
        info!("Clip capture started");

        Ok(())
    }

    /// Whether the fixed maximum clip duration has been reached.
    pub fn reached_cap(&self) -> bool {
        self.cap_reached.load(Ordering::Acquire)
    }

    /// Stop capturing and return the buffered samples.
    ///
    /// # Errors
    ///
    /// Returns error if the sample buffer lock cannot be acquired.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> CoreResult<Vec<f32>> {
        // Signal callback to stop writing BEFORE dropping the stream, so
        // no in-flight callback writes after the lock is acquired below.
        self.shutdown.store(true, Ordering::Release);

        if let Some(stream) = self.stream.take() {
            drop(stream);
            // Brief yield so any in-flight callback observes the shutdown
            // flag and completes. On most CPAL backends drop() joins the
            // audio thread and this is redundant.
            std::thread::sleep(Duration::from_millis(5));
            info!("Clip capture stopped");
        }

        let samples: Vec<f32> = self
            .samples
            .lock()
            .map_err(|e| MemoError::DeviceError {
                reason: format!("Failed to lock samples: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .drain(..)
            .collect();

        debug!(sample_count = samples.len(), "Captured clip samples");

        Ok(samples)
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.config.channels
    }
}

/// Accept samples up to the fixed clip cap, then raise the flag so the
/// owner auto-stops the session. Called from the audio callback; a chunk
/// crossing the cap is truncated exactly at the bound.
pub(crate) fn append_capped(
    buf: &mut Vec<f32>,
    data: &[f32],
    cap_samples: usize,
    cap_reached: &AtomicBool,
) {
    let remaining = cap_samples.saturating_sub(buf.len());
    if remaining == 0 {
        cap_reached.store(true, Ordering::Release);
        return;
    }
    if data.len() >= remaining {
        buf.extend_from_slice(&data[..remaining]);
        cap_reached.store(true, Ordering::Release);
    } else {
        buf.extend_from_slice(data);
    }
}
