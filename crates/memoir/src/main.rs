//! Memoir: sequential voice memos with newest-first replay.

mod app;
mod app_command;
mod config;
mod console_input;
mod error;
#[cfg(test)]
mod tests;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    console_input::ConsoleInput,
    error::{AppError, Result as AppResult},
};

use crate::config::Config;

use std::time::Duration;

use memoir_core::{MemoManager, TrackStore, microphone_available};
use tokio::sync::mpsc;
use tracing::{error, info};

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("memoir=debug")
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    // Permission-gate analog: without an input device the app cannot
    // function at all, so fail terminally up front.
    if !microphone_available() {
        error!("No audio input device available");
        eprintln!("Memoir cannot function without a microphone.");
        std::process::exit(1);
    }

    let clips_dir = match config.clips_dir() {
        Ok(dir) => dir,
        Err(e) => {
            error!("Failed to resolve clips directory: {:?}", e);
            std::process::exit(1);
        }
    };

    let store_path = match config.store_path() {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to resolve store path: {:?}", e);
            std::process::exit(1);
        }
    };

    let manager = match MemoManager::new(
        TrackStore::new(store_path),
        clips_dir,
        config.audio.selected_device.clone(),
        Duration::from_secs(config.recording.max_clip_secs),
    ) {
        Ok(m) => m,
        Err(e) => {
            error!("Failed to create MemoManager: {:?}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    rt.block_on(async {
        let (command_tx, command_rx) = mpsc::channel(32);
        let input_handle = ConsoleInput::new(command_tx).spawn();

        let app = App {
            manager,
            command_rx,
            max_clip_secs: config.recording.max_clip_secs,
        };

        if let Err(e) = app.run().await {
            error!(error = ?e, "App error");
        }

        // Best-effort join: the reader breaks out after forwarding the
        // shutdown command, but may still be parked in read_line if the
        // loop ended another way. Use a timeout to avoid hanging; the
        // thread is cleaned up on process exit regardless.
        match tokio::time::timeout(Duration::from_secs(1), input_handle).await {
            Ok(Ok(())) => info!("Console reader stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Console reader task panicked"),
            Err(_) => info!("Console reader did not stop within timeout"),
        }
    });
}
