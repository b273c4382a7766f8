//! Console command reader.
//!
//! Reads stdin lines on a blocking task and forwards parsed commands to
//! the main application over an async channel. Unknown input prints a
//! usage hint directly; EOF (or a parsed quit) ends the reader after a
//! final shutdown command.

use crate::AppCommand;

use std::io::BufRead;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Console input forwarder.
pub struct ConsoleInput {
    command_tx: mpsc::Sender<AppCommand>,
}

impl ConsoleInput {
    /// Create a forwarder sending into the application command channel.
    pub fn new(command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self { command_tx }
    }

    /// Spawn the blocking stdin reader.
    ///
    /// Single persistent blocking task: `read_line` has no async analog
    /// worth the dependency, and one thread parked on stdin costs
    /// nothing. Shutdown: the reader breaks after forwarding a Shutdown
    /// command, on EOF, or when the receiving side is dropped (the next
    /// `blocking_send` fails).
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::task::spawn_blocking(move || {
            let stdin = std::io::stdin();
            let mut line = String::new();

            loop {
                line.clear();
                match stdin.lock().read_line(&mut line) {
                    Ok(0) => {
                        debug!("stdin closed, requesting shutdown");
                        let _ = self.command_tx.blocking_send(AppCommand::Shutdown);
                        break;
                    }
                    Ok(_) => {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        match AppCommand::parse(trimmed) {
                            Some(cmd) => {
                                let is_shutdown = cmd == AppCommand::Shutdown;
                                if self.command_tx.blocking_send(cmd).is_err() {
                                    break;
                                }
                                if is_shutdown {
                                    break;
                                }
                            }
                            None => {
                                println!(
                                    "Unknown command {:?}. Try: record, listen, delete, status, quit.",
                                    trimmed
                                );
                            }
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to read from stdin");
                        let _ = self.command_tx.blocking_send(AppCommand::Shutdown);
                        break;
                    }
                }
            }
        })
    }
}
