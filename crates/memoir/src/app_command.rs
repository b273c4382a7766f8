/// Commands sent from console input to the main application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Toggle the recording session (start, or stop and save).
    ToggleRecording,
    /// Start the newest-first playback chain.
    StartPlayback,
    /// Delete every clip and reset the counter.
    DeleteAll,
    /// Print the current session state and clip count.
    ShowStatus,
    /// Request application shutdown.
    Shutdown,
}

impl AppCommand {
    /// Parse a console line into a command. Matching is case-insensitive;
    /// unknown input yields `None`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "r" | "record" => Some(AppCommand::ToggleRecording),
            "l" | "listen" => Some(AppCommand::StartPlayback),
            "d" | "delete" => Some(AppCommand::DeleteAll),
            "s" | "status" => Some(AppCommand::ShowStatus),
            "q" | "quit" | "exit" => Some(AppCommand::Shutdown),
            _ => None,
        }
    }
}
