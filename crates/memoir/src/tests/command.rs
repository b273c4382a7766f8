use crate::AppCommand;

/// WHAT: Every console command parses from its long and short form
/// WHY: The three buttons of the UI map exactly onto these commands
#[test]
fn given_known_input_when_parsing_then_command_returned() {
    // Given/When/Then: Long and short forms map to the same command
    assert_eq!(AppCommand::parse("record"), Some(AppCommand::ToggleRecording));
    assert_eq!(AppCommand::parse("r"), Some(AppCommand::ToggleRecording));
    assert_eq!(AppCommand::parse("listen"), Some(AppCommand::StartPlayback));
    assert_eq!(AppCommand::parse("l"), Some(AppCommand::StartPlayback));
    assert_eq!(AppCommand::parse("delete"), Some(AppCommand::DeleteAll));
    assert_eq!(AppCommand::parse("d"), Some(AppCommand::DeleteAll));
    assert_eq!(AppCommand::parse("status"), Some(AppCommand::ShowStatus));
    assert_eq!(AppCommand::parse("quit"), Some(AppCommand::Shutdown));
    assert_eq!(AppCommand::parse("exit"), Some(AppCommand::Shutdown));
}

/// WHAT: Parsing tolerates case and surrounding whitespace
/// WHY: Console input arrives with a trailing newline at minimum
#[test]
fn given_untrimmed_mixed_case_input_when_parsing_then_command_returned() {
    assert_eq!(
        AppCommand::parse("  RECORD \n"),
        Some(AppCommand::ToggleRecording)
    );
    assert_eq!(AppCommand::parse("Listen"), Some(AppCommand::StartPlayback));
}

/// WHAT: Unknown input yields no command
/// WHY: Typos print a usage hint instead of triggering an action
#[test]
fn given_unknown_input_when_parsing_then_none() {
    assert_eq!(AppCommand::parse("play"), None);
    assert_eq!(AppCommand::parse(""), None);
    assert_eq!(AppCommand::parse("rec ord"), None);
}
