//! Keyboard routing for history commands.

use eframe::egui;

/// History operation requested from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HistoryCommand {
    Undo,
    Redo,
}

/// Returns whether modifiers represent a plain command chord (no Shift/Alt).
pub(crate) fn is_plain_command_shortcut(modifiers: egui::Modifiers) -> bool {
    modifiers.command && !modifiers.shift && !modifiers.alt
}

/// Returns whether modifiers represent a command+shift chord (no Alt).
pub(crate) fn is_command_shift_shortcut(modifiers: egui::Modifiers) -> bool {
    modifiers.command && modifiers.shift && !modifiers.alt
}

fn history_command(event: &egui::Event) -> Option<HistoryCommand> {
    let egui::Event::Key {
        key,
        pressed: true,
        modifiers,
        ..
    } = event
    else {
        return None;
    };
    match key {
        egui::Key::Z if is_command_shift_shortcut(*modifiers) => Some(HistoryCommand::Redo),
        egui::Key::Z if is_plain_command_shortcut(*modifiers) => Some(HistoryCommand::Undo),
        egui::Key::Y if is_plain_command_shortcut(*modifiers) => Some(HistoryCommand::Redo),
        _ => None,
    }
}

/// Removes undo/redo chords from `events` and returns them in order.
///
/// Taking the events keeps the text widget's built-in undoer from acting on
/// the same keystroke.
pub(crate) fn take_history_commands(events: &mut Vec<egui::Event>) -> Vec<HistoryCommand> {
    let mut out = Vec::new();
    events.retain(|event| match history_command(event) {
        Some(command) => {
            out.push(command);
            false
        }
        None => true,
    });
    out
}
