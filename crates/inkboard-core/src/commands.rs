//! Control-surface commands issued by the shell.

use crate::canvas::TabId;

/// A discrete command from the toolbar or keyboard.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetColor(String),
    SetWidth(f64),
    ToggleEraser,
    ToggleGrid,
    Clear,
    Undo,
    Redo,
    ChangeTab(TabId),
}

impl Command {
    /// Whether the command ends a gesture in progress before running.
    ///
    /// Tool changes do not; they are deferred instead.
    pub fn ends_gesture(&self) -> bool {
        matches!(
            self,
            Command::Clear | Command::Undo | Command::Redo | Command::ChangeTab(_)
        )
    }

    /// Get display name for this command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetColor(_) => "Set color",
            Command::SetWidth(_) => "Set width",
            Command::ToggleEraser => "Toggle eraser",
            Command::ToggleGrid => "Toggle grid",
            Command::Clear => "Clear",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::ChangeTab(_) => "Change tab",
        }
    }
}
