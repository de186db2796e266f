//! Keyboard shortcut registry and key-to-command mapping.

use inkboard_core::{Command, TabId};

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, description: &'static str) -> Self {
        Self { key, description }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Q", "Black pen"),
            Shortcut::new("R", "Red pen"),
            Shortcut::new("G", "Green pen"),
            Shortcut::new("B", "Blue pen"),
            Shortcut::new("E", "Toggle eraser"),
            Shortcut::new("L", "Toggle grid lines"),
            Shortcut::new("C", "Clear tab"),
            Shortcut::new("Z", "Undo"),
            Shortcut::new("Y", "Redo"),
            Shortcut::new("1-9", "Switch to tab"),
        ]
    }

    /// Render the shortcut table as text.
    pub fn format_all() -> String {
        let mut out = String::from("=== Keyboard Shortcuts ===\n");
        for shortcut in Self::all() {
            out.push_str(&format!("  {:8} {}\n", shortcut.key, shortcut.description));
        }
        out
    }
}

/// Map a key press to its command. Keys are case-insensitive.
pub fn command_for_key(key: &str) -> Option<Command> {
    let mut chars = key.chars();
    let c = chars.next()?.to_ascii_lowercase();
    if chars.next().is_some() {
        return None;
    }

    let command = match c {
        'q' => Command::SetColor("black".into()),
        'r' => Command::SetColor("red".into()),
        'g' => Command::SetColor("green".into()),
        'b' => Command::SetColor("blue".into()),
        'e' => Command::ToggleEraser,
        'l' => Command::ToggleGrid,
        'c' => Command::Clear,
        'z' => Command::Undo,
        'y' => Command::Redo,
        '1'..='9' => Command::ChangeTab(TabId::new(c.to_digit(10)?)?),
        _ => return None,
    };
    Some(command)
}
