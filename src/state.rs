//! Shared data: candidate items, key bindings, notifications, focus targets.

use std::time::SystemTime;

/// Where a candidate came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Printed by the command-listing tool.
    Discovered,
    /// Listed under `commands` in the config file.
    Configured,
}

/// One selectable row in the palette.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateItem {
    pub display_name: String,
    /// Shell text sent to the terminal.
    pub command: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub focus: bool,
    /// False for placeholder commands (`[arg]`) that need manual editing.
    pub execute: bool,
    pub source: SourceKind,
}

impl CandidateItem {
    pub fn discovered(display_name: String, tool: &str) -> Self {
        let placeholder = display_name.contains('[');
        Self {
            command: format!("{} {}", tool, display_name),
            display_name,
            description: None,
            tags: Vec::new(),
            focus: placeholder,
            execute: !placeholder,
            source: SourceKind::Discovered,
        }
    }

    pub fn configured(display_name: String) -> Self {
        let placeholder = display_name.contains('[');
        Self {
            command: display_name.clone(),
            display_name,
            description: None,
            tags: Vec::new(),
            focus: placeholder,
            execute: !placeholder,
            source: SourceKind::Configured,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBinding {
    /// Normalized keystroke, e.g. `alt-b` or `ctrl-shift-d`.
    pub keystrokes: String,
    /// Display name of the command it triggers.
    pub command: String,
}

/// Something that can hold keyboard focus in the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FocusTarget {
    #[default]
    Activity,
    Palette,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug)]
pub struct Notification {
    pub level: NotifyLevel,
    pub message: String,
    pub timestamp: SystemTime,
}

impl Notification {
    pub fn new(level: NotifyLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into(), timestamp: SystemTime::now() }
    }
}
