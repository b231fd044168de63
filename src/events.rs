//! Keybindings: Ctrl+P palette, Ctrl+S scorer, Enter run, Esc close, Up/Down select, j/k scroll activity.

use crate::actions::Action;
use crate::state::KeyBinding;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

pub const TICK_RATE: Duration = Duration::from_millis(80);

/// Normalized keystroke (`ctrl-alt-x`, `shift-f5`) for matching config bindings.
pub fn keystroke(event: &KeyEvent) -> Option<String> {
    let mut mods = event.modifiers;
    let key = match event.code {
        KeyCode::Char(c) if c.is_uppercase() => {
            mods |= KeyModifiers::SHIFT;
            c.to_lowercase().to_string()
        }
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("f{}", n),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::Esc => "escape".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        _ => return None,
    };

    let mut parts = Vec::new();
    if mods.contains(KeyModifiers::CONTROL) {
        parts.push("ctrl".to_string());
    }
    if mods.contains(KeyModifiers::ALT) {
        parts.push("alt".to_string());
    }
    if mods.contains(KeyModifiers::SHIFT) {
        parts.push("shift".to_string());
    }
    parts.push(key);
    Some(parts.join("-"))
}

/// Only chorded keys and function keys can be bound; plain typing goes to the query.
fn bindable(event: &KeyEvent) -> bool {
    matches!(event.code, KeyCode::F(_))
        || event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

pub fn key_to_action(event: &KeyEvent, palette_visible: bool, bindings: &[KeyBinding]) -> Option<Action> {
    // Accept Press and Repeat (hold key); ignore Release so we don't double-handle.
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let (code, mods) = (event.code, event.modifiers);

    if code == KeyCode::Char('c') && mods.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }
    if code == KeyCode::Char('p') && mods == KeyModifiers::CONTROL {
        return Some(Action::TogglePalette);
    }
    if code == KeyCode::Char('p') && mods == KeyModifiers::ALT {
        return Some(Action::ShowAllCommands);
    }
    if code == KeyCode::Char('s') && mods == KeyModifiers::CONTROL {
        return Some(Action::ToggleScoring);
    }

    if palette_visible {
        if bindable(event) {
            if let Some(pressed) = keystroke(event) {
                if let Some(binding) = bindings.iter().find(|b| b.keystrokes == pressed) {
                    return Some(Action::RunBinding(binding.command.clone()));
                }
            }
        }
        return match code {
            KeyCode::Esc => Some(Action::PaletteCancel),
            KeyCode::Enter => Some(Action::PaletteConfirm),
            KeyCode::Up | KeyCode::BackTab => Some(Action::PaletteUp),
            KeyCode::Down | KeyCode::Tab => Some(Action::PaletteDown),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char('u') if mods.contains(KeyModifiers::CONTROL) => Some(Action::ClearQuery),
            // Allow Alt for accented chars; only block Ctrl/Cmd.
            KeyCode::Char(c)
                if !mods.contains(KeyModifiers::CONTROL) && !mods.contains(KeyModifiers::SUPER) =>
            {
                Some(Action::Char(c))
            }
            _ => None,
        };
    }

    if code == KeyCode::Char('l') && mods.contains(KeyModifiers::CONTROL) {
        return Some(Action::ClearActivity);
    }
    match code {
        KeyCode::Char('q') if mods.is_empty() => Some(Action::Quit),
        KeyCode::Char('/') if mods.is_empty() => Some(Action::TogglePalette),
        KeyCode::Char('j') | KeyCode::Down if mods.is_empty() => Some(Action::ActivityScrollDown),
        KeyCode::Char('k') | KeyCode::Up if mods.is_empty() => Some(Action::ActivityScrollUp),
        KeyCode::Char('g') if mods.is_empty() => Some(Action::ActivityScrollTop),
        KeyCode::Char('G') => Some(Action::ActivityScrollBottom),
        _ => None,
    }
}
