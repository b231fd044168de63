//! Theme: dark canvas, accent for matches and selection.

use ratatui::style::Color;

pub mod colors {
    use super::*;
    /// Main canvas (activity area).
    pub const BG: Color = Color::Rgb(0x18, 0x1c, 0x22);
    /// Header, status, palette.
    pub const ELEVATED: Color = Color::Rgb(0x16, 0x1a, 0x1f);
    pub const BORDER: Color = Color::Rgb(0x2d, 0x34, 0x3e);
    /// Prompt, selection bar, matched characters.
    pub const ACCENT: Color = Color::Rgb(0x6b, 0xbc, 0xff);
    /// Selected palette row background.
    pub const ACCENT_GLOW: Color = Color::Rgb(0x1e, 0x2d, 0x3d);
    pub const TEXT: Color = Color::Rgb(0xf2, 0xf4, 0xf8);
    pub const TEXT_DIM: Color = Color::Rgb(0xbc, 0xc5, 0xd0);
    /// Hints.
    pub const MUTED: Color = Color::Rgb(0x94, 0x9e, 0xad);
    /// Key binding badges.
    pub const BADGE_BG: Color = Color::Rgb(0x2a, 0x31, 0x3b);
    pub const SUCCESS: Color = Color::Rgb(0x7e, 0xd3, 0x8f);
    pub const WARNING: Color = Color::Rgb(0xf0, 0xc0, 0x6c);
    pub const ERROR: Color = Color::Rgb(0xf0, 0x6c, 0x6c);
}

pub mod styles {
    use super::colors;
    use ratatui::style::{Modifier, Style};

    pub fn border() -> Style {
        Style::default().fg(colors::BORDER)
    }

    pub fn accent_bold() -> Style {
        Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(colors::TEXT_DIM)
    }

    pub fn muted() -> Style {
        Style::default().fg(colors::MUTED)
    }

    pub fn elevated_bg() -> Style {
        Style::default().bg(colors::ELEVATED)
    }

    /// Matched characters inside a highlighted string.
    pub fn character_match() -> Style {
        Style::default()
            .fg(colors::ACCENT)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn badge() -> Style {
        Style::default().fg(colors::TEXT_DIM).bg(colors::BADGE_BG)
    }
}

pub const HEADER_HEIGHT: u16 = 4;
pub const STATUS_HEIGHT: u16 = 1;
pub const MIN_ACTIVITY_LINES: u16 = 3;
/// Inner horizontal margin (chars each side).
pub const MARGIN_X: u16 = 1;
pub const PALETTE_MAX_HEIGHT: u16 = 18;
pub const PALETTE_MARGIN_BOTTOM: u16 = 1;
pub const PALETTE_MAX_WIDTH: u16 = 90;
pub const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
