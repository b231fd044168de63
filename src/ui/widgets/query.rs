//! Query line at the top of the palette: prompt, text, cursor.

use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::colors;

const PROMPT: &str = " ▸ ";

/// A fully selected query is drawn reversed; the next keystroke replaces it.
pub fn render(f: &mut Frame, query: &str, selected: bool, area: Rect) {
    let text_style = if selected {
        Style::default().fg(colors::TEXT).add_modifier(Modifier::REVERSED)
    } else {
        Style::default().fg(colors::TEXT)
    };
    let mut spans = vec![
        Span::styled(PROMPT, Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)),
        Span::styled(query, text_style),
    ];
    if query.is_empty() {
        spans.push(Span::styled("Search commands", Style::default().fg(colors::MUTED)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);

    let prompt_len = PROMPT.chars().count() as u16;
    let cursor_x = area.x + prompt_len + query.chars().count() as u16;
    let x = cursor_x.min(area.x + area.width.saturating_sub(1));
    f.set_cursor_position(Position { x, y: area.y });
}
