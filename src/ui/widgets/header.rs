//! Header banner: title, version, terminal backend, listing tool, directory.

use std::path::Path;

use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::config::ConfigSnapshot;
use crate::ui::theme::styles;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const TITLE: &str = "taito-palette ";
const DIR_LABEL: &str = "directory: ";

/// Keeps the tail of `path`, prefixed with `…`, so it fits in `width` chars.
fn elide_front(path: &str, width: usize) -> String {
    let chars: Vec<char> = path.chars().collect();
    if chars.len() <= width {
        return path.to_string();
    }
    let keep = width.saturating_sub(1);
    std::iter::once('…').chain(chars[chars.len() - keep..].iter().copied()).collect()
}

fn backend_label(config: &ConfigSnapshot) -> String {
    let terminal = config
        .terminal
        .map(|t| t.to_string())
        .unwrap_or_else(|| "no terminal".to_string());
    format!(" {} · {} ", terminal, config.tool)
}

pub fn render(f: &mut Frame, area: ratatui::prelude::Rect, config: &ConfigSnapshot, dir: &Path) {
    let dir = dir.display().to_string();

    // Total width available, minus 2 for leading "  " indent.
    let total = (area.width as usize).saturating_sub(2);
    // Number of horizontal dashes between the corners.
    let dash_count = total.saturating_sub(2);
    // Inner content width between "│ " and the closing "│".
    let inner = total.saturating_sub(3);

    let top_line = format!("╭{}╮", "─".repeat(dash_count));
    let bottom_line = format!("╰{}╯", "─".repeat(dash_count));

    let version = format!("(v{VERSION})");
    let backend = backend_label(config);
    let title_len = TITLE.chars().count() + version.chars().count();
    let pad = inner.saturating_sub(title_len + backend.chars().count());

    let dir_show = elide_front(&dir, inner.saturating_sub(DIR_LABEL.chars().count()));
    let dir_pad = inner.saturating_sub(DIR_LABEL.chars().count() + dir_show.chars().count());

    let border = styles::border();
    let lines = vec![
        Line::from(vec![Span::styled("  ", border), Span::styled(top_line, border)]),
        Line::from(vec![
            Span::styled("  │ ", border),
            Span::styled(TITLE, styles::accent_bold()),
            Span::styled(version, styles::text_dim()),
            Span::styled(" ".repeat(pad), Style::default()),
            Span::styled(backend, styles::muted()),
            Span::styled("│", border),
        ]),
        Line::from(vec![
            Span::styled("  │ ", border),
            Span::styled(DIR_LABEL, styles::text_dim()),
            Span::styled(dir_show, styles::accent_bold()),
            Span::styled(" ".repeat(dir_pad), Style::default()),
            Span::styled("│", border),
        ]),
        Line::from(vec![Span::styled("  ", border), Span::styled(bottom_line, border)]),
    ];

    let para = Paragraph::new(lines).style(styles::elevated_bg());
    f.render_widget(para, area);
}
