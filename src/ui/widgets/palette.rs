//! Command palette: query line, highlighted rows, key binding badges, details for the selection.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::highlight::MatchRun;
use crate::palette::{PanelController, PanelState};
use crate::state::CandidateItem;
use crate::ui::theme::{colors, styles};
use crate::ui::widgets::query;

const SELECTED_MARKER: &str = "▎ ";
const MARKER_WIDTH: usize = 2;
const DETAIL_INDENT: &str = "    ";

/// `ctrl-shift-d` -> `Ctrl+Shift+D`.
pub fn humanize_keystroke(keys: &str) -> String {
    keys.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("+")
}

fn run_spans(runs: Vec<MatchRun>, base: Style) -> Vec<Span<'static>> {
    runs.into_iter()
        .map(|run| {
            let style = if run.is_match { styles::character_match() } else { base };
            Span::styled(run.text, style)
        })
        .collect()
}

fn primary_line(panel: &PanelController, item: &CandidateItem, selected: bool, width: usize) -> Line<'static> {
    let base = if selected {
        Style::default().fg(colors::TEXT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::TEXT_DIM)
    };
    let mut spans = vec![Span::styled(
        if selected { SELECTED_MARKER } else { "  " },
        Style::default().fg(colors::ACCENT),
    )];
    spans.extend(run_spans(panel.highlight(&item.display_name), base));

    let badges: Vec<String> = panel
        .bindings_for(item)
        .map(|b| format!(" {} ", humanize_keystroke(&b.keystrokes)))
        .collect();
    if !badges.is_empty() {
        let used = MARKER_WIDTH
            + item.display_name.chars().count()
            + badges.iter().map(|b| b.chars().count() + 1).sum::<usize>();
        spans.push(Span::raw(" ".repeat(width.saturating_sub(used))));
        for badge in badges {
            spans.push(Span::styled(badge, styles::badge()));
            spans.push(Span::raw(" "));
        }
    }

    let line = Line::from(spans);
    if selected {
        line.style(Style::default().bg(colors::ACCENT_GLOW))
    } else {
        line
    }
}

/// Description (or the command itself) plus tags that match the query.
fn secondary_line(panel: &PanelController, item: &CandidateItem) -> Line<'static> {
    let base = Style::default().fg(colors::MUTED);
    let mut spans = vec![Span::raw(DETAIL_INDENT)];
    match &item.description {
        Some(desc) => spans.extend(run_spans(panel.highlight(desc), base)),
        None => spans.push(Span::styled(format!("$ {}", item.command), base)),
    }

    let tags = panel.matching_tags(item);
    if !tags.is_empty() {
        spans.push(Span::styled("  matching tags: ", base.add_modifier(Modifier::BOLD)));
        for (i, tag) in tags.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(", ", base));
            }
            spans.extend(run_spans(panel.highlight(tag), base));
        }
    }
    Line::from(spans).style(Style::default().bg(colors::ACCENT_GLOW))
}

/// Rows that fit in `height`, scrolled so the selection (and its detail line) stay visible.
pub fn list_lines(panel: &PanelController, height: usize, width: usize, spinner_char: char) -> Vec<Line<'static>> {
    if panel.filtered().is_empty() {
        let message = if panel.state() == PanelState::Loading {
            format!("  {} Loading commands…", spinner_char)
        } else {
            "  No matches found".to_string()
        };
        return vec![Line::from(Span::styled(message, styles::muted()))];
    }

    let rows = height.saturating_sub(1).max(1);
    let selected = panel.selected_index();
    let start = (selected + 1).saturating_sub(rows);
    let mut lines = Vec::with_capacity(rows + 1);
    for (i, item) in panel.visible_items().into_iter().enumerate().skip(start).take(rows) {
        let is_selected = i == selected;
        lines.push(primary_line(panel, item, is_selected, width));
        if is_selected {
            lines.push(secondary_line(panel, item));
        }
    }
    lines
}

pub fn render(f: &mut Frame, panel: &PanelController, area: Rect, spinner_char: char) {
    if !panel.is_visible() {
        return;
    }
    f.render_widget(Clear, area);
    let block = Block::default()
        .title("  Commands  ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::BORDER))
        .style(Style::default().bg(colors::ELEVATED));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    query::render(f, panel.query(), panel.query_selected(), Rect { height: 1, ..inner });

    let footer = u16::from(panel.error().is_some());
    let list_area = Rect {
        y: inner.y + 1,
        height: inner.height.saturating_sub(1 + footer),
        ..inner
    };
    let lines = list_lines(panel, list_area.height as usize, list_area.width as usize, spinner_char);
    f.render_widget(Paragraph::new(lines), list_area);

    if let Some(err) = panel.error() {
        let err_area = Rect { y: inner.y + inner.height - 1, height: 1, ..inner };
        let line = Line::from(Span::styled(format!("  {}", err), Style::default().fg(colors::ERROR)));
        f.render_widget(Paragraph::new(line), err_area);
    }
}
