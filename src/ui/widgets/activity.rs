//! Activity panel: notifications and dispatch results, newest last, follows new entries.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::state::{Notification, NotifyLevel};
use crate::ui::theme::colors;

fn level_style(level: NotifyLevel) -> Style {
    match level {
        NotifyLevel::Info => Style::default().fg(colors::TEXT_DIM),
        NotifyLevel::Success => Style::default().fg(colors::SUCCESS),
        NotifyLevel::Warning => Style::default().fg(colors::WARNING),
        NotifyLevel::Error => Style::default().fg(colors::ERROR),
    }
}

fn level_tag(level: NotifyLevel) -> &'static str {
    match level {
        NotifyLevel::Info => "INF",
        NotifyLevel::Success => " OK",
        NotifyLevel::Warning => "WRN",
        NotifyLevel::Error => "ERR",
    }
}

/// First visible entry when scrolled `back` lines from the newest.
fn first_visible(total: usize, height: usize, back: usize) -> usize {
    let bottom = total.saturating_sub(height);
    bottom - back.min(bottom)
}

pub fn render(f: &mut Frame, entries: &[Notification], back: usize, area: ratatui::prelude::Rect) {
    let title = if back == 0 { " Activity (following) " } else { " Activity " };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::BORDER))
        .style(Style::default().bg(colors::BG));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let height = inner.height as usize;
    let start = first_visible(entries.len(), height, back);
    let visible: Vec<Line> = entries
        .iter()
        .skip(start)
        .take(height)
        .map(|e| {
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", level_tag(e.level)),
                    level_style(e.level).add_modifier(Modifier::BOLD),
                ),
                Span::styled(e.message.as_str(), Style::default().fg(colors::TEXT)),
            ])
        })
        .collect();
    let para = Paragraph::new(visible)
        .style(Style::default().fg(colors::TEXT_DIM))
        .wrap(Wrap { trim: false });
    f.render_widget(para, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(entries: &[Notification], back: usize) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render(f, entries, back, area);
            })
            .unwrap();
        terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect()
    }

    fn entries(n: usize) -> Vec<Notification> {
        (0..n).map(|i| Notification::new(NotifyLevel::Info, format!("msg{i:02}"))).collect()
    }

    #[test]
    fn newest_entries_are_shown_while_following() {
        let text = screen(&entries(30), 0);
        assert!(text.contains("msg29"));
        assert!(text.contains("msg22"));
        assert!(!text.contains("msg21"));
        assert!(text.contains("(following)"));
    }

    #[test]
    fn scrolling_back_reveals_older_entries() {
        let text = screen(&entries(30), 3);
        assert!(text.contains("msg19"));
        assert!(text.contains("msg26"));
        assert!(!text.contains("msg27"));
        assert!(!text.contains("(following)"));
    }

    #[test]
    fn short_log_starts_at_the_top() {
        assert_eq!(first_visible(3, 8, 0), 0);
        assert_eq!(first_visible(30, 8, 100), 0);
        assert_eq!(first_visible(30, 8, 0), 22);
    }
}
