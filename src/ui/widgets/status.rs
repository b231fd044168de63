//! Status bar: palette state on the left, shortcuts on the right.

use ratatui::{style::Style, text::Span, widgets::Paragraph, Frame};

use crate::fuzzy::Scoring;
use crate::palette::{PanelController, PanelState};
use crate::ui::theme::colors;

fn shortcuts(state: PanelState) -> &'static str {
    match state {
        PanelState::Hidden => " Ctrl+P palette  Alt+P all  j/k scroll  Ctrl+L clear  q quit ",
        _ => " ↑↓ select  Enter run  Ctrl+U clear  Ctrl+S scorer  Esc close ",
    }
}

fn scorer_label(scoring: Scoring) -> &'static str {
    match scoring {
        Scoring::Standard => "standard",
        Scoring::Alternate => "alternate",
    }
}

pub fn render(f: &mut Frame, area: ratatui::prelude::Rect, panel: &PanelController, spinner_char: char) {
    let state = panel.state();
    let left = match state {
        PanelState::Loading => format!(" {} Loading commands…", spinner_char),
        PanelState::Shown => format!(
            " {}/{} commands · {} scoring",
            panel.filtered().len(),
            panel.items().len(),
            scorer_label(panel.scoring())
        ),
        PanelState::Hidden => " Ready".to_string(),
    };
    let right = shortcuts(state);
    let width = area.width as usize;
    let pad = width.saturating_sub(left.chars().count() + right.chars().count());
    let line = format!("{}{}{}", left, " ".repeat(pad), right);
    let span = Span::styled(line, Style::default().fg(colors::MUTED).bg(colors::ELEVATED));
    f.render_widget(Paragraph::new(span), area);
}
