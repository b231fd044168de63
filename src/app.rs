//! Top-level app: owns the session and maps actions onto it.

use crate::actions::Action;
use crate::fuzzy::Scoring;
use crate::host::TuiHost;
use crate::palette::PanelOptions;
use crate::session::Session;
use crate::state::KeyBinding;

pub struct App {
    pub session: Session<TuiHost>,
    pub should_quit: bool,
    /// For spinner animation (incremented each tick).
    pub tick: usize,
}

impl App {
    pub fn new(session: Session<TuiHost>) -> Self {
        Self { session, should_quit: false, tick: 0 }
    }

    pub fn palette_visible(&self) -> bool {
        self.session.panel().is_visible()
    }

    pub fn key_bindings(&self) -> &[KeyBinding] {
        self.session.panel().key_bindings()
    }

    pub fn poll_results(&mut self) {
        self.session.poll_results();
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,

            Action::TogglePalette => self.session.toggle(),
            Action::ShowAllCommands => self.session.show(true),
            Action::ToggleScoring => {
                let alternate = self.session.panel().scoring() != Scoring::Alternate;
                self.session.update(PanelOptions {
                    use_alternate_scoring: Some(alternate),
                    ..Default::default()
                });
            }

            Action::Char(c) => self.session.panel_mut().insert_char(c),
            Action::Backspace => self.session.panel_mut().backspace(),
            Action::ClearQuery => self.session.panel_mut().clear_query(),

            Action::PaletteUp => self.session.panel_mut().select_prev(),
            Action::PaletteDown => self.session.panel_mut().select_next(),
            Action::PaletteConfirm => self.session.confirm(),
            Action::PaletteCancel => self.session.cancel(),
            Action::RunBinding(name) => self.session.run_binding(&name),

            Action::ActivityScrollUp => self.session.host_mut().scroll_activity_back(1),
            Action::ActivityScrollDown => self.session.host_mut().scroll_activity_forward(1),
            Action::ActivityScrollTop => self.session.host_mut().scroll_activity_back(usize::MAX),
            Action::ActivityScrollBottom => self.session.host_mut().activity_scroll = 0,
            Action::ClearActivity => self.session.host_mut().clear_notifications(),
        }
    }
}
