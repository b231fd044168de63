//! Host facade: the UI surface the palette core talks to, and the TUI host.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{ConfigSnapshot, ConfigStore};
use crate::state::{FocusTarget, KeyBinding, Notification, NotifyLevel};

/// Everything the palette needs from whatever is hosting it.
pub trait HostFacade {
    fn show_panel(&mut self);
    fn hide_panel(&mut self);
    fn active_element(&self) -> FocusTarget;
    fn restore_focus(&mut self, target: FocusTarget);
    fn find_key_bindings_for(&self, target: FocusTarget) -> Vec<KeyBinding>;
    fn notify(&mut self, level: NotifyLevel, message: String);
    /// Fresh snapshot; picks up config file edits.
    fn config(&mut self) -> ConfigSnapshot;
    fn working_directory(&self) -> PathBuf;
}

const MAX_NOTIFICATIONS: usize = 200;

/// The ratatui front end acting as host.
pub struct TuiHost {
    config: ConfigStore,
    cwd: PathBuf,
    panel_visible: bool,
    focus: FocusTarget,
    notifications: Vec<Notification>,
    /// Lines scrolled back from the newest notification; 0 follows new ones.
    pub activity_scroll: usize,
}

impl TuiHost {
    pub fn new(config: ConfigStore, cwd: PathBuf) -> Self {
        Self {
            config,
            cwd,
            panel_visible: false,
            focus: FocusTarget::Activity,
            notifications: Vec::new(),
            activity_scroll: 0,
        }
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
        self.activity_scroll = 0;
    }

    pub fn scroll_activity_back(&mut self, lines: usize) {
        self.activity_scroll = self.activity_scroll.saturating_add(lines).min(self.notifications.len());
    }

    pub fn scroll_activity_forward(&mut self, lines: usize) {
        self.activity_scroll = self.activity_scroll.saturating_sub(lines);
    }

    pub fn config_path(&self) -> &Path {
        self.config.path()
    }

    /// Last loaded snapshot, without touching the file.
    pub fn cached_config(&self) -> &ConfigSnapshot {
        self.config.current()
    }
}

impl HostFacade for TuiHost {
    fn show_panel(&mut self) {
        self.panel_visible = true;
        self.focus = FocusTarget::Palette;
    }

    fn hide_panel(&mut self) {
        self.panel_visible = false;
        if self.focus == FocusTarget::Palette {
            self.focus = FocusTarget::Activity;
        }
    }

    fn active_element(&self) -> FocusTarget {
        self.focus
    }

    fn restore_focus(&mut self, target: FocusTarget) {
        self.focus = target;
    }

    fn find_key_bindings_for(&self, _target: FocusTarget) -> Vec<KeyBinding> {
        self.config.current().bindings()
    }

    fn notify(&mut self, level: NotifyLevel, message: String) {
        info!(?level, %message, "notification");
        self.notifications.push(Notification::new(level, message));
        // Keep a scrolled-back view pinned to the same entries.
        if self.activity_scroll > 0 {
            self.activity_scroll += 1;
        }
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let excess = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..excess);
        }
    }

    fn config(&mut self) -> ConfigSnapshot {
        if let Err(err) = self.config.refresh() {
            warn!(error = %err, "keeping previous config");
            self.notify(NotifyLevel::Warning, err.to_string());
        }
        self.config.current().clone()
    }

    fn working_directory(&self) -> PathBuf {
        self.cwd.clone()
    }
}
