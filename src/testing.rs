//! Test doubles for the runner and the host.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::config::ConfigSnapshot;
use crate::error::ProcessError;
use crate::host::HostFacade;
use crate::process::{CommandRunner, Invocation, RunFuture};
use crate::state::{FocusTarget, KeyBinding, Notification, NotifyLevel};

type Scripted = Result<String, String>;

/// Scripted runner. Unscripted invocations fail as if the program were missing.
#[derive(Clone, Default)]
pub struct FakeRunner {
    responses: Arc<Mutex<HashMap<Invocation, Scripted>>>,
    calls: Arc<Mutex<Vec<Invocation>>>,
}

impl FakeRunner {
    /// `Err(stderr)` becomes a non-zero exit.
    pub fn respond(&self, invocation: Invocation, result: Scripted) {
        self.responses.lock().unwrap().insert(invocation, result);
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run<'a>(&'a self, invocation: &'a Invocation) -> RunFuture<'a> {
        self.calls.lock().unwrap().push(invocation.clone());
        let scripted = self.responses.lock().unwrap().get(invocation).cloned();
        Box::pin(async move {
            match scripted {
                Some(Ok(stdout)) => Ok(stdout),
                Some(Err(stderr)) => Err(ProcessError::Exit {
                    command: invocation.to_string(),
                    status: "exit status: 1".into(),
                    stderr,
                }),
                None => Err(ProcessError::Spawn {
                    command: invocation.to_string(),
                    source: io::Error::new(io::ErrorKind::NotFound, "not scripted"),
                }),
            }
        })
    }
}

/// Records what the palette asked of its host.
pub struct FakeHost {
    pub panel_visible: bool,
    pub focus: FocusTarget,
    pub config: ConfigSnapshot,
    pub cwd: PathBuf,
    pub notifications: Vec<Notification>,
    pub restored: Vec<FocusTarget>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            panel_visible: false,
            focus: FocusTarget::Activity,
            config: ConfigSnapshot { terminal: None, ..Default::default() },
            cwd: PathBuf::from("/project"),
            notifications: Vec::new(),
            restored: Vec::new(),
        }
    }
}

impl FakeHost {
    pub fn messages(&self, level: NotifyLevel) -> Vec<&str> {
        self.notifications
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.as_str())
            .collect()
    }
}

impl HostFacade for FakeHost {
    fn show_panel(&mut self) {
        self.panel_visible = true;
        self.focus = FocusTarget::Palette;
    }

    fn hide_panel(&mut self) {
        self.panel_visible = false;
    }

    fn active_element(&self) -> FocusTarget {
        self.focus
    }

    fn restore_focus(&mut self, target: FocusTarget) {
        self.restored.push(target);
        self.focus = target;
    }

    fn find_key_bindings_for(&self, _target: FocusTarget) -> Vec<KeyBinding> {
        self.config.bindings()
    }

    fn notify(&mut self, level: NotifyLevel, message: String) {
        self.notifications.push(Notification::new(level, message));
    }

    fn config(&mut self) -> ConfigSnapshot {
        self.config.clone()
    }

    fn working_directory(&self) -> PathBuf {
        self.cwd.clone()
    }
}
