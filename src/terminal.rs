//! Command dispatcher: turns a confirmed item into a terminal backend call.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::TerminalKind;
use crate::error::PaletteError;
use crate::process::{CommandRunner, Invocation};
use crate::state::CandidateItem;

/// Time a freshly opened pane gets to start its shell before input arrives.
pub const EMBEDDED_INIT_DELAY: Duration = Duration::from_millis(200);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalRequest {
    pub working_directory: PathBuf,
    pub command: String,
    pub execute: bool,
    pub focus: bool,
}

impl TerminalRequest {
    pub fn for_item(item: &CandidateItem, working_directory: PathBuf, always_focus: bool) -> Self {
        Self {
            working_directory,
            command: item.command.clone(),
            execute: item.execute,
            focus: item.focus || always_focus,
        }
    }

    /// `cd <dir> && <command>`; only the directory is quoted, the command is
    /// shell text on purpose.
    pub fn shell_line(&self) -> Result<String, PaletteError> {
        let dir = self.working_directory.to_string_lossy();
        let quoted = shlex::try_quote(&dir).map_err(|e| {
            PaletteError::TerminalBackend(format!("cannot quote {}: {}", dir, e))
        })?;
        Ok(format!("cd {} && {}", quoted, self.command))
    }
}

/// Escapes text for an AppleScript string literal.
pub fn applescript_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn iterm_script(request: &TerminalRequest) -> Result<Vec<String>, PaletteError> {
    let mut write = format!("write text {}", applescript_string(&request.shell_line()?));
    if !request.execute {
        write.push_str(" newline NO");
    }
    let mut lines = vec![
        r#"tell application "iTerm2""#.to_string(),
        "tell current session of current window".to_string(),
        write,
        "end tell".to_string(),
    ];
    if request.focus {
        lines.push("activate".to_string());
    }
    lines.push("end tell".to_string());
    Ok(lines)
}

pub fn iterm_invocation(request: &TerminalRequest) -> Result<Invocation, PaletteError> {
    let args = iterm_script(request)?
        .into_iter()
        .flat_map(|line| ["-e".to_string(), line]);
    Ok(Invocation::new("osascript", args).in_dir(&request.working_directory))
}

/// A tmux pane that plays the embedded terminal. Opened on first use and
/// reused while it exists. Sends are serialized, so concurrent dispatches
/// share one pane.
#[derive(Default)]
pub struct TmuxPane {
    pane_id: Mutex<Option<String>>,
}

impl TmuxPane {
    async fn is_open(runner: &dyn CommandRunner, id: &str) -> bool {
        let list = Invocation::new("tmux", ["list-panes", "-a", "-F", "#{pane_id}"]);
        match runner.run(&list).await {
            Ok(out) => out.lines().any(|line| line.trim() == id),
            Err(_) => false,
        }
    }

    /// Pane id, opening a new pane when the remembered one is gone.
    async fn ensure_open(
        slot: &mut Option<String>,
        runner: &dyn CommandRunner,
        request: &TerminalRequest,
    ) -> Result<String, PaletteError> {
        if let Some(id) = slot.clone() {
            if Self::is_open(runner, &id).await {
                return Ok(id);
            }
            debug!(pane = %id, "tmux pane gone");
            *slot = None;
        }

        let dir = request.working_directory.to_string_lossy().to_string();
        let open = Invocation::new(
            "tmux",
            ["split-window", "-d", "-P", "-F", "#{pane_id}", "-c", dir.as_str()],
        );
        let id = runner.run(&open).await?;
        if id.is_empty() {
            return Err(PaletteError::TerminalBackend("tmux did not report a pane id".into()));
        }
        info!(pane = %id, "opened tmux pane");
        *slot = Some(id.clone());
        tokio::time::sleep(EMBEDDED_INIT_DELAY).await;
        Ok(id)
    }

    pub async fn send(&self, runner: &dyn CommandRunner, request: &TerminalRequest) -> Result<(), PaletteError> {
        let line = request.shell_line()?;
        let mut slot = self.pane_id.lock().await;
        let id = Self::ensure_open(&mut slot, runner, request).await?;

        runner
            .run(&Invocation::new("tmux", ["send-keys", "-t", id.as_str(), "-l", line.as_str()]))
            .await?;
        if request.execute {
            runner.run(&Invocation::new("tmux", ["send-keys", "-t", id.as_str(), "Enter"])).await?;
        }
        if request.focus {
            runner.run(&Invocation::new("tmux", ["select-pane", "-t", id.as_str()])).await?;
        }
        Ok(())
    }
}

pub struct Dispatcher {
    runner: Arc<dyn CommandRunner>,
    tmux: TmuxPane,
}

impl Dispatcher {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner, tmux: TmuxPane::default() }
    }

    pub async fn dispatch(&self, kind: TerminalKind, request: TerminalRequest) -> Result<(), PaletteError> {
        info!(terminal = %kind, command = %request.command, execute = request.execute, focus = request.focus, "dispatching");
        match kind {
            TerminalKind::Iterm2 => {
                let invocation = iterm_invocation(&request)?;
                self.runner.run(&invocation).await?;
                Ok(())
            }
            TerminalKind::Tmux => self.tmux.send(self.runner.as_ref(), &request).await,
        }
    }
}
