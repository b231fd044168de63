//! Configuration snapshot and a store that re-reads the file when it changes.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::PaletteError;
use crate::palette::PanelOptions;
use crate::state::KeyBinding;

pub const CONFIG_ENV: &str = "TAITO_PALETTE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = ".taito-palette.json";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalKind {
    /// iTerm2 via AppleScript.
    Iterm2,
    /// A tmux pane next to the palette.
    Tmux,
}

impl std::fmt::Display for TerminalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalKind::Iterm2 => write!(f, "iTerm2"),
            TerminalKind::Tmux => write!(f, "tmux"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// `null` disables running commands.
    #[serde(default = "default_terminal")]
    pub terminal: Option<TerminalKind>,
    /// Extra commands listed next to the discovered ones.
    #[serde(default = "default_commands")]
    pub commands: Vec<String>,
    /// Focus the terminal after every run, not only for placeholder commands.
    #[serde(default)]
    pub focus: bool,
    /// Command-listing tool, invoked as `<tool> --print-commands`.
    #[serde(default = "default_tool")]
    pub tool: String,
    #[serde(default)]
    pub preserve_last_search: bool,
    #[serde(default = "default_alternate_scoring")]
    pub use_alternate_scoring: bool,
    /// Keystroke -> command display name.
    #[serde(default)]
    pub key_bindings: BTreeMap<String, String>,
}

fn default_terminal() -> Option<TerminalKind> {
    if cfg!(target_os = "macos") {
        Some(TerminalKind::Iterm2)
    } else {
        Some(TerminalKind::Tmux)
    }
}

fn default_commands() -> Vec<String> {
    vec!["git pull --rebase".to_string(), "git push".to_string()]
}

fn default_tool() -> String {
    "taito".to_string()
}

fn default_alternate_scoring() -> bool {
    true
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self {
            terminal: default_terminal(),
            commands: default_commands(),
            focus: false,
            tool: default_tool(),
            preserve_last_search: false,
            use_alternate_scoring: default_alternate_scoring(),
            key_bindings: BTreeMap::new(),
        }
    }
}

impl ConfigSnapshot {
    pub fn panel_options(&self) -> PanelOptions {
        PanelOptions {
            preserve_last_search: Some(self.preserve_last_search),
            use_alternate_scoring: Some(self.use_alternate_scoring),
        }
    }

    pub fn bindings(&self) -> Vec<KeyBinding> {
        self.key_bindings
            .iter()
            .map(|(keys, command)| KeyBinding {
                keystrokes: normalize_keystroke(keys),
                command: command.clone(),
            })
            .collect()
    }
}

/// `Ctrl+Shift+B` and `ctrl-shift-b` both become `ctrl-shift-b`.
pub fn normalize_keystroke(keys: &str) -> String {
    keys.trim().replace('+', "-").to_lowercase()
}

/// What the last refresh found on disk.
#[derive(Debug, PartialEq, Eq)]
enum FileState {
    Missing,
    Unreadable(io::ErrorKind),
    Text(String),
}

/// Config file plus the last good snapshot parsed from it.
pub struct ConfigStore {
    path: PathBuf,
    snapshot: ConfigSnapshot,
    seen: Option<FileState>,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path, snapshot: ConfigSnapshot::default(), seen: None }
    }

    /// `$TAITO_PALETTE_CONFIG`, else `.taito-palette.json` in `dir`.
    pub fn locate(dir: &Path) -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| dir.join(DEFAULT_CONFIG_FILE));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current(&self) -> &ConfigSnapshot {
        &self.snapshot
    }

    /// Re-reads the file and reparses it when its contents changed. A file
    /// that cannot be read or parsed leaves the previous snapshot in place
    /// and is reported once, until it changes again.
    pub fn refresh(&mut self) -> Result<bool, PaletteError> {
        let read = fs::read_to_string(&self.path);
        let state = match &read {
            Ok(text) => FileState::Text(text.clone()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => FileState::Missing,
            Err(err) => FileState::Unreadable(err.kind()),
        };
        if self.seen.as_ref() == Some(&state) {
            return Ok(false);
        }
        self.seen = Some(state);

        let raw = match read {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file; using defaults");
                self.snapshot = ConfigSnapshot::default();
                return Ok(true);
            }
            Err(source) => {
                return Err(PaletteError::ConfigRead { path: self.path.clone(), source });
            }
        };
        let parsed: ConfigSnapshot = serde_json::from_str(&raw).map_err(|source| PaletteError::Config {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), "config loaded");
        self.snapshot = parsed;
        Ok(true)
    }
}
