//! Error taxonomy: listing tool, terminal backends, configuration.

use std::io;
use std::path::PathBuf;

/// Failure of an external process started through a [`crate::process::CommandRunner`].
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Exit {
        command: String,
        status: String,
        stderr: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    /// The command-listing tool is missing or failed.
    #[error("command listing failed: {0}")]
    ExternalTool(#[source] ProcessError),

    /// AppleScript or tmux call failed.
    #[error("terminal backend failed: {0}")]
    TerminalBackend(String),

    /// Nothing to run the command in.
    #[error("{0}")]
    Configuration(String),

    #[error("cannot read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<ProcessError> for PaletteError {
    fn from(err: ProcessError) -> Self {
        PaletteError::TerminalBackend(err.to_string())
    }
}
