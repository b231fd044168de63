//! Process execution: structured invocations run through tokio.

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tracing::debug;

use crate::error::ProcessError;

pub type RunFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ProcessError>> + Send + 'a>>;

/// One external program call. Arguments are passed as argv, never re-split.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
        }
    }

    /// `sh -c <line>`; for commands the user wrote as shell text.
    pub fn shell(line: &str, cwd: &Path) -> Self {
        Self::new("sh", ["-c", line]).in_dir(cwd)
    }

    pub fn in_dir(mut self, cwd: &Path) -> Self {
        self.cwd = Some(cwd.to_path_buf());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs an invocation and yields its trimmed stdout.
///
/// Fails on spawn errors and on non-zero exit status.
pub trait CommandRunner: Send + Sync {
    fn run<'a>(&'a self, invocation: &'a Invocation) -> RunFuture<'a>;
}

/// Real runner backed by `tokio::process`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioRunner;

impl CommandRunner for TokioRunner {
    fn run<'a>(&'a self, invocation: &'a Invocation) -> RunFuture<'a> {
        Box::pin(async move {
            let mut cmd = tokio::process::Command::new(&invocation.program);
            cmd.args(&invocation.args).kill_on_drop(true);
            if let Some(dir) = &invocation.cwd {
                cmd.current_dir(dir);
            }
            debug!(command = %invocation, "spawning");
            let output = cmd.output().await.map_err(|source| ProcessError::Spawn {
                command: invocation.to_string(),
                source,
            })?;
            if !output.status.success() {
                return Err(ProcessError::Exit {
                    command: invocation.to_string(),
                    status: output.status.to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        })
    }
}
