//! Terminal lifecycle, event loop, and cleanup for the command palette.

mod actions;
mod app;
mod commands;
mod config;
mod discovery;
mod error;
mod events;
mod fuzzy;
mod highlight;
mod host;
mod palette;
mod process;
mod session;
mod state;
mod terminal;
#[cfg(test)]
mod testing;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use config::ConfigStore;
use events::{key_to_action, TICK_RATE};
use host::{HostFacade, TuiHost};
use process::TokioRunner;
use session::Session;
use state::NotifyLevel;

const LOG_ENV: &str = "TAITO_PALETTE_LOG";

/// Logs go to a file; stdout belongs to the alternate screen.
fn init_logging() -> Result<PathBuf> {
    let path = std::env::var_os(LOG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("taito-palette.log"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    // RUST_LOG controls the filter.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("taito_palette=info".parse()?),
        )
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(path)
}

fn main() -> Result<()> {
    let log_path = init_logging()?;
    let cwd = std::env::current_dir().context("resolve working directory")?;
    let runtime = tokio::runtime::Runtime::new().context("start tokio runtime")?;

    let mut host = TuiHost::new(ConfigStore::locate(&cwd), cwd);
    host.notify(
        NotifyLevel::Info,
        format!(
            "Ctrl+P opens the command palette. Config: {}  Log: {}",
            host.config_path().display(),
            log_path.display()
        ),
    );
    let session = Session::start(host, Arc::new(TokioRunner), runtime.handle().clone());
    let mut app = App::new(session);

    // Set up the terminal in raw / alternate-screen mode.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, DisableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_loop(&mut terminal, &mut app);

    // Always restore the terminal, even on error.
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    app.session.stop();
    info!("exiting");
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick = app.tick.wrapping_add(1);
        app.poll_results();

        if app.should_quit {
            return Ok(());
        }

        let tick = app.tick;
        terminal.draw(|frame| ui::render(frame, app, tick))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                let action = key_to_action(&key, app.palette_visible(), app.key_bindings());
                if let Some(a) = action {
                    app.dispatch(a);
                    if app.should_quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}
