//! Plugin session: wires host, panel, list builder and dispatcher together.
//!
//! All state lives on the UI thread. List fetches and dispatches run as
//! tokio tasks and report back through a channel drained by `poll_results`.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::{ConfigSnapshot, TerminalKind};
use crate::discovery::{self, CommandList};
use crate::error::PaletteError;
use crate::host::HostFacade;
use crate::palette::{PanelController, PanelOptions, ShowTicket};
use crate::process::CommandRunner;
use crate::state::{CandidateItem, NotifyLevel};
use crate::terminal::{Dispatcher, TerminalRequest};

#[derive(Debug)]
pub enum SessionEvent {
    ItemsLoaded {
        ticket: ShowTicket,
        list: CommandList,
    },
    Dispatched {
        command: String,
        terminal: TerminalKind,
        result: Result<(), PaletteError>,
    },
}

pub struct Session<H: HostFacade> {
    host: H,
    panel: PanelController,
    runner: Arc<dyn CommandRunner>,
    dispatcher: Arc<Dispatcher>,
    runtime: Handle,
    tx: UnboundedSender<SessionEvent>,
    rx: UnboundedReceiver<SessionEvent>,
    tasks: Vec<JoinHandle<()>>,
    /// Panel options last read from config; a change there wins over `update`.
    observed: PanelOptions,
}

impl<H: HostFacade> Session<H> {
    pub fn start(mut host: H, runner: Arc<dyn CommandRunner>, runtime: Handle) -> Self {
        let config = host.config();
        let observed = config.panel_options();
        let mut panel = PanelController::new();
        panel.update(observed);
        let (tx, rx) = mpsc::unbounded_channel();
        info!(tool = %config.tool, terminal = ?config.terminal, "session started");
        Self {
            host,
            panel,
            dispatcher: Arc::new(Dispatcher::new(Arc::clone(&runner))),
            runner,
            runtime,
            tx,
            rx,
            tasks: Vec::new(),
            observed,
        }
    }

    /// Hides the panel and abandons in-flight work.
    pub fn stop(mut self) -> H {
        if self.panel.is_visible() {
            self.hide();
        }
        for task in self.tasks.drain(..) {
            task.abort();
        }
        info!("session stopped");
        self.host
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn panel(&self) -> &PanelController {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut PanelController {
        &mut self.panel
    }

    pub fn update(&mut self, options: PanelOptions) {
        self.panel.update(options);
    }

    pub fn toggle(&mut self) {
        let config = self.sync_config();
        if let Some(ticket) = self.panel.toggle(&mut self.host) {
            self.fetch(ticket, config);
        }
    }

    pub fn show(&mut self, show_hidden: bool) {
        let config = self.sync_config();
        let ticket = self.panel.show(&mut self.host, show_hidden);
        self.fetch(ticket, config);
    }

    /// Fresh config; panel options that changed in it are pushed to the panel.
    fn sync_config(&mut self) -> ConfigSnapshot {
        let config = self.host.config();
        let options = config.panel_options();
        if options != self.observed {
            self.panel.update(options);
            self.observed = options;
        }
        config
    }

    fn fetch(&mut self, ticket: ShowTicket, config: ConfigSnapshot) {
        let cwd = self.host.working_directory();
        let runner = Arc::clone(&self.runner);
        let tx = self.tx.clone();
        let task = self.runtime.spawn(async move {
            let list = discovery::build(runner.as_ref(), &config, &cwd, ticket.show_hidden).await;
            let _ = tx.send(SessionEvent::ItemsLoaded { ticket, list });
        });
        self.track(task);
    }

    pub fn hide(&mut self) {
        self.panel.hide(&mut self.host);
    }

    pub fn cancel(&mut self) {
        self.panel.cancel(&mut self.host);
    }

    pub fn confirm(&mut self) {
        if let Some(item) = self.panel.confirm(&mut self.host) {
            self.run_item(item);
        }
    }

    /// Runs the item a key binding names, if the current list has it.
    pub fn run_binding(&mut self, name: &str) {
        match self.panel.confirm_named(&mut self.host, name) {
            Some(item) => self.run_item(item),
            None => warn!(command = %name, "key binding names a command that is not listed"),
        }
    }

    fn run_item(&mut self, item: CandidateItem) {
        let config = self.host.config();
        let Some(kind) = config.terminal else {
            let err = PaletteError::Configuration(
                "No terminal selected; set \"terminal\" to \"iterm2\" or \"tmux\" in the config file".into(),
            );
            warn!(command = %item.command, "no terminal backend configured");
            self.host.notify(NotifyLevel::Warning, err.to_string());
            return;
        };

        let request = TerminalRequest::for_item(&item, self.host.working_directory(), config.focus);
        let dispatcher = Arc::clone(&self.dispatcher);
        let tx = self.tx.clone();
        let task = self.runtime.spawn(async move {
            let command = request.command.clone();
            let result = dispatcher.dispatch(kind, request).await;
            let _ = tx.send(SessionEvent::Dispatched { command, terminal: kind, result });
        });
        self.track(task);
    }

    /// Applies results from finished tasks. Call once per UI tick.
    pub fn poll_results(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                SessionEvent::ItemsLoaded { ticket, list } => {
                    let failure = list.error.as_ref().map(ToString::to_string);
                    if self.panel.apply_items(ticket, list) {
                        if let Some(message) = failure {
                            self.host.notify(NotifyLevel::Warning, message);
                        }
                    }
                }
                SessionEvent::Dispatched { command, terminal, result } => match result {
                    Ok(()) => {
                        self.host
                            .notify(NotifyLevel::Success, format!("Sent `{}` to {}", command, terminal));
                    }
                    Err(err) => {
                        error!(error = %err, %command, "dispatch failed");
                        self.host.notify(NotifyLevel::Error, err.to_string());
                    }
                },
            }
        }
    }

    fn track(&mut self, task: JoinHandle<()>) {
        self.tasks.retain(|t| !t.is_finished());
        self.tasks.push(task);
    }

    /// Waits for spawned work, then applies its results.
    #[cfg(test)]
    pub async fn settle(&mut self) {
        for task in std::mem::take(&mut self.tasks) {
            let _ = task.await;
        }
        self.poll_results();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::listing_invocation;
    use crate::palette::PanelState;
    use crate::process::Invocation;
    use crate::state::FocusTarget;
    use crate::terminal::iterm_invocation;
    use crate::testing::{FakeHost, FakeRunner};
    use std::path::Path;

    fn session_with(host: FakeHost, runner: &Arc<FakeRunner>) -> Session<FakeHost> {
        Session::start(host, runner.clone(), Handle::current())
    }

    fn listing(runner: &FakeRunner, stdout: &str) {
        runner.respond(listing_invocation("taito", Path::new("/project")), Ok(stdout.into()));
    }

    fn names(session: &Session<FakeHost>) -> Vec<String> {
        session.panel().visible_items().iter().map(|i| i.display_name.clone()).collect()
    }

    #[tokio::test]
    async fn show_loads_discovered_and_configured_commands() {
        let runner = Arc::new(FakeRunner::default());
        listing(&runner, "status\nbuild &focus # build it\n_secret");
        let mut session = session_with(FakeHost::default(), &runner);

        session.toggle();
        assert!(session.host().panel_visible);
        assert_eq!(session.panel().state(), PanelState::Loading);

        session.settle().await;
        assert_eq!(session.panel().state(), PanelState::Shown);
        assert_eq!(names(&session), vec!["build", "git pull --rebase", "git push", "status"]);
    }

    #[tokio::test]
    async fn toggle_off_does_not_fetch_again() {
        let runner = Arc::new(FakeRunner::default());
        listing(&runner, "status");
        let mut session = session_with(FakeHost::default(), &runner);
        session.toggle();
        session.settle().await;
        session.toggle();
        session.settle().await;

        assert_eq!(runner.calls().len(), 1);
        assert!(!session.panel().is_visible());
        assert_eq!(session.host().restored, vec![FocusTarget::Activity]);
    }

    #[tokio::test]
    async fn show_hidden_includes_internal_commands() {
        let runner = Arc::new(FakeRunner::default());
        listing(&runner, "_secret\nstatus");
        let mut session = session_with(FakeHost::default(), &runner);
        session.show(true);
        session.settle().await;
        assert!(names(&session).contains(&"_secret".to_string()));
    }

    #[tokio::test]
    async fn listing_failure_keeps_configured_commands_and_warns() {
        let runner = Arc::new(FakeRunner::default());
        let mut session = session_with(FakeHost::default(), &runner);
        session.show(false);
        session.settle().await;

        assert_eq!(names(&session), vec!["git pull --rebase", "git push"]);
        assert!(session.panel().error().is_some());
        assert_eq!(session.host().messages(NotifyLevel::Warning).len(), 1);
    }

    #[tokio::test]
    async fn list_arriving_after_hide_is_dropped() {
        let runner = Arc::new(FakeRunner::default());
        listing(&runner, "status");
        let mut session = session_with(FakeHost::default(), &runner);
        session.toggle();
        session.toggle();
        session.settle().await;

        assert_eq!(session.panel().state(), PanelState::Hidden);
        assert!(session.panel().items().is_empty());
        assert_eq!(session.host().focus, FocusTarget::Activity);
    }

    #[tokio::test]
    async fn confirm_without_terminal_only_warns() {
        let runner = Arc::new(FakeRunner::default());
        listing(&runner, "status");
        let mut session = session_with(FakeHost::default(), &runner);
        session.show(false);
        session.settle().await;
        session.confirm();
        session.settle().await;

        assert!(!session.panel().is_visible());
        assert_eq!(runner.calls().len(), 1);
        let warnings = session.host().messages(NotifyLevel::Warning);
        assert!(warnings[0].contains("No terminal selected"));
    }

    #[tokio::test]
    async fn confirm_dispatches_to_iterm() {
        let runner = Arc::new(FakeRunner::default());
        listing(&runner, "deploy [env] # ship it");
        let mut host = FakeHost::default();
        host.config.terminal = Some(TerminalKind::Iterm2);
        host.config.commands.clear();
        let mut session = session_with(host, &runner);

        session.show(false);
        session.settle().await;
        let item = session.panel().selected_item().cloned().unwrap();
        let expected = iterm_invocation(&TerminalRequest::for_item(&item, "/project".into(), false)).unwrap();
        runner.respond(expected.clone(), Ok(String::new()));

        session.confirm();
        session.settle().await;

        assert_eq!(runner.calls().last(), Some(&expected));
        let done = session.host().messages(NotifyLevel::Success);
        assert_eq!(done, vec!["Sent `taito deploy [env]` to iTerm2"]);
    }

    #[tokio::test]
    async fn backend_failure_is_reported_not_fatal() {
        let runner = Arc::new(FakeRunner::default());
        listing(&runner, "status");
        let mut host = FakeHost::default();
        host.config.terminal = Some(TerminalKind::Iterm2);
        let mut session = session_with(host, &runner);

        session.show(false);
        session.settle().await;
        session.confirm();
        session.settle().await;

        assert_eq!(session.host().messages(NotifyLevel::Error).len(), 1);
        session.toggle();
        assert!(session.panel().is_visible());
    }

    #[tokio::test]
    async fn key_binding_runs_named_command() {
        let runner = Arc::new(FakeRunner::default());
        listing(&runner, "build\nstatus");
        let mut host = FakeHost::default();
        host.config.terminal = Some(TerminalKind::Iterm2);
        let mut session = session_with(host, &runner);

        session.show(false);
        session.settle().await;
        session.run_binding("status");
        session.settle().await;

        let calls: Vec<Invocation> = runner.calls();
        let last = calls.last().expect("dispatch call");
        assert_eq!(calls.len(), 2);
        assert_eq!(last.program, "osascript");
    }

    #[tokio::test]
    async fn config_changes_override_panel_options_on_next_show() {
        let runner = Arc::new(FakeRunner::default());
        let mut session = session_with(FakeHost::default(), &runner);
        session.update(PanelOptions { use_alternate_scoring: Some(false), ..Default::default() });
        session.show(false);
        // Config unchanged, explicit update stands.
        assert_eq!(session.panel().scoring(), crate::fuzzy::Scoring::Standard);
        session.hide();

        session.host_mut().config.preserve_last_search = true;
        session.show(false);
        assert!(session.panel().preserve_last_search());
        assert_eq!(session.panel().scoring(), crate::fuzzy::Scoring::Alternate);
        session.settle().await;
    }

    #[tokio::test]
    async fn stop_hides_panel_and_returns_host() {
        let runner = Arc::new(FakeRunner::default());
        let mut session = session_with(FakeHost::default(), &runner);
        session.show(false);
        let host = session.stop();
        assert!(!host.panel_visible);
        assert_eq!(host.focus, FocusTarget::Activity);
    }
}
