//! Selection panel controller: visibility, query, filtered view, selection.

use tracing::debug;

use crate::commands::{self, filter};
use crate::discovery::CommandList;
use crate::fuzzy::{Fuzz, Scoring};
use crate::highlight::{highlight, MatchRun};
use crate::host::HostFacade;
use crate::state::{CandidateItem, FocusTarget, KeyBinding};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelState {
    Hidden,
    /// Visible, list fetch in flight.
    Loading,
    Shown,
}

/// Partial update; `None` leaves the current value alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelOptions {
    pub preserve_last_search: Option<bool>,
    pub use_alternate_scoring: Option<bool>,
}

/// Handed out by `show`; a list is only accepted for the session it was fetched for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShowTicket {
    pub session: u64,
    pub show_hidden: bool,
}

pub struct PanelController {
    state: PanelState,
    query: String,
    /// Whole query selected; the next edit replaces it.
    query_selected: bool,
    items: Vec<CandidateItem>,
    filtered: Vec<usize>,
    selected: usize,
    error: Option<String>,
    session: u64,
    preserve_last_search: bool,
    fuzz: Fuzz,
    previously_focused: Option<FocusTarget>,
    key_bindings: Vec<KeyBinding>,
}

impl Default for PanelController {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelController {
    pub fn new() -> Self {
        Self {
            state: PanelState::Hidden,
            query: String::new(),
            query_selected: false,
            items: Vec::new(),
            filtered: Vec::new(),
            selected: 0,
            error: None,
            session: 0,
            preserve_last_search: false,
            fuzz: Fuzz::default(),
            previously_focused: None,
            key_bindings: Vec::new(),
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state != PanelState::Hidden
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn query_selected(&self) -> bool {
        self.query_selected
    }

    pub fn items(&self) -> &[CandidateItem] {
        &self.items
    }

    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn scoring(&self) -> Scoring {
        self.fuzz.scoring()
    }

    #[cfg(test)]
    pub fn preserve_last_search(&self) -> bool {
        self.preserve_last_search
    }

    pub fn selected_item(&self) -> Option<&CandidateItem> {
        self.filtered.get(self.selected).and_then(|&i| self.items.get(i))
    }

    /// Filtered items in display order.
    pub fn visible_items(&self) -> Vec<&CandidateItem> {
        commands::filter_items(&self.items, &self.query, &self.fuzz)
    }

    pub fn toggle(&mut self, host: &mut dyn HostFacade) -> Option<ShowTicket> {
        if self.is_visible() {
            self.hide(host);
            None
        } else {
            Some(self.show(host, false))
        }
    }

    /// Makes the panel visible right away; the caller fetches the list for
    /// the returned ticket and hands it to [`Self::apply_items`].
    pub fn show(&mut self, host: &mut dyn HostFacade, show_hidden: bool) -> ShowTicket {
        if self.is_visible() {
            return ShowTicket { session: self.session, show_hidden };
        }

        self.session += 1;
        let active = host.active_element();
        self.key_bindings = host.find_key_bindings_for(active);

        if self.preserve_last_search {
            self.query_selected = !self.query.is_empty();
        } else {
            self.query.clear();
            self.query_selected = false;
        }

        self.items.clear();
        self.filtered.clear();
        self.selected = 0;
        self.error = None;
        self.state = PanelState::Loading;

        self.previously_focused = Some(active);
        host.show_panel();
        debug!(session = self.session, show_hidden, "palette shown");
        ShowTicket { session: self.session, show_hidden }
    }

    /// Installs a fetched list. Lists for a hidden panel or an older session are dropped.
    pub fn apply_items(&mut self, ticket: ShowTicket, list: CommandList) -> bool {
        if !self.is_visible() || ticket.session != self.session {
            debug!(ticket = ticket.session, current = self.session, "discarding stale command list");
            return false;
        }
        self.items = list.items;
        self.error = list.error.map(|e| e.to_string());
        self.state = PanelState::Shown;
        self.refilter();
        true
    }

    pub fn hide(&mut self, host: &mut dyn HostFacade) {
        self.state = PanelState::Hidden;
        host.hide_panel();
        if let Some(target) = self.previously_focused.take() {
            host.restore_focus(target);
        }
    }

    /// Hides and hands back the selected item. Nothing selected acts as cancel.
    pub fn confirm(&mut self, host: &mut dyn HostFacade) -> Option<CandidateItem> {
        if !self.is_visible() {
            return None;
        }
        let item = self.selected_item().cloned();
        self.hide(host);
        item
    }

    /// Confirms the item a key binding points at, if it is in the list.
    pub fn confirm_named(&mut self, host: &mut dyn HostFacade, name: &str) -> Option<CandidateItem> {
        if !self.is_visible() {
            return None;
        }
        let item = self.items.iter().find(|i| i.display_name == name).cloned()?;
        self.hide(host);
        Some(item)
    }

    pub fn cancel(&mut self, host: &mut dyn HostFacade) {
        self.hide(host);
    }

    pub fn update(&mut self, options: PanelOptions) {
        if let Some(preserve) = options.preserve_last_search {
            self.preserve_last_search = preserve;
        }
        if let Some(alternate) = options.use_alternate_scoring {
            let scoring = Scoring::from_flag(alternate);
            if scoring != self.fuzz.scoring() {
                self.fuzz.set_scoring(scoring);
                self.refilter();
            }
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if self.query_selected {
            self.query.clear();
            self.query_selected = false;
        }
        self.query.push(c);
        self.refilter();
    }

    pub fn backspace(&mut self) {
        if self.query_selected {
            self.query.clear();
            self.query_selected = false;
        } else {
            self.query.pop();
        }
        self.refilter();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.query_selected = false;
        self.refilter();
    }

    pub fn select_next(&mut self) {
        if !self.filtered.is_empty() {
            self.selected = (self.selected + 1) % self.filtered.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.filtered.is_empty() {
            let len = self.filtered.len();
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn highlight(&self, text: &str) -> Vec<MatchRun> {
        highlight(text, &self.query, &self.fuzz)
    }

    pub fn matching_tags<'a>(&self, item: &'a CandidateItem) -> Vec<&'a str> {
        commands::matching_tags(item, &self.query, &self.fuzz)
    }

    pub fn key_bindings(&self) -> &[KeyBinding] {
        &self.key_bindings
    }

    pub fn bindings_for<'a>(&'a self, item: &'a CandidateItem) -> impl Iterator<Item = &'a KeyBinding> {
        self.key_bindings.iter().filter(move |b| b.command == item.display_name)
    }

    fn refilter(&mut self) {
        self.filtered = filter(&self.items, &self.query, &self.fuzz);
        self.selected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::merge;
    use crate::error::PaletteError;
    use crate::testing::FakeHost;

    fn list(names: &[&str]) -> CommandList {
        let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        CommandList { items: merge(Vec::new(), &names), error: None }
    }

    fn visible_names(panel: &PanelController) -> Vec<String> {
        panel.visible_items().iter().map(|i| i.display_name.clone()).collect()
    }

    #[test]
    fn toggle_shows_then_hides_and_restores_focus() {
        let mut host = FakeHost::default();
        let mut panel = PanelController::new();

        let ticket = panel.toggle(&mut host).expect("show ticket");
        assert_eq!(panel.state(), PanelState::Loading);
        assert!(host.panel_visible);
        assert_eq!(host.focus, FocusTarget::Palette);
        assert!(panel.apply_items(ticket, list(&["a"])));
        assert_eq!(panel.state(), PanelState::Shown);

        assert!(panel.toggle(&mut host).is_none());
        assert_eq!(panel.state(), PanelState::Hidden);
        assert!(!host.panel_visible);
        assert_eq!(host.focus, FocusTarget::Activity);
        assert_eq!(host.restored, vec![FocusTarget::Activity]);
    }

    #[test]
    fn toggle_while_loading_hides() {
        let mut host = FakeHost::default();
        let mut panel = PanelController::new();
        let ticket = panel.toggle(&mut host).unwrap();
        panel.toggle(&mut host);
        assert!(!panel.is_visible());
        assert!(!panel.apply_items(ticket, list(&["late"])));
        assert!(panel.items().is_empty());
    }

    #[test]
    fn list_from_older_session_is_discarded() {
        let mut host = FakeHost::default();
        let mut panel = PanelController::new();
        let old = panel.show(&mut host, false);
        panel.hide(&mut host);
        let current = panel.show(&mut host, false);

        assert!(!panel.apply_items(old, list(&["old"])));
        assert!(panel.apply_items(current, list(&["new"])));
        assert_eq!(visible_names(&panel), vec!["new"]);
    }

    #[test]
    fn reshow_while_visible_keeps_session_last_resolved_wins() {
        let mut host = FakeHost::default();
        let mut panel = PanelController::new();
        let first = panel.show(&mut host, false);
        let second = panel.show(&mut host, true);
        assert_eq!(first.session, second.session);
        assert!(second.show_hidden);

        assert!(panel.apply_items(second, list(&["second"])));
        assert!(panel.apply_items(first, list(&["first"])));
        assert_eq!(visible_names(&panel), vec!["first"]);
    }

    #[test]
    fn query_typed_before_load_is_applied_on_arrival() {
        let mut host = FakeHost::default();
        let mut panel = PanelController::new();
        let ticket = panel.show(&mut host, false);
        for c in "push".chars() {
            panel.insert_char(c);
        }
        assert!(panel.filtered().is_empty());

        panel.apply_items(ticket, list(&["git pull --rebase", "git push", "status"]));
        assert_eq!(panel.selected_item().map(|i| i.display_name.as_str()), Some("git push"));
        assert!(!visible_names(&panel).contains(&"status".to_string()));
    }

    #[test]
    fn query_is_cleared_on_show_by_default() {
        let mut host = FakeHost::default();
        let mut panel = PanelController::new();
        panel.show(&mut host, false);
        panel.insert_char('x');
        panel.hide(&mut host);
        panel.show(&mut host, false);
        assert_eq!(panel.query(), "");
        assert!(!panel.query_selected());
    }

    #[test]
    fn preserved_query_is_selected_and_replaced_by_typing() {
        let mut host = FakeHost::default();
        let mut panel = PanelController::new();
        panel.update(PanelOptions { preserve_last_search: Some(true), ..Default::default() });

        panel.show(&mut host, false);
        panel.insert_char('d');
        panel.insert_char('b');
        panel.hide(&mut host);

        panel.show(&mut host, false);
        assert_eq!(panel.query(), "db");
        assert!(panel.query_selected());
        panel.insert_char('g');
        assert_eq!(panel.query(), "g");
        assert!(!panel.query_selected());
    }

    #[test]
    fn confirm_hides_and_returns_selection() {
        let mut host = FakeHost::default();
        let mut panel = PanelController::new();
        let ticket = panel.show(&mut host, false);
        panel.apply_items(ticket, list(&["a", "b", "c"]));
        panel.select_next();
        panel.select_next();
        panel.select_next();
        panel.select_prev();

        let item = panel.confirm(&mut host).unwrap();
        assert_eq!(item.display_name, "c");
        assert!(!panel.is_visible());
        assert!(!host.panel_visible);
    }

    #[test]
    fn confirm_with_nothing_selected_cancels() {
        let mut host = FakeHost::default();
        let mut panel = PanelController::new();
        let ticket = panel.show(&mut host, false);
        panel.apply_items(ticket, list(&[]));
        assert!(panel.confirm(&mut host).is_none());
        assert!(!panel.is_visible());
    }

    #[test]
    fn confirm_named_finds_item_regardless_of_query() {
        let mut host = FakeHost::default();
        let mut panel = PanelController::new();
        let ticket = panel.show(&mut host, false);
        panel.apply_items(ticket, list(&["build", "deploy"]));
        panel.insert_char('z');
        assert_eq!(panel.confirm_named(&mut host, "deploy").unwrap().display_name, "deploy");
        assert!(!panel.is_visible());
        assert!(panel.confirm_named(&mut host, "deploy").is_none());
    }

    #[test]
    fn listing_error_is_kept_for_display() {
        let mut host = FakeHost::default();
        let mut panel = PanelController::new();
        let ticket = panel.show(&mut host, false);
        let mut fetched = list(&["git push"]);
        fetched.error = Some(PaletteError::TerminalBackend("boom".into()));
        panel.apply_items(ticket, fetched);
        assert!(panel.error().unwrap().contains("boom"));
        assert_eq!(visible_names(&panel), vec!["git push"]);
    }

    #[test]
    fn scoring_switch_applies_to_later_filters() {
        let mut panel = PanelController::new();
        panel.update(PanelOptions { use_alternate_scoring: Some(false), ..Default::default() });
        assert_eq!(panel.scoring(), Scoring::Standard);
        panel.update(PanelOptions::default());
        assert_eq!(panel.scoring(), Scoring::Standard);
        panel.update(PanelOptions { use_alternate_scoring: Some(true), ..Default::default() });
        assert_eq!(panel.scoring(), Scoring::Alternate);
    }

    #[test]
    fn switching_scorer_refilters_open_list() {
        let mut host = FakeHost::default();
        let mut panel = PanelController::new();
        let ticket = panel.show(&mut host, false);
        panel.apply_items(ticket, list(&["db proxy", "deploy", "docker build", "git push"]));
        for c in "dp".chars() {
            panel.insert_char(c);
        }
        panel.select_next();

        panel.update(PanelOptions { use_alternate_scoring: Some(false), ..Default::default() });
        let expected = filter(panel.items(), "dp", &Fuzz::new(Scoring::Standard));
        assert_eq!(panel.filtered(), expected.as_slice());
        assert_eq!(panel.selected_index(), 0);
        let resolved: Vec<usize> = panel
            .visible_items()
            .iter()
            .map(|v| panel.items().iter().position(|i| i == *v).unwrap())
            .collect();
        assert_eq!(resolved, expected);
    }

    #[test]
    fn bindings_are_fetched_on_show() {
        let mut host = FakeHost::default();
        host.config.key_bindings.insert("alt-b".into(), "build".into());
        let mut panel = PanelController::new();
        let ticket = panel.show(&mut host, false);
        panel.apply_items(ticket, list(&["build", "lint"]));
        let build = panel.items()[0].clone();
        let lint = panel.items()[1].clone();
        assert_eq!(panel.bindings_for(&build).count(), 1);
        assert_eq!(panel.bindings_for(&lint).count(), 0);
    }
}
