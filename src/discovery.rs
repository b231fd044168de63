//! Command list builder: listing-tool output plus configured commands.

use std::path::Path;

use feruca::Collator;
use tracing::{debug, warn};

use crate::config::ConfigSnapshot;
use crate::error::PaletteError;
use crate::process::{CommandRunner, Invocation};
use crate::state::CandidateItem;

const FOCUS_MARKER: &str = "&focus";
const HIDDEN_PREFIX: char = '_';

/// Items for one panel session. A failed listing still carries the
/// configured commands, with the failure alongside.
#[derive(Debug, Default)]
pub struct CommandList {
    pub items: Vec<CandidateItem>,
    pub error: Option<PaletteError>,
}

/// Parses `name[ &focus][#description]`. Blank names yield `None`.
pub fn parse_descriptor(line: &str, tool: &str) -> Option<CandidateItem> {
    let (name_part, description) = match line.split_once('#') {
        Some((name, desc)) => (name, Some(desc.trim()).filter(|d| !d.is_empty())),
        None => (line, None),
    };
    let focus_marker = name_part.contains(FOCUS_MARKER);
    let display_name = name_part.replace(FOCUS_MARKER, "").trim().to_string();
    if display_name.is_empty() {
        return None;
    }

    let mut item = CandidateItem::discovered(display_name, tool);
    item.focus |= focus_marker;
    item.description = description.map(str::to_string);
    Some(item)
}

pub fn parse_listing(stdout: &str, tool: &str, show_hidden: bool) -> Vec<CandidateItem> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| parse_descriptor(line, tool))
        .filter(|item| show_hidden || !item.display_name.starts_with(HIDDEN_PREFIX))
        .collect()
}

pub fn merge(mut discovered: Vec<CandidateItem>, configured: &[String]) -> Vec<CandidateItem> {
    discovered.extend(
        configured
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(|name| CandidateItem::configured(name.to_string())),
    );
    // Unicode collation (CLDR root): accents and case are secondary, lowercase first.
    let mut collator = Collator::default();
    discovered.sort_by(|a, b| collator.collate(a.display_name.as_str(), b.display_name.as_str()));
    discovered
}

pub fn listing_invocation(tool: &str, cwd: &Path) -> Invocation {
    Invocation::shell(&format!("{} --print-commands", tool), cwd)
}

pub async fn build(
    runner: &dyn CommandRunner,
    config: &ConfigSnapshot,
    cwd: &Path,
    show_hidden: bool,
) -> CommandList {
    let invocation = listing_invocation(&config.tool, cwd);
    let (discovered, error) = match runner.run(&invocation).await {
        Ok(stdout) => {
            let items = parse_listing(&stdout, &config.tool, show_hidden);
            debug!(count = items.len(), tool = %config.tool, "commands discovered");
            (items, None)
        }
        Err(err) => {
            warn!(error = %err, tool = %config.tool, "command listing failed");
            (Vec::new(), Some(PaletteError::ExternalTool(err)))
        }
    };
    CommandList { items: merge(discovered, &config.commands), error }
}
