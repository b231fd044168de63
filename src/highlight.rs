//! Split text into matched / unmatched runs for rendering.

use crate::fuzzy::Fuzz;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRun {
    pub text: String,
    pub is_match: bool,
}

impl MatchRun {
    fn matched(text: String) -> Self {
        Self { text, is_match: true }
    }

    fn unmatched(text: String) -> Self {
        Self { text, is_match: false }
    }
}

pub fn highlight(text: &str, query: &str, fuzz: &Fuzz) -> Vec<MatchRun> {
    runs_from_indices(text, &fuzz.match_indices(text, query))
}

/// Builds runs from ascending character indices. Consecutive indices
/// coalesce into one matched run; the gaps become unmatched runs.
pub fn runs_from_indices(text: &str, indices: &[usize]) -> Vec<MatchRun> {
    let chars: Vec<char> = text.chars().collect();
    let mut runs = Vec::new();
    let mut matched = String::new();
    let mut last = 0;

    for &idx in indices {
        // Out of range or not ascending.
        if idx >= chars.len() || idx < last {
            continue;
        }
        if idx > last {
            if !matched.is_empty() {
                runs.push(MatchRun::matched(std::mem::take(&mut matched)));
            }
            runs.push(MatchRun::unmatched(chars[last..idx].iter().collect()));
        }
        matched.push(chars[idx]);
        last = idx + 1;
    }

    if !matched.is_empty() {
        runs.push(MatchRun::matched(matched));
    }
    if last < chars.len() {
        runs.push(MatchRun::unmatched(chars[last..].iter().collect()));
    }
    runs
}
