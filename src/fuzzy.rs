//! Fuzzy match service with two interchangeable scoring strategies.

use fuzzy_matcher::clangd::ClangdMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scoring {
    /// Clangd-style matcher.
    Standard,
    /// Skim v2 matcher; rewards word starts and consecutive runs.
    #[default]
    Alternate,
}

impl Scoring {
    pub fn from_flag(use_alternate: bool) -> Self {
        if use_alternate {
            Scoring::Alternate
        } else {
            Scoring::Standard
        }
    }
}

pub struct Fuzz {
    scoring: Scoring,
    standard: ClangdMatcher,
    alternate: SkimMatcherV2,
}

impl Default for Fuzz {
    fn default() -> Self {
        Self::new(Scoring::default())
    }
}

impl Fuzz {
    pub fn new(scoring: Scoring) -> Self {
        Self {
            scoring,
            standard: ClangdMatcher::default(),
            alternate: SkimMatcherV2::default(),
        }
    }

    pub fn scoring(&self) -> Scoring {
        self.scoring
    }

    pub fn set_scoring(&mut self, scoring: Scoring) {
        self.scoring = scoring;
    }

    fn matcher(&self) -> &dyn FuzzyMatcher {
        match self.scoring {
            Scoring::Standard => &self.standard,
            Scoring::Alternate => &self.alternate,
        }
    }

    /// Non-negative score; 0 means no match.
    pub fn score(&self, text: &str, query: &str) -> i64 {
        if query.is_empty() {
            return 0;
        }
        self.matcher().fuzzy_match(text, query).unwrap_or(0).max(0)
    }

    /// Sorted, de-duplicated character indices of `text` matched by `query`.
    pub fn match_indices(&self, text: &str, query: &str) -> Vec<usize> {
        if query.is_empty() {
            return Vec::new();
        }
        let mut indices = self
            .matcher()
            .fuzzy_indices(text, query)
            .map(|(_, indices)| indices)
            .unwrap_or_default();
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_strategies_score_subsequences() {
        for scoring in [Scoring::Standard, Scoring::Alternate] {
            let fuzz = Fuzz::new(scoring);
            assert!(fuzz.score("deployment", "dpl") > 0, "{scoring:?}");
            assert_eq!(fuzz.score("deployment", "xyz"), 0, "{scoring:?}");
        }
    }

    #[test]
    fn empty_query_matches_nothing() {
        let fuzz = Fuzz::default();
        assert_eq!(fuzz.score("build", ""), 0);
        assert!(fuzz.match_indices("build", "").is_empty());
    }

    #[test]
    fn indices_are_sorted_char_positions() {
        let fuzz = Fuzz::new(Scoring::Alternate);
        let indices = fuzz.match_indices("env apply", "eap");
        assert_eq!(indices.len(), 3);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        let chars: Vec<char> = "env apply".chars().collect();
        let picked: String = indices.iter().map(|&i| chars[i]).collect();
        assert_eq!(picked, "eap");
    }

    #[test]
    fn switching_strategy_keeps_matcher_usable() {
        let mut fuzz = Fuzz::new(Scoring::Standard);
        fuzz.set_scoring(Scoring::from_flag(true));
        assert_eq!(fuzz.scoring(), Scoring::Alternate);
        assert!(fuzz.score("git push", "gp") > 0);
    }
}
