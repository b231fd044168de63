//! Item scoring and filtering for the palette.

use crate::fuzzy::Fuzz;
use crate::state::CandidateItem;

/// Name + tags + description, each scored independently.
pub fn score_item(item: &CandidateItem, query: &str, fuzz: &Fuzz) -> i64 {
    let mut score = fuzz.score(&item.display_name, query);
    score += item.tags.iter().map(|t| fuzz.score(t, query)).sum::<i64>();
    if let Some(desc) = &item.description {
        score += fuzz.score(desc, query);
    }
    score
}

/// Indices into `items` in display order. Empty query keeps everything as is;
/// otherwise only positive scores survive, best first.
pub fn filter(items: &[CandidateItem], query: &str, fuzz: &Fuzz) -> Vec<usize> {
    if query.is_empty() {
        return (0..items.len()).collect();
    }
    let mut scored: Vec<(i64, usize)> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let score = score_item(item, query, fuzz);
            (score > 0).then_some((score, i))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, i)| i).collect()
}

/// [`filter`] resolved to the items themselves.
pub fn filter_items<'a>(items: &'a [CandidateItem], query: &str, fuzz: &Fuzz) -> Vec<&'a CandidateItem> {
    filter(items, query, fuzz).into_iter().map(|i| &items[i]).collect()
}

/// Tags with a positive score for `query`, best first.
pub fn matching_tags<'a>(item: &'a CandidateItem, query: &str, fuzz: &Fuzz) -> Vec<&'a str> {
    let mut tags: Vec<(i64, &str)> = item
        .tags
        .iter()
        .map(|t| (fuzz.score(t, query), t.as_str()))
        .filter(|(s, _)| *s > 0)
        .collect();
    tags.sort_by(|a, b| b.0.cmp(&a.0));
    tags.into_iter().map(|(_, t)| t).collect()
}
