use std::fmt;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::HistoryEntry;

/// fzf-style ranking of history entries against a search string
pub struct HistoryMatcher {
    matcher: SkimMatcherV2,
}

impl fmt::Debug for HistoryMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryMatcher").finish_non_exhaustive()
    }
}

impl Default for HistoryMatcher {
    fn default() -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
        }
    }
}

impl HistoryMatcher {
    /// Indices of matching entries, best score first.
    ///
    /// Whitespace separates terms and every term has to match. Equal scores
    /// keep recency order. A blank search matches everything.
    pub fn rank(&self, search: &str, entries: &[HistoryEntry]) -> Vec<usize> {
        let terms: Vec<&str> = search.split_whitespace().collect();
        if terms.is_empty() {
            return (0..entries.len()).collect();
        }

        let mut scored: Vec<(usize, i64)> = entries
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| {
                terms
                    .iter()
                    .map(|term| self.matcher.fuzzy_match(&entry.expression, term))
                    .sum::<Option<i64>>()
                    .map(|score| (idx, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(idx, _)| idx).collect()
    }
}
