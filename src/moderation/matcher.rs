// Match engine: runs every rule over the normalized text.
//
// Offsets come from the normalized text; the matched substring is sliced
// from the original at the same span so callers see what the user wrote.
// Output order is rule declaration order, then position. Overlapping spans
// from different rules are all kept.

use std::sync::Arc;

use super::rules::{Rule, RuleCatalog};

/// One occurrence of a rule's pattern in submitted text.
#[derive(Debug, Clone)]
pub struct Match {
    pub rule: Arc<Rule>,
    /// Substring of the original input.
    pub matched_text: String,
    /// Byte offset where the match starts.
    pub start: usize,
    /// Byte offset one past the end of the match.
    pub end: usize,
}

/// Find all non-overlapping occurrences of every rule.
pub fn find_matches(catalog: &RuleCatalog, original: &str, normalized: &str) -> Vec<Match> {
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for rule in catalog.iter() {
        for m in rule.matcher.find_iter(normalized) {
            let matched_text = original.get(m.start()..m.end()).unwrap_or(m.as_str());
            matches.push(Match {
                rule: Arc::clone(rule),
                matched_text: matched_text.to_string(),
                start: m.start(),
                end: m.end(),
            });
        }
    }
    matches
}
