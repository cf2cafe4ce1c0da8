// Aggregation: reduce matches to an overall severity and score.
//
// Both reductions are a max, not a sum: confidence never accumulates with
// the number of matches, and many low-confidence matches cannot outweigh a
// single high-confidence one.
//
// The debug trace is rendered here too. It is a pure function of its inputs
// (no timestamps, no hash-map ordering), so identical inputs always give a
// byte-identical trace.

use std::fmt::Write;

use super::matcher::Match;
use super::taxonomy::Severity;

/// The reduced view of a set of matches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub overall_severity: Severity,
    pub total_score: f64,
}

impl Default for Aggregate {
    fn default() -> Self {
        Self {
            overall_severity: Severity::Low,
            total_score: 0.0,
        }
    }
}

/// Max-reduce severity and confidence across all matches.
pub fn aggregate(matches: &[Match]) -> Aggregate {
    matches.iter().fold(Aggregate::default(), |acc, m| Aggregate {
        overall_severity: acc.overall_severity.max(m.rule.severity),
        total_score: acc.total_score.max(m.rule.confidence),
    })
}

/// Everything the debug trace reports.
pub struct TraceInput<'a> {
    pub original: &'a str,
    pub normalized: &'a str,
    pub threshold: f64,
    pub rule_count: usize,
    pub matches: &'a [Match],
    pub aggregate: Aggregate,
    pub is_flagged: bool,
}

/// Render the deterministic diagnostic trace.
pub fn render_trace(input: &TraceInput<'_>) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "=== MODERATION ANALYSIS ===");
    let _ = writeln!(out, "Original text: {}", input.original);
    let _ = writeln!(out, "Normalized text: {}", input.normalized);
    let _ = writeln!(out, "Threshold: {:.2}", input.threshold);
    let _ = writeln!(out, "Rules checked: {}", input.rule_count);

    for m in input.matches {
        let _ = writeln!(
            out,
            "Match rule #{}: {} | category={} severity={} confidence={:.2} | text=\"{}\" at {}-{}",
            m.rule.number,
            m.rule.description,
            m.rule.category,
            m.rule.severity,
            m.rule.confidence,
            m.matched_text,
            m.start,
            m.end,
        );
    }

    let _ = writeln!(out, "=== SUMMARY ===");
    let _ = writeln!(out, "Detections: {}", input.matches.len());
    let _ = writeln!(out, "Final severity: {}", input.aggregate.overall_severity);
    let _ = writeln!(out, "Final score: {:.2}", input.aggregate.total_score);
    let _ = writeln!(out, "Threshold: {:.2}", input.threshold);
    let _ = writeln!(
        out,
        "Verdict: {}",
        if input.is_flagged { "flagged" } else { "clean" }
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderation::matcher::find_matches;
    use crate::moderation::rules::{RuleCatalog, RuleSpec};
    use crate::moderation::taxonomy::Category;

    fn catalog() -> RuleCatalog {
        RuleCatalog::compile(&[
            RuleSpec::new(r"\bmeh\b", Category::Profanity, Severity::Low, "meh", 0.3),
            RuleSpec::new(r"\bugh\b", Category::Harassment, Severity::Medium, "ugh", 0.6),
            RuleSpec::new(r"\bgrr\b", Category::Threat, Severity::Critical, "grr", 0.5),
        ])
    }

    #[test]
    fn test_empty_is_low_and_zero() {
        let agg = aggregate(&[]);
        assert_eq!(agg.overall_severity, Severity::Low);
        assert_eq!(agg.total_score, 0.0);
    }

    #[test]
    fn test_max_not_sum() {
        let text = "meh meh meh meh meh";
        let matches = find_matches(&catalog(), text, text);
        assert_eq!(matches.len(), 5);
        let agg = aggregate(&matches);
        assert!((agg.total_score - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_severity_and_score_reduce_independently() {
        // Highest severity (grr, Critical) is not the highest confidence (ugh, 0.6)
        let text = "ugh grr";
        let matches = find_matches(&catalog(), text, text);
        let agg = aggregate(&matches);
        assert_eq!(agg.overall_severity, Severity::Critical);
        assert!((agg.total_score - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_trace_lists_each_match_and_summary() {
        let text = "meh ugh";
        let matches = find_matches(&catalog(), text, text);
        let agg = aggregate(&matches);
        let trace = render_trace(&TraceInput {
            original: text,
            normalized: text,
            threshold: 0.5,
            rule_count: 3,
            matches: &matches,
            aggregate: agg,
            is_flagged: true,
        });

        assert!(trace.contains("Rules checked: 3"));
        assert!(trace.contains("Match rule #1: meh | category=profanity severity=low"));
        assert!(trace.contains("Match rule #2: ugh"));
        assert!(trace.contains("text=\"ugh\" at 4-7"));
        assert!(trace.contains("Detections: 2"));
        assert!(trace.contains("Final severity: medium"));
        assert!(trace.contains("Final score: 0.60"));
        assert!(trace.ends_with("Verdict: flagged\n"));
    }
}
