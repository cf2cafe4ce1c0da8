// Moderation engine: the decision policy over the rule catalog.
//
// The engine is constructed explicitly by the composition root and shared
// by `Arc`. The catalog is immutable after construction. The threshold and
// debug flag live in atomics: reads on the hot path never take a lock, and
// the rare administrative writes are single atomic stores, so a reader sees
// either the old or the new value, never a torn one.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tracing::debug;

use super::aggregate::{aggregate, render_trace, TraceInput};
use super::matcher::{find_matches, Match};
use super::normalize::normalize;
use super::rules::RuleCatalog;
use super::taxonomy::Severity;

/// Default detection threshold. Text is flagged when its score is >= this.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Engine settings, applied at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub threshold: f64,
    /// When false (default), input is lower-cased before scanning. Matchers
    /// are case-insensitive either way.
    pub case_sensitive: bool,
    pub debug_mode: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            case_sensitive: false,
            debug_mode: false,
        }
    }
}

/// Full outcome of analyzing one piece of text.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub is_flagged: bool,
    pub overall_severity: Severity,
    pub total_score: f64,
    /// Threshold the verdict was decided against.
    pub threshold: f64,
    pub matches: Vec<Match>,
    /// Diagnostic trace, present only in debug mode.
    pub trace: Option<String>,
}

pub struct ModerationEngine {
    catalog: RuleCatalog,
    case_sensitive: bool,
    /// f64 bit pattern.
    threshold: AtomicU64,
    debug_mode: AtomicBool,
}

impl ModerationEngine {
    /// Build an engine. An out-of-range threshold in `config` falls back to
    /// `DEFAULT_THRESHOLD`.
    pub fn new(catalog: RuleCatalog, config: EngineConfig) -> Self {
        let engine = Self {
            catalog,
            case_sensitive: config.case_sensitive,
            threshold: AtomicU64::new(DEFAULT_THRESHOLD.to_bits()),
            debug_mode: AtomicBool::new(config.debug_mode),
        };
        engine.set_threshold(config.threshold);
        engine
    }

    /// Engine over the built-in catalog with default settings.
    pub fn with_builtin_rules() -> Self {
        Self::new(RuleCatalog::builtin(), EngineConfig::default())
    }

    /// Analyze `text` against every rule.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        // Snapshot config once so the verdict and trace agree.
        let threshold = self.threshold();
        let debug_mode = self.debug_mode();

        let normalized = normalize(text, self.case_sensitive);
        let matches = find_matches(&self.catalog, text, &normalized);
        let agg = aggregate(&matches);
        let is_flagged = agg.total_score >= threshold;

        let trace = debug_mode.then(|| {
            render_trace(&TraceInput {
                original: text,
                normalized: &normalized,
                threshold,
                rule_count: self.catalog.len(),
                matches: &matches,
                aggregate: agg,
                is_flagged,
            })
        });
        if let Some(ref trace) = trace {
            debug!("{trace}");
        }

        AnalysisResult {
            is_flagged,
            overall_severity: agg.overall_severity,
            total_score: agg.total_score,
            threshold,
            matches,
            trace,
        }
    }

    /// Verdict only.
    pub fn is_flagged(&self, text: &str) -> bool {
        self.analyze(text).is_flagged
    }

    /// Set the threshold. Values outside [0, 1] (and NaN) are ignored and
    /// the previous threshold is kept.
    pub fn set_threshold(&self, threshold: f64) {
        if (0.0..=1.0).contains(&threshold) {
            self.threshold.store(threshold.to_bits(), Ordering::Release);
        } else {
            debug!(threshold, "Ignoring out-of-range threshold");
        }
    }

    pub fn set_debug_mode(&self, enabled: bool) {
        self.debug_mode.store(enabled, Ordering::Release);
    }

    pub fn threshold(&self) -> f64 {
        f64::from_bits(self.threshold.load(Ordering::Acquire))
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode.load(Ordering::Acquire)
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn rule_count(&self) -> usize {
        self.catalog.len()
    }
}
