// Rule catalog: the compiled, immutable set of detection rules.
//
// A catalog is compiled once at startup from a declarative table (the
// built-in table or a JSON file) and then only read. Rules that fail to
// compile are dropped with a warning; building a catalog never fails on a
// bad pattern, it only loses coverage.

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use regex_lite::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::{info, warn};

use super::builtin::BUILTIN_RULES;
use super::taxonomy::{Category, Severity};

/// Declarative description of one rule, before compilation.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSpec {
    pub pattern: Cow<'static, str>,
    pub category: Category,
    pub severity: Severity,
    pub description: Cow<'static, str>,
    pub confidence: f64,
}

impl RuleSpec {
    pub const fn new(
        pattern: &'static str,
        category: Category,
        severity: Severity,
        description: &'static str,
        confidence: f64,
    ) -> Self {
        Self {
            pattern: Cow::Borrowed(pattern),
            category,
            severity,
            description: Cow::Borrowed(description),
            confidence,
        }
    }
}

/// A compiled rule.
#[derive(Debug)]
pub struct Rule {
    /// 1-based position in the catalog, used for trace numbering.
    pub number: usize,
    pub matcher: Regex,
    pub category: Category,
    pub severity: Severity,
    pub description: String,
    /// Certainty that a match is a genuine violation (0.0 to 1.0).
    pub confidence: f64,
}

/// Ordered, immutable collection of compiled rules.
///
/// Rules are held behind `Arc` so matches can reference them without
/// borrowing the catalog.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: Vec<Arc<Rule>>,
}

impl RuleCatalog {
    /// Compile a rule table. Invalid patterns and out-of-range confidences
    /// are skipped with a warning, preserving the order of the rest.
    pub fn compile<'a, I>(specs: I) -> Self
    where
        I: IntoIterator<Item = &'a RuleSpec>,
    {
        let mut rules = Vec::new();
        let mut dropped = 0usize;

        for spec in specs {
            if !(0.0..=1.0).contains(&spec.confidence) {
                warn!(
                    pattern = %spec.pattern,
                    confidence = spec.confidence,
                    "Dropping rule with confidence outside [0, 1]"
                );
                dropped += 1;
                continue;
            }

            // Always case-insensitive, independent of the engine's
            // case-sensitivity setting.
            let matcher = match RegexBuilder::new(&spec.pattern)
                .case_insensitive(true)
                .build()
            {
                Ok(re) => re,
                Err(e) => {
                    warn!(pattern = %spec.pattern, error = %e, "Failed to compile rule pattern");
                    dropped += 1;
                    continue;
                }
            };

            rules.push(Arc::new(Rule {
                number: rules.len() + 1,
                matcher,
                category: spec.category,
                severity: spec.severity,
                description: spec.description.to_string(),
                confidence: spec.confidence,
            }));
        }

        info!(rules = rules.len(), dropped, "Rule catalog compiled");
        Self { rules }
    }

    /// The default catalog built from the embedded rule table.
    pub fn builtin() -> Self {
        Self::compile(BUILTIN_RULES)
    }

    /// Compile a catalog from a JSON array of rule specs.
    ///
    /// Malformed JSON is an error; individual bad patterns are dropped.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let specs: Vec<RuleSpec> =
            serde_json::from_str(json).context("Failed to parse rule table JSON")?;
        Ok(Self::compile(&specs))
    }

    /// Read and compile a JSON rule table from disk.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule table at {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid rule table at {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Rule>> {
        self.rules.iter()
    }
}
