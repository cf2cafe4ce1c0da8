// Severity and category: the two classification axes every rule carries.
//
// Severity has a total order (Low < Medium < High < Critical) so the
// aggregator can take a max. Category is unordered and only used for
// labelling in traces, the CLI, and the JSON API.

use serde::{Deserialize, Serialize};

/// Ordered harm classification of a rule.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Policy category a rule detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[serde(rename = "hate_speech", alias = "hate")]
    Hate,
    Threat,
    Harassment,
    Discrimination,
    Slur,
    Profanity,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hate => "hate_speech",
            Category::Threat => "threat",
            Category::Harassment => "harassment",
            Category::Discrimination => "discrimination",
            Category::Slur => "slur",
            Category::Profanity => "profanity",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
