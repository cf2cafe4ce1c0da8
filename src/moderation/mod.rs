// Content moderation: pattern-based screening of user-submitted text.
//
// Flow: the rule catalog is compiled once at startup. Each request's text is
// normalized (case folding only), every rule is matched against it, matches
// are max-reduced to a severity and score, and the score is compared to the
// threshold. The gateway applies this to each text field of a bottle
// creation request and stops at the first flagged field.

pub mod aggregate;
pub mod builtin;
pub mod engine;
pub mod gateway;
pub mod matcher;
pub mod normalize;
pub mod rules;
pub mod taxonomy;

pub use engine::{AnalysisResult, EngineConfig, ModerationEngine, DEFAULT_THRESHOLD};
pub use gateway::{ModerationGateway, Rejection, Screening, TextField, BLOCKED_MESSAGE};
pub use rules::{Rule, RuleCatalog, RuleSpec};
pub use taxonomy::{Category, Severity};

use anyhow::Result;
use tracing::info;

use crate::config::ModerationSettings;

/// Build the engine from configuration: the JSON rule table if one is
/// configured, otherwise the built-in table.
pub fn build_engine(settings: &ModerationSettings) -> Result<ModerationEngine> {
    let catalog = match settings.rules_path {
        Some(ref path) => {
            info!(path = %path.display(), "Loading rule table");
            RuleCatalog::from_json_file(path)?
        }
        None => RuleCatalog::builtin(),
    };

    Ok(ModerationEngine::new(
        catalog,
        EngineConfig {
            threshold: settings.threshold,
            case_sensitive: settings.case_sensitive,
            debug_mode: settings.debug_mode,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn rules_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_no_rules_path_uses_builtin_table() {
        let engine = build_engine(&ModerationSettings::default()).unwrap();
        assert_eq!(engine.rule_count(), builtin::BUILTIN_RULES.len());
        assert_eq!(engine.rule_count(), 53);
        assert!(engine.is_flagged("I will kill you"));
    }

    #[test]
    fn test_json_rules_file_replaces_builtin_table() {
        let file = rules_file(
            r#"[
                {"pattern": "\\bkraken\\b", "category": "threat", "severity": "high",
                 "description": "Sea monster", "confidence": 0.8}
            ]"#,
        );
        let settings = ModerationSettings {
            rules_path: Some(file.path().to_path_buf()),
            ..ModerationSettings::default()
        };

        let engine = build_engine(&settings).unwrap();
        assert_eq!(engine.rule_count(), 1);
        assert!(engine.is_flagged("Release the KRAKEN"));
        assert!(!engine.is_flagged("I will kill you"));
    }

    #[test]
    fn test_missing_rules_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-rules.json");
        let settings = ModerationSettings {
            rules_path: Some(path.clone()),
            ..ModerationSettings::default()
        };

        let err = build_engine(&settings).err().unwrap();
        assert!(format!("{err:#}").contains(&path.display().to_string()));
    }

    #[test]
    fn test_malformed_rules_file_is_an_error() {
        let file = rules_file("[{\"pattern\": ");
        let err = RuleCatalog::from_json_file(file.path()).err().unwrap();
        assert!(format!("{err:#}").contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_settings_flow_into_engine() {
        let settings = ModerationSettings {
            threshold: 0.85,
            case_sensitive: true,
            debug_mode: true,
            rules_path: None,
        };
        let engine = build_engine(&settings).unwrap();
        assert_eq!(engine.threshold(), 0.85);
        assert!(engine.case_sensitive());
        assert!(engine.debug_mode());
        // 0.70 insult is below the configured threshold
        assert!(!engine.is_flagged("you suck"));
        assert!(engine.analyze("you suck").trace.is_some());
    }
}
