use std::env;
use std::path::PathBuf;

use anyhow::Result;
use tracing::warn;

use crate::moderation::DEFAULT_THRESHOLD;

/// Moderation settings. Read once at startup; the engine's threshold and
/// debug flag can still be changed later through its setters.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationSettings {
    pub threshold: f64,
    pub case_sensitive: bool,
    /// Adds score detail to rejection messages and logs per-field analysis.
    /// Keep off in production.
    pub debug_mode: bool,
    /// Optional JSON rule table replacing the built-in rules.
    pub rules_path: Option<PathBuf>,
}

impl Default for ModerationSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            case_sensitive: false,
            debug_mode: false,
            rules_path: None,
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub moderation: ModerationSettings,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Ok(Self::from_lookup(|key| env::var(key).ok()))
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Bad values never fail startup: they are logged and the default is used.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ModerationSettings::default();

        let threshold = match lookup("CASTAWAY_MODERATION_THRESHOLD") {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(t) if (0.0..=1.0).contains(&t) => t,
                _ => {
                    warn!(value = %raw, "Ignoring invalid CASTAWAY_MODERATION_THRESHOLD");
                    defaults.threshold
                }
            },
            None => defaults.threshold,
        };

        let moderation = ModerationSettings {
            threshold,
            case_sensitive: lookup("CASTAWAY_CASE_SENSITIVE")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.case_sensitive),
            debug_mode: lookup("CASTAWAY_MODERATION_DEBUG")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.debug_mode),
            rules_path: lookup("CASTAWAY_RULES_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        };

        Self {
            db_path: lookup("CASTAWAY_DB_PATH").unwrap_or_else(|| "./castaway.db".to_string()),
            moderation,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.db_path, "./castaway.db");
        assert_eq!(config.moderation, ModerationSettings::default());
        assert_eq!(config.moderation.threshold, 0.7);
        assert!(!config.moderation.debug_mode);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CASTAWAY_DB_PATH", "/tmp/c.db"),
            ("CASTAWAY_MODERATION_THRESHOLD", "0.85"),
            ("CASTAWAY_CASE_SENSITIVE", "true"),
            ("CASTAWAY_MODERATION_DEBUG", "1"),
            ("CASTAWAY_RULES_PATH", "/etc/castaway/rules.json"),
        ]);
        assert_eq!(config.db_path, "/tmp/c.db");
        assert_eq!(config.moderation.threshold, 0.85);
        assert!(config.moderation.case_sensitive);
        assert!(config.moderation.debug_mode);
        assert_eq!(
            config.moderation.rules_path,
            Some(PathBuf::from("/etc/castaway/rules.json"))
        );
    }

    #[test]
    fn test_invalid_threshold_falls_back() {
        let config = config_from(&[("CASTAWAY_MODERATION_THRESHOLD", "1.7")]);
        assert_eq!(config.moderation.threshold, DEFAULT_THRESHOLD);

        let config = config_from(&[("CASTAWAY_MODERATION_THRESHOLD", "high")]);
        assert_eq!(config.moderation.threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_flag_parsing() {
        assert!(parse_flag("YES"));
        assert!(parse_flag(" on "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }
}
