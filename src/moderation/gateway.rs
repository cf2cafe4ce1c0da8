// Moderation gateway: screens a bottle creation request before anything
// is persisted.
//
// Text fields are checked in a fixed order (content, author, location) and
// screening stops at the first flagged field. A rejection is an expected
// policy outcome, returned as a value rather than an error.

use std::sync::Arc;

use tracing::{debug, info};

use super::engine::{AnalysisResult, ModerationEngine};
use super::taxonomy::Severity;
use crate::db::models::CreateBottleRequest;

/// User-facing message for rejected content.
pub const BLOCKED_MESSAGE: &str = "content blocked: violates community guidelines";

/// Which request field a piece of text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Content,
    Author,
    LocationFrom,
}

impl TextField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextField::Content => "content",
            TextField::Author => "author",
            TextField::LocationFrom => "location_from",
        }
    }
}

impl std::fmt::Display for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Details of a rejected request.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub field: TextField,
    pub score: f64,
    pub severity: Severity,
    pub detections: usize,
    /// The message shown to the user. Carries score detail only in debug mode.
    pub message: String,
}

impl Rejection {
    fn from_analysis(field: TextField, result: &AnalysisResult, debug_mode: bool) -> Self {
        let message = if debug_mode {
            format!(
                "{BLOCKED_MESSAGE} (score: {:.2}, severity: {}, detections: {})",
                result.total_score,
                result.overall_severity,
                result.matches.len()
            )
        } else {
            BLOCKED_MESSAGE.to_string()
        };

        Self {
            field,
            score: result.total_score,
            severity: result.overall_severity,
            detections: result.matches.len(),
            message,
        }
    }
}

/// Result of screening a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Screening {
    /// All fields passed; the request is handed back unmodified.
    Accepted(CreateBottleRequest),
    Rejected(Rejection),
}

/// Collect the non-empty text fields of a request, in screening order.
pub fn extract_text_fields(req: &CreateBottleRequest) -> Vec<(TextField, &str)> {
    let candidates = [
        (TextField::Content, Some(req.content.as_str())),
        (TextField::Author, req.author.as_deref()),
        (TextField::LocationFrom, req.location_from.as_deref()),
    ];

    candidates
        .into_iter()
        .filter_map(|(field, text)| text.filter(|t| !t.is_empty()).map(|t| (field, t)))
        .collect()
}

#[derive(Clone)]
pub struct ModerationGateway {
    engine: Arc<ModerationEngine>,
}

impl ModerationGateway {
    pub fn new(engine: Arc<ModerationEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ModerationEngine {
        &self.engine
    }

    /// Screen every text field, stopping at the first flagged one.
    pub fn screen(&self, req: CreateBottleRequest) -> Screening {
        let debug_mode = self.engine.debug_mode();

        for (field, text) in extract_text_fields(&req) {
            let result = self.engine.analyze(text);

            if debug_mode {
                debug!(
                    field = %field,
                    flagged = result.is_flagged,
                    score = result.total_score,
                    threshold = self.engine.threshold(),
                    severity = %result.overall_severity,
                    detections = result.matches.len(),
                    "Moderation result"
                );
                for (i, m) in result.matches.iter().enumerate() {
                    debug!(
                        "Detection {}: {} ({}, {}, confidence: {:.2})",
                        i + 1,
                        m.rule.description,
                        m.rule.category,
                        m.rule.severity,
                        m.rule.confidence
                    );
                }
            }

            if result.is_flagged {
                info!(
                    field = %field,
                    severity = %result.overall_severity,
                    "Bottle rejected by moderation"
                );
                return Screening::Rejected(Rejection::from_analysis(field, &result, debug_mode));
            }
        }

        Screening::Accepted(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> ModerationGateway {
        ModerationGateway::new(Arc::new(ModerationEngine::with_builtin_rules()))
    }

    fn request(content: &str, author: Option<&str>, location: Option<&str>) -> CreateBottleRequest {
        CreateBottleRequest {
            content: content.to_string(),
            author: author.map(String::from),
            location_from: location.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_extract_order_and_skips_empty() {
        let req = request("hello", Some(""), Some("Boston"));
        let fields = extract_text_fields(&req);
        assert_eq!(
            fields,
            vec![(TextField::Content, "hello"), (TextField::LocationFrom, "Boston")]
        );
    }

    #[test]
    fn test_extract_nothing() {
        assert!(extract_text_fields(&request("", None, None)).is_empty());
    }

    #[test]
    fn test_clean_request_is_returned_unchanged() {
        let req = request("hello ocean", Some("Sam"), Some("Lisbon"));
        match gateway().screen(req.clone()) {
            Screening::Accepted(back) => assert_eq!(back, req),
            Screening::Rejected(r) => panic!("unexpected rejection: {r:?}"),
        }
    }

    #[test]
    fn test_rejects_at_author_field() {
        let req = request("hello", Some("I will kill you"), None);
        match gateway().screen(req) {
            Screening::Rejected(r) => {
                assert_eq!(r.field, TextField::Author);
                assert_eq!(r.severity, Severity::Critical);
                assert_eq!(r.message, BLOCKED_MESSAGE);
            }
            Screening::Accepted(_) => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_fail_fast_reports_first_flagged_field() {
        let req = request("you suck", Some("I will kill you"), None);
        match gateway().screen(req) {
            Screening::Rejected(r) => {
                assert_eq!(r.field, TextField::Content);
                assert!((r.score - 0.70).abs() < 1e-9);
            }
            Screening::Accepted(_) => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_debug_message_carries_detail() {
        let gw = gateway();
        gw.engine().set_debug_mode(true);
        match gw.screen(request("I will kill you", None, None)) {
            Screening::Rejected(r) => {
                assert_eq!(
                    r.message,
                    format!("{BLOCKED_MESSAGE} (score: 0.95, severity: critical, detections: 1)")
                );
            }
            Screening::Accepted(_) => panic!("expected rejection"),
        }
    }
}
