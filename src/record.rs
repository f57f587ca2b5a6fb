//! Outcome records: one test's result in one run

use serde::{Deserialize, Serialize};

/// A single pass/fail observation of a test in a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// Fully qualified test identifier (e.g., "com.example.LoginTest.test_login")
    pub test_id: String,
    /// Identifier of the run that produced this outcome
    pub run_id: String,
    /// Whether the test passed in this run
    pub passed: bool,
    /// Wall-clock duration in seconds, if the report carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Failure message, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OutcomeRecord {
    pub fn passed(test_id: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self::new(test_id, run_id, true)
    }

    pub fn failed(test_id: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self::new(test_id, run_id, false)
    }

    fn new(test_id: impl Into<String>, run_id: impl Into<String>, passed: bool) -> Self {
        Self {
            test_id: test_id.into(),
            run_id: run_id.into(),
            passed,
            duration: None,
            message: None,
        }
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let rec = OutcomeRecord::failed("a.b", "run-1")
            .with_duration(1.5)
            .with_message("boom");
        assert_eq!(rec.test_id, "a.b");
        assert_eq!(rec.run_id, "run-1");
        assert!(!rec.passed);
        assert_eq!(rec.duration, Some(1.5));
        assert_eq!(rec.message.as_deref(), Some("boom"));
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let json = serde_json::to_string(&OutcomeRecord::passed("t", "r")).unwrap();
        assert_eq!(json, r#"{"test_id":"t","run_id":"r","passed":true}"#);
    }
}
