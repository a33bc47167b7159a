// File: src/verdict.rs
// Purpose: Pass/fail result of a single rule or rule set

use serde::Serialize;

/// Result of checking one value
///
/// A passing verdict never carries a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    valid: bool,
    message: String,
}

impl Verdict {
    /// Create a passing verdict
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    /// Create a failing verdict with the message shown next to the field
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    /// Pass when `valid`, otherwise fail with the lazily built message
    pub fn check(valid: bool, message: impl FnOnce() -> String) -> Self {
        if valid {
            Self::pass()
        } else {
            Self::fail(message())
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for Verdict {
    fn default() -> Self {
        Self::pass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_has_no_message() {
        let verdict = Verdict::pass();
        assert!(verdict.is_valid());
        assert_eq!(verdict.message(), "");
    }

    #[test]
    fn test_check_suppresses_message_when_valid() {
        let verdict = Verdict::check(true, || "unused".to_string());
        assert_eq!(verdict, Verdict::pass());

        let verdict = Verdict::check(false, || "too long".to_string());
        assert!(!verdict.is_valid());
        assert_eq!(verdict.message(), "too long");
    }

    #[test]
    fn test_serializes_for_js() {
        let json = serde_json::to_value(Verdict::fail("bad")).unwrap();
        assert_eq!(json, serde_json::json!({ "valid": false, "message": "bad" }));
    }
}
