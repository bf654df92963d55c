use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of validating a provider configuration.
///
/// Invalid configurations are an expected user-input condition, so this is a
/// value rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub reason: String,
}

impl ValidationVerdict {
    pub fn valid() -> Self {
        ValidationVerdict {
            is_valid: true,
            reason: String::new(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        ValidationVerdict {
            is_valid: false,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            write!(f, "valid")
        } else {
            write!(f, "invalid: {}", self.reason)
        }
    }
}

/// Outcome of checking a date/time pattern against the format grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatCheckResult {
    pub passed: bool,
    /// Empty unless `passed` is false.
    pub problem: String,
}

impl FormatCheckResult {
    pub fn passed() -> Self {
        FormatCheckResult {
            passed: true,
            problem: String::new(),
        }
    }

    pub fn failed(problem: impl Into<String>) -> Self {
        FormatCheckResult {
            passed: false,
            problem: problem.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_verdict_has_empty_reason() {
        let v = ValidationVerdict::valid();
        assert!(v.is_valid);
        assert!(v.reason.is_empty());
        assert_eq!(v.to_string(), "valid");
    }

    #[test]
    fn verdict_serializes_with_camel_case() {
        let json = serde_json::to_string(&ValidationVerdict::invalid("No cost.")).unwrap();
        assert_eq!(json, r#"{"isValid":false,"reason":"No cost."}"#);
    }
}
