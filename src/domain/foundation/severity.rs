//! Alert and notification severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity attached to outbound alerts and notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_serializes_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&Severity::Low).unwrap(), "\"LOW\"");
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"CRITICAL\"");
    }

    #[test]
    fn severity_deserializes_from_wire() {
        let s: Severity = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(s, Severity::High);
    }
}
