//! Ruleset errors

use super::LocatorError;

/// Creates a rulesets file parse error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> LocatorError {
    LocatorError::RulesetParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid glob pattern error
pub fn invalid_pattern(
    ruleset: impl Into<String>,
    pattern: impl Into<String>,
    reason: impl Into<String>,
) -> LocatorError {
    LocatorError::InvalidPattern {
        ruleset: ruleset.into(),
        pattern: pattern.into(),
        reason: reason.into(),
    }
}
