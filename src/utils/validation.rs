//! Validation primitives shared by the parameter and configuration validators
//!
//! Violations are collected into an ordered list instead of failing on the
//! first problem, so callers always see every rule a value broke.

use chrono::{DateTime, NaiveDateTime};
use reqwest::Url;
use std::fmt;

/// The kind of rule a value failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationRule {
    Required,
    Length,
    NonEmpty,
    OneOf,
    Range,
    DateTime,
    Url,
    ConditionalRequired,
    MutuallyExclusive,
}

impl ViolationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationRule::Required => "required",
            ViolationRule::Length => "length",
            ViolationRule::NonEmpty => "non_empty",
            ViolationRule::OneOf => "one_of",
            ViolationRule::Range => "range",
            ViolationRule::DateTime => "date_time",
            ViolationRule::Url => "url",
            ViolationRule::ConditionalRequired => "conditional_required",
            ViolationRule::MutuallyExclusive => "mutually_exclusive",
        }
    }
}

/// A single broken rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub rule: ViolationRule,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, rule: ViolationRule, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Ordered list of violations, in the order the rules were evaluated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(
        &mut self,
        field: impl Into<String>,
        rule: ViolationRule,
        message: impl Into<String>,
    ) {
        self.0.push(Violation::new(field, rule, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|v| v.message.clone()).collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    pub fn has_rule(&self, rule: ViolationRule) -> bool {
        self.0.iter().any(|v| v.rule == rule)
    }

    /// Turns the collected list into `Ok(value)` when nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, Violations> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self.messages();
        f.write_str(&messages.join("; "))
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Check that a URL parses and uses the http or https scheme
pub fn validate_url(url: &str) -> Result<Url, String> {
    if url.trim().is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    let parsed = Url::parse(url).map_err(|e| format!("Invalid URL '{}': {}", url, e))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(format!(
            "Invalid URL '{}': scheme '{}' is not supported, use http:// or https://",
            url, scheme
        )),
    }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Local (offset-less) date-time forms
const LOCAL_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Check an ISO-8601 extended date-time such as `2023-01-01T00:00:00Z`.
///
/// The offset is optional; date and time must be joined by `T`.
pub fn is_iso8601_datetime(value: &str) -> bool {
    if value.as_bytes().get(10) != Some(&b'T') {
        return false;
    }

    DateTime::parse_from_rfc3339(value).is_ok()
        || DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z").is_ok()
        || LOCAL_DATETIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(value, format).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_valid_urls() {
        assert!(validate_url("http://localhost:3000").is_ok());
        assert!(validate_url("https://sellingpartnerapi-na.amazon.com").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_invalid_urls() {
        assert!(validate_url("").is_err());
        assert!(validate_url("not-a-url").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_iso8601_datetime() {
        assert!(is_iso8601_datetime("2023-01-01T00:00:00Z"));
        assert!(is_iso8601_datetime("2023-01-01T00:00:00.123+09:00"));
        assert!(!is_iso8601_datetime("not-a-date"));
        assert!(!is_iso8601_datetime("2023-01-01"));
    }

    #[test]
    fn test_iso8601_datetime_without_offset() {
        assert!(is_iso8601_datetime("2023-01-01T00:00:00"));
        assert!(is_iso8601_datetime("2023-01-01T12:30:15.250"));
        assert!(is_iso8601_datetime("2023-01-01T12:30"));
        assert!(is_iso8601_datetime("2023-01-01T00:00:00+0900"));
        assert!(!is_iso8601_datetime("2023-01-01T25:00:00"));
    }

    #[test]
    fn test_iso8601_datetime_requires_t_separator() {
        assert!(!is_iso8601_datetime("2023-01-01 00:00:00Z"));
        assert!(!is_iso8601_datetime("2023-01-01 00:00:00"));
        assert!(!is_iso8601_datetime("2023-01-01t00:00:00Z"));
    }

    #[test]
    fn test_violations_display_joins_messages() {
        let mut violations = Violations::new();
        violations.push("a", ViolationRule::Required, "a is required");
        violations.push("b", ViolationRule::Range, "b is out of range");

        assert_eq!(violations.len(), 2);
        assert_eq!(violations.to_string(), "a is required; b is out of range");
        assert!(violations.has_field("b"));
        assert!(violations.has_rule(ViolationRule::Range));
        assert!(!violations.has_rule(ViolationRule::Url));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Violations::new().into_result(7), Ok(7));

        let mut violations = Violations::new();
        violations.push("x", ViolationRule::NonEmpty, "x must not be empty");
        assert!(violations.into_result(7).is_err());
    }
}
