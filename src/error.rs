use crate::utils::lenient::lenient_string;
use crate::utils::validation::Violations;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ConfigurationError: {0}")]
    Config(#[from] ConfigError),
    #[error("ValidationError: {0}")]
    Validation(#[from] ValidationError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("DecodeError: failed to parse response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },
}

/// Client construction options were rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid client configuration: {violations}")]
    Invalid { violations: Violations },
}

impl ConfigError {
    pub fn violations(&self) -> &Violations {
        match self {
            ConfigError::Invalid { violations } => violations,
        }
    }
}

/// Request parameters were rejected before anything was sent
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid request parameters: {violations}")]
    InvalidParameters { violations: Violations },
}

impl ValidationError {
    pub fn violations(&self) -> &Violations {
        match self {
            ValidationError::InvalidParameters { violations } => violations,
        }
    }
}

/// One entry of the `errors` list returned by the Selling Partner API.
///
/// `details` is kept as whatever JSON the server sent, and members beyond
/// `code`/`message`/`details` are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ErrorDetail {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: details.map(Value::String),
            extra: Map::new(),
        }
    }

    /// `details` when the server sent it as a string
    pub fn details_text(&self) -> Option<&str> {
        self.details.as_ref().and_then(Value::as_str)
    }
}

/// A failed request, normalized from whatever the transport reported.
///
/// `status_code` is 0 when no HTTP response was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub status_code: u16,
    pub errors: Vec<ErrorDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<String>,
}

impl ApiError {
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    pub fn is_rate_limit_error(&self) -> bool {
        self.status_code == 429
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self.status_code, 401 | 403)
    }

    /// Rate-limited, server-side and network failures are worth retrying by the caller.
    /// A request that could not be built will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        self.is_rate_limit_error()
            || self.is_server_error()
            || (self.status_code == 0 && self.first_code() == Some("NETWORK_ERROR"))
    }

    pub fn first_code(&self) -> Option<&str> {
        self.errors.first().map(|e| e.code.as_str())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect::<Vec<_>>()
            .join(", ");

        if self.status_code == 0 {
            write!(f, "request failed: {}", summary)?;
        } else {
            write!(f, "HTTP {}: {}", self.status_code, summary)?;
        }

        if let Some(request_id) = &self.request_id {
            write!(f, " (request id {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration save failed: {message}")]
    ConfigSaveFailed { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Validation(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => {
                if api_error.is_auth_error() || api_error.is_server_error() {
                    ErrorSeverity::High
                } else {
                    ErrorSeverity::Medium
                }
            }
            AppError::Decode(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
        }
    }

    /// Violations behind a configuration or validation failure, if any
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            AppError::Config(e) => Some(e.violations()),
            AppError::Validation(e) => Some(e.violations()),
            _ => None,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Api(e) if e.is_auth_error() => Some(
                "Check that SP_API_ACCESS_TOKEN holds a current LWA access token".to_string(),
            ),
            AppError::Api(e) if e.is_rate_limit_error() => {
                let limit = e
                    .rate_limit
                    .as_deref()
                    .map(|l| format!(" (limit {} requests/s)", l))
                    .unwrap_or_default();
                Some(format!("Request rate exceeded{}, wait and try again", limit))
            }
            AppError::Api(e) if e.is_retryable() => {
                Some("The failure is transient, try the request again".to_string())
            }
            AppError::Config(_) => Some(
                "'sp-listings config set endpoint <url>' to fix the profile endpoint".to_string(),
            ),
            AppError::Cli(CliError::ProfileNotFound { .. }) => {
                Some("'sp-listings config set region na' creates the profile".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::ViolationRule;

    fn api_error(status_code: u16) -> ApiError {
        ApiError {
            status_code,
            errors: vec![ErrorDetail::new(
                format!("HTTP_{}", status_code),
                "message",
                None,
            )],
            request_id: None,
            rate_limit: None,
        }
    }

    #[test]
    fn test_api_error_classification() {
        assert!(api_error(400).is_client_error());
        assert!(!api_error(400).is_server_error());
        assert!(api_error(503).is_server_error());
        assert!(api_error(429).is_rate_limit_error());
        assert!(api_error(429).is_client_error());
        assert!(api_error(401).is_auth_error());
        assert!(api_error(403).is_auth_error());
        assert!(!api_error(404).is_auth_error());
        assert!(!api_error(0).is_client_error());
        assert!(!api_error(0).is_server_error());
    }

    #[test]
    fn test_api_error_display() {
        let mut err = api_error(404);
        err.request_id = Some("req-1".to_string());
        assert_eq!(err.to_string(), "HTTP 404: HTTP_404: message (request id req-1)");

        let network = ApiError {
            status_code: 0,
            errors: vec![ErrorDetail::new("NETWORK_ERROR", "boom", None)],
            request_id: None,
            rate_limit: None,
        };
        assert_eq!(network.to_string(), "request failed: NETWORK_ERROR: boom");
    }

    #[test]
    fn test_api_error_serializes_camel_case() {
        let mut err = api_error(429);
        err.rate_limit = Some("5".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["statusCode"], 429);
        assert_eq!(json["rateLimit"], "5");
        assert!(json.get("requestId").is_none());
    }

    #[test]
    fn test_app_error_violations() {
        let mut violations = Violations::new();
        violations.push("sellerId", ViolationRule::Required, "sellerId is required");
        let app_err = AppError::Validation(ValidationError::InvalidParameters {
            violations: violations.clone(),
        });

        assert_eq!(app_err.violations(), Some(&violations));
        assert_eq!(app_err.severity(), ErrorSeverity::Medium);
        assert_eq!(
            format!("{}", app_err),
            "ValidationError: Invalid request parameters: sellerId is required"
        );

        let app_err = AppError::Api(api_error(500));
        assert!(app_err.violations().is_none());
        assert_eq!(app_err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_setup_failure_is_not_retryable() {
        let setup = ApiError {
            status_code: 0,
            errors: vec![ErrorDetail::new("REQUEST_SETUP_ERROR", "bad header", None)],
            request_id: None,
            rate_limit: None,
        };
        assert!(!setup.is_retryable());
        assert!(AppError::Api(setup).troubleshooting_hint().is_none());

        let network = ApiError {
            errors: vec![ErrorDetail::new("NETWORK_ERROR", "timed out", None)],
            ..api_error(0)
        };
        assert!(network.is_retryable());
        assert!(api_error(429).is_retryable());
        assert!(api_error(502).is_retryable());
        assert!(!api_error(400).is_retryable());
    }

    #[test]
    fn test_troubleshooting_hints() {
        let mut limited = api_error(429);
        limited.rate_limit = Some("5.0".to_string());
        let hint = AppError::Api(limited).troubleshooting_hint().unwrap();
        assert!(hint.contains("5.0"));

        assert!(AppError::Api(api_error(403)).troubleshooting_hint().is_some());
        assert!(AppError::Api(api_error(404)).troubleshooting_hint().is_none());
    }
}
