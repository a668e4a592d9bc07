//! Client construction options and their validation

use crate::utils::validation::{ViolationRule, Violations, is_blank, validate_url};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const MIN_TIMEOUT_MS: u64 = 1_000;
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Options accepted by [`crate::api::client::ListingsClient::new`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(default)]
    pub base_url: String,
    /// Request timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout = Some(timeout_ms);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }
}

/// Fields to change when deriving a client with `with_config`.
///
/// `None` keeps the current value; `headers` are merged over the current ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub timeout: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

impl ConfigOverrides {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout = Some(timeout_ms);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }
}

/// Snapshot of the settings a client is using
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    pub base_url: String,
    pub timeout: u64,
    pub headers: HashMap<String, String>,
}

pub fn validate_config(config: &ClientConfig) -> Result<ClientConfig, Violations> {
    let mut violations = Violations::new();

    if is_blank(&config.base_url) {
        violations.push("baseUrl", ViolationRule::Required, "baseUrl is required");
    } else if let Err(reason) = validate_url(&config.base_url) {
        violations.push(
            "baseUrl",
            ViolationRule::Url,
            format!("baseUrl must be a valid http or https URL: {}", reason),
        );
    }

    if let Some(timeout) = config.timeout {
        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&timeout) {
            violations.push(
                "timeout",
                ViolationRule::Range,
                format!(
                    "timeout must be between {} and {} milliseconds (received {})",
                    MIN_TIMEOUT_MS, MAX_TIMEOUT_MS, timeout
                ),
            );
        }
    }

    if let Some(headers) = &config.headers {
        let mut names: Vec<&String> = headers.keys().filter(|name| is_blank(name)).collect();
        names.sort();
        for name in names {
            violations.push(
                "headers",
                ViolationRule::NonEmpty,
                format!("header names must not be empty (received '{}')", name),
            );
        }
    }

    violations.into_result(config.clone())
}
