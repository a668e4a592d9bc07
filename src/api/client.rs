use crate::api::config::{
    ClientConfig, ConfigOverrides, DEFAULT_TIMEOUT_MS, EffectiveConfig, validate_config,
};
use crate::api::models::{SearchParams, SearchResponse};
use crate::api::query::{search_path, to_query_string};
use crate::api::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::core::normalizer::{FailedExchange, normalize};
use crate::core::params::validate_params;
use crate::error::{AppError, ConfigError, ValidationError};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Headers sent with every request unless overridden
pub fn base_headers() -> HashMap<String, String> {
    HashMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
    ])
}

/// Client for the Search Listings Items operation.
///
/// Settings are fixed at construction except for the default headers, which
/// `update_headers` and `remove_headers` change in place. Use `with_config` for
/// a separate instance with different settings.
#[derive(Debug, Clone)]
pub struct ListingsClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    timeout: u64,
    default_headers: HashMap<String, String>,
}

impl ListingsClient {
    /// Create a client using the default reqwest transport
    pub fn new(config: ClientConfig) -> Result<Self, AppError> {
        let config = checked(config)?;
        let transport = ReqwestTransport::new().map_err(|e| normalize(e.into()))?;
        Ok(Self::from_checked(config, Arc::new(transport)))
    }

    /// Create a client that sends requests through the given transport
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, AppError> {
        let config = checked(config)?;
        Ok(Self::from_checked(config, transport))
    }

    fn from_checked(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let mut default_headers = base_headers();
        default_headers.extend(config.headers.unwrap_or_default());

        Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout.unwrap_or(DEFAULT_TIMEOUT_MS),
            default_headers,
        }
    }

    /// Search a seller's listings items.
    ///
    /// Parameters are validated first; nothing is sent when they are invalid.
    /// Any response with status >= 400, and any transport failure, comes back
    /// as [`AppError::Api`].
    pub async fn search_listings_items(
        &self,
        params: &SearchParams,
    ) -> Result<SearchResponse, AppError> {
        let validated = validate_params(params)
            .map_err(|violations| ValidationError::InvalidParameters { violations })?;

        let request = self.build_request(&validated.seller_id, &to_query_string(&validated));
        log::debug!("GET {}", request.url);

        let response = match self.transport.get(request).await {
            Ok(response) if !response.is_failure() => response,
            Ok(response) => return Err(self.fail(FailedExchange::Http(response))),
            Err(failure) => return Err(self.fail(failure.into())),
        };

        log::debug!("search listings items succeeded with status {}", response.status);
        Ok(SearchResponse::from_body(&response.body)?)
    }

    fn fail(&self, exchange: FailedExchange) -> AppError {
        let error = normalize(exchange);
        log::warn!(
            "search listings items failed: status={} code={} request_id={}",
            error.status_code,
            error.first_code().unwrap_or("-"),
            error.request_id.as_deref().unwrap_or("-")
        );
        AppError::Api(error)
    }

    pub fn build_request(&self, seller_id: &str, query: &str) -> HttpRequest {
        let mut url = format!("{}{}", self.base_url, search_path(seller_id));
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }

        let mut headers: Vec<(String, String)> = self
            .default_headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        headers.sort();

        HttpRequest {
            url,
            headers,
            timeout: Duration::from_millis(self.timeout),
        }
    }

    pub fn get_config(&self) -> EffectiveConfig {
        EffectiveConfig {
            base_url: self.base_url.clone(),
            timeout: self.timeout,
            headers: self.default_headers.clone(),
        }
    }

    pub fn update_headers(&mut self, headers: HashMap<String, String>) {
        self.default_headers.extend(headers);
    }

    pub fn remove_headers<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.default_headers.remove(name.as_ref());
        }
    }

    /// Derive a new client; the transport is shared, everything else is copied
    pub fn with_config(&self, overrides: ConfigOverrides) -> Result<Self, AppError> {
        let mut headers = self.default_headers.clone();
        headers.extend(overrides.headers.unwrap_or_default());

        let config = ClientConfig {
            base_url: overrides.base_url.unwrap_or_else(|| self.base_url.clone()),
            timeout: Some(overrides.timeout.unwrap_or(self.timeout)),
            headers: Some(headers),
        };
        Self::with_transport(config, Arc::clone(&self.transport))
    }
}

fn checked(config: ClientConfig) -> Result<ClientConfig, ConfigError> {
    validate_config(&config).map_err(|violations| ConfigError::Invalid { violations })
}
