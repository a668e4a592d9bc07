//! HTTP transport used by the listings client
//!
//! The client never touches reqwest directly. It hands an [`HttpRequest`] to
//! an [`HttpTransport`] and gets back either a response (any status) or a
//! [`TransportFailure`]. Status interpretation stays with the client.

use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

const USER_AGENT: &str = concat!("sp-listings/", env!("CARGO_PKG_VERSION"));

/// A GET request described as plain data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

/// A received HTTP response, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
    /// Transport-supplied description of the outcome, if it has one
    pub message: Option<String>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
            message: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_failure(&self) -> bool {
        self.status >= 400
    }
}

/// The request produced no HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// Sent, but nothing came back (refused, reset, timed out)
    Connection(String),
    /// Could not be built or sent at all
    Setup(String),
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::Connection(reason) => write!(f, "connection failure: {}", reason),
            TransportFailure::Setup(reason) => write!(f, "request setup failure: {}", reason),
        }
    }
}

impl std::error::Error for TransportFailure {}

#[async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure>;
}

/// Default transport backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportFailure> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportFailure::Setup(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure> {
        let mut builder = self.client.get(&request.url).timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let built = builder.build().map_err(classify_error)?;
        let response = self.client.execute(built).await.map_err(classify_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(classify_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
            message: None,
        })
    }
}

fn classify_error(error: reqwest::Error) -> TransportFailure {
    if error.is_builder() {
        TransportFailure::Setup(error.to_string())
    } else if error.is_timeout() {
        TransportFailure::Connection(format!("request timed out: {}", error))
    } else {
        TransportFailure::Connection(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str, headers: Vec<(String, String)>) -> HttpRequest {
        HttpRequest {
            url: url.to_string(),
            headers,
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = HttpResponse::new(429, "").with_header("X-Amzn-RequestId", "req-1");
        assert_eq!(response.header("x-amzn-requestid"), Some("req-1"));
        assert_eq!(response.header("X-AMZN-REQUESTID"), Some("req-1"));
        assert!(response.header("x-amzn-ratelimit-limit").is_none());
        assert!(response.is_failure());
        assert!(!HttpResponse::new(204, "").is_failure());
    }

    #[tokio::test]
    async fn test_invalid_url_is_setup_failure() {
        let transport = ReqwestTransport::new().unwrap();
        let result = transport.get(request("not a url", vec![])).await;
        assert!(matches!(result, Err(TransportFailure::Setup(_))));
    }

    #[tokio::test]
    async fn test_invalid_header_is_setup_failure() {
        let transport = ReqwestTransport::new().unwrap();
        let headers = vec![("bad header".to_string(), "v".to_string())];
        let result = transport.get(request("http://127.0.0.1:9/", headers)).await;
        assert!(matches!(result, Err(TransportFailure::Setup(_))));
    }

    #[tokio::test]
    async fn test_refused_connection_is_connection_failure() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let transport = ReqwestTransport::new().unwrap();
        let url = format!("http://127.0.0.1:{}/", port);
        let result = transport.get(request(&url, vec![])).await;
        assert!(matches!(result, Err(TransportFailure::Connection(_))));
    }
}
