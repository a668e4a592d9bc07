//! Turns failed exchanges into a single [`ApiError`] shape

use crate::api::transport::{HttpResponse, TransportFailure};
use crate::error::{ApiError, ErrorDetail};
use serde_json::Value;

pub const REQUEST_ID_HEADER: &str = "x-amzn-requestid";
pub const RATE_LIMIT_HEADER: &str = "x-amzn-ratelimit-limit";

/// How a request failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailedExchange {
    /// A response arrived with status >= 400
    Http(HttpResponse),
    /// The request went out but no response came back
    Connection(String),
    /// The request could not be built or sent
    Setup(String),
}

impl From<TransportFailure> for FailedExchange {
    fn from(failure: TransportFailure) -> Self {
        match failure {
            TransportFailure::Connection(reason) => FailedExchange::Connection(reason),
            TransportFailure::Setup(reason) => FailedExchange::Setup(reason),
        }
    }
}

pub fn normalize(exchange: FailedExchange) -> ApiError {
    match exchange {
        FailedExchange::Http(response) => normalize_response(response),
        FailedExchange::Connection(reason) => ApiError {
            status_code: 0,
            errors: vec![ErrorDetail::new(
                "NETWORK_ERROR",
                "Network error occurred while making the request",
                Some(reason),
            )],
            request_id: None,
            rate_limit: None,
        },
        FailedExchange::Setup(reason) => ApiError {
            status_code: 0,
            errors: vec![ErrorDetail::new(
                "REQUEST_SETUP_ERROR",
                "Error setting up the request",
                Some(reason),
            )],
            request_id: None,
            rate_limit: None,
        },
    }
}

fn normalize_response(response: HttpResponse) -> ApiError {
    let request_id = response.header(REQUEST_ID_HEADER).map(str::to_string);
    let rate_limit = response.header(RATE_LIMIT_HEADER).map(str::to_string);

    let errors = body_errors(&response.body).unwrap_or_else(|| vec![synthesize_error(&response)]);

    ApiError {
        status_code: response.status,
        errors,
        request_id,
        rate_limit,
    }
}

/// The body's own `errors` array, entry by entry.
///
/// A non-object entry is kept whole as the `details` of an otherwise empty error.
fn body_errors(body: &str) -> Option<Vec<ErrorDetail>> {
    let mut value = serde_json::from_str::<Value>(body).ok()?;
    let entries = match value.get_mut("errors")?.take() {
        Value::Array(entries) => entries,
        _ => return None,
    };

    let errors = entries
        .into_iter()
        .map(|entry| {
            serde_json::from_value::<ErrorDetail>(entry.clone())
                .unwrap_or_else(|_| detail_only(entry))
        })
        .collect();
    Some(errors)
}

fn detail_only(details: Value) -> ErrorDetail {
    ErrorDetail {
        details: Some(details),
        ..ErrorDetail::new("", "", None)
    }
}

fn synthesize_error(response: &HttpResponse) -> ErrorDetail {
    let message = status_message(response.status)
        .map(str::to_string)
        .or_else(|| response.message.clone())
        .unwrap_or_else(|| format!("HTTP {} error", response.status));

    ErrorDetail::new(
        format!("HTTP_{}", response.status),
        message,
        body_details(&response.body),
    )
}

/// JSON rendering of the body; non-JSON text is rendered as a JSON string
fn body_details(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    let value = serde_json::from_str::<Value>(body)
        .unwrap_or_else(|_| Value::String(body.to_string()));
    serde_json::to_string(&value).ok()
}

/// Documented meaning of the status codes the endpoint returns
pub fn status_message(status: u16) -> Option<&'static str> {
    let message = match status {
        400 => "Request has missing or invalid parameters and cannot be parsed",
        401 => "The request is unauthorized. Check your authentication credentials",
        403 => {
            "Access to the resource is forbidden. Possible reasons include Access Denied, Unauthorized, Expired Token, or Invalid Signature"
        }
        404 => "The resource specified does not exist",
        413 => "The request size exceeded the maximum accepted size",
        415 => "The request payload is in an unsupported format",
        429 => "The frequency of requests was greater than allowed",
        500 => {
            "An unexpected condition occurred that prevented the server from fulfilling the request"
        }
        502 => "Bad gateway - the server received an invalid response from an upstream server",
        503 => "Temporary overloading or maintenance of the server",
        504 => {
            "Gateway timeout - the server did not receive a timely response from an upstream server"
        }
        _ => return None,
    };
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rate_limited_without_errors_body() {
        let response = HttpResponse::new(429, "")
            .with_header("X-Amzn-RequestId", "req-429")
            .with_header("x-amzn-RateLimit-Limit", "5.0");
        let error = normalize(FailedExchange::Http(response));

        assert_eq!(error.status_code, 429);
        assert_eq!(error.errors.len(), 1);
        assert_eq!(error.errors[0].code, "HTTP_429");
        assert_eq!(
            error.errors[0].message,
            "The frequency of requests was greater than allowed"
        );
        assert!(error.errors[0].details.is_none());
        assert_eq!(error.request_id.as_deref(), Some("req-429"));
        assert_eq!(error.rate_limit.as_deref(), Some("5.0"));
        assert!(error.is_rate_limit_error());
    }

    #[test]
    fn test_errors_body_is_used_verbatim() {
        let body = r#"{"errors":[
            {"code":"InvalidInput","message":"m"},
            {"code":"Other","message":"n","details":"d"}
        ]}"#;
        let error = normalize(FailedExchange::Http(HttpResponse::new(400, body)));

        assert_eq!(
            error.errors,
            vec![
                ErrorDetail::new("InvalidInput", "m", None),
                ErrorDetail::new("Other", "n", Some("d".to_string())),
            ]
        );
        assert!(error.is_client_error());
        assert!(error.request_id.is_none());
    }

    #[test]
    fn test_errors_body_keeps_structured_details() {
        let body = r#"{"errors":[
            {"code":"InvalidInput","message":"m","details":{"field":"sku"},"trace":"t-1"}
        ]}"#;
        let error = normalize(FailedExchange::Http(HttpResponse::new(400, body)));

        assert_eq!(error.errors.len(), 1);
        let detail = &error.errors[0];
        assert_eq!(detail.code, "InvalidInput");
        assert_eq!(detail.message, "m");
        assert_eq!(detail.details, Some(json!({ "field": "sku" })));
        assert_eq!(detail.extra["trace"], "t-1");
        assert_eq!(
            serde_json::to_value(&error.errors).unwrap(),
            json!([{
                "code": "InvalidInput",
                "message": "m",
                "details": { "field": "sku" },
                "trace": "t-1"
            }])
        );
    }

    #[test]
    fn test_errors_entries_of_any_shape_are_kept() {
        let body = r#"{"errors":[{"code":null,"message":"m"},"plain text"]}"#;
        let error = normalize(FailedExchange::Http(HttpResponse::new(400, body)));

        assert_eq!(error.errors.len(), 2);
        assert_eq!(error.errors[0].code, "");
        assert_eq!(error.errors[0].message, "m");
        assert_eq!(error.errors[1].details_text(), Some("plain text"));

        // `errors` that is not an array falls back to a synthesized error
        let response = HttpResponse::new(400, r#"{"errors":"bad"}"#);
        let error = normalize(FailedExchange::Http(response));
        assert_eq!(error.first_code(), Some("HTTP_400"));
    }

    #[test]
    fn test_body_without_errors_becomes_details() {
        let body = r#"{ "message": "upstream exploded" }"#;
        let error = normalize(FailedExchange::Http(HttpResponse::new(502, body)));

        assert_eq!(error.errors[0].code, "HTTP_502");
        assert_eq!(
            error.errors[0].details_text(),
            Some(r#"{"message":"upstream exploded"}"#)
        );
        assert!(error.is_server_error());

        let error = normalize(FailedExchange::Http(HttpResponse::new(503, "Service Unavailable")));
        assert_eq!(error.errors[0].details_text(), Some("\"Service Unavailable\""));
    }

    #[test]
    fn test_unknown_status_message_fallbacks() {
        let error = normalize(FailedExchange::Http(HttpResponse::new(418, "")));
        assert_eq!(error.errors[0].message, "HTTP 418 error");

        let mut response = HttpResponse::new(418, "");
        response.message = Some("I'm a teapot".to_string());
        let error = normalize(FailedExchange::Http(response));
        assert_eq!(error.errors[0].message, "I'm a teapot");

        // The documented message wins over the transport's
        let mut response = HttpResponse::new(404, "");
        response.message = Some("Not Found".to_string());
        let error = normalize(FailedExchange::Http(response));
        assert_eq!(error.errors[0].message, "The resource specified does not exist");
    }

    #[test]
    fn test_connection_failure() {
        let error =
            normalize(TransportFailure::Connection("connection refused".to_string()).into());
        assert_eq!(error.status_code, 0);
        assert_eq!(error.errors[0].code, "NETWORK_ERROR");
        assert_eq!(
            error.errors[0].message,
            "Network error occurred while making the request"
        );
        assert_eq!(error.errors[0].details_text(), Some("connection refused"));
        assert!(!error.is_client_error());
        assert!(!error.is_server_error());
    }

    #[test]
    fn test_setup_failure() {
        let error = normalize(TransportFailure::Setup("bad header".to_string()).into());
        assert_eq!(error.status_code, 0);
        assert_eq!(error.errors[0].code, "REQUEST_SETUP_ERROR");
        assert_eq!(error.errors[0].message, "Error setting up the request");
        assert_eq!(error.errors[0].details_text(), Some("bad header"));
    }

    #[test]
    fn test_status_message_table() {
        assert!(status_message(401).unwrap().contains("unauthorized"));
        assert!(status_message(504).unwrap().starts_with("Gateway timeout"));
        assert!(status_message(405).is_none());
    }
}
