//! Error types for the WDMMG API client.
//!
//! Every fallible operation in this crate returns [`Result`], whose error
//! type sorts failures into configuration, validation, authentication,
//! transient, and API families.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for WDMMG operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all WDMMG API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The client was set up with bad parameters (missing key, bad URL).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A caller-supplied filter value was rejected before any request was made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The API key was rejected (HTTP 401 or 403).
    #[error("Authentication failed (status {status}): {message}")]
    Authentication {
        /// HTTP status code
        status: u16,
        /// Human-readable error message
        message: String,
    },

    /// Transport-level failure (connection refused, reset, DNS, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out
    #[error("Request timeout")]
    Timeout,

    /// Rate limited by the API (HTTP 429)
    #[error(
        "Rate limited{}",
        .retry_after_secs.map(|secs| format!("; retry after {} seconds", secs)).unwrap_or_default()
    )]
    RateLimited {
        /// Seconds to wait before retrying, when the server said so
        retry_after_secs: Option<u64>,
    },

    /// API returned any other non-success response
    #[error("API error: status={status}, message={message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable error message
        message: String,
        /// Raw response body for debugging
        body: Value,
    },

    /// The server kept signalling more pages past the configured bound.
    #[error("Pagination did not terminate after {max_pages} pages")]
    PaginationLimitExceeded {
        /// The page bound that was hit
        max_pages: usize,
    },

    /// JSON deserialization of a success response failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` if this error is transient and the caller may retry
    /// the whole operation.
    ///
    /// The client never retries on its own.
    ///
    /// # Example
    ///
    /// ```
    /// use wdmmg::Error;
    ///
    /// fn handle_error(err: Error) {
    ///     if err.is_retryable() {
    ///         println!("Retrying operation...");
    ///     }
    /// }
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Timeout | Error::RateLimited { .. }
        )
    }

    /// Returns `true` if the API key was rejected.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication { .. })
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (bad setup, bad filter, 4xx response).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => (400..500).contains(status),
            Error::Config(_) | Error::Validation(_) | Error::UrlParse(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The HTTP status code behind this error, if there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Authentication { status, .. } | Error::Api { status, .. } => Some(*status),
            Error::RateLimited { .. } => Some(429),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Map a transport error, splitting timeouts out of the generic case.
    ///
    /// The request URL is dropped: it can carry the API key as a query
    /// parameter.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::Http(err.without_url())
        }
    }

    /// Create an API error from a response body.
    ///
    /// The body may be `{"error": "text"}`, `{"error": {"message": ...}}`,
    /// `{"message": ...}`, or anything else.
    pub(crate) fn from_api_response(status: u16, body: Value) -> Self {
        let message = error_message(&body).unwrap_or_else(|| "Unknown API error".to_string());

        Error::Api {
            status,
            message,
            body,
        }
    }
}

/// Pull a human-readable message out of an error body.
pub(crate) fn error_message(body: &Value) -> Option<String> {
    match body.get("error") {
        Some(Value::String(s)) => return Some(s.clone()),
        Some(err) => {
            if let Some(m) = err.get("message").and_then(|m| m.as_str()) {
                return Some(m.to_string());
            }
        }
        None => {}
    }

    match body {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => body
            .get("message")
            .and_then(|m| m.as_str())
            .map(String::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        assert!(Error::Timeout.is_retryable());
        assert!(Error::RateLimited { retry_after_secs: Some(30) }.is_retryable());
        assert!(!Error::Validation("bad".into()).is_retryable());
        assert!(!Error::PaginationLimitExceeded { max_pages: 10 }.is_retryable());
    }

    #[test]
    fn test_error_auth() {
        let err = Error::Authentication {
            status: 401,
            message: "Invalid API key".into(),
        };
        assert!(err.is_auth_error());
        assert_eq!(err.status(), Some(401));
        assert!(!Error::Timeout.is_auth_error());
    }

    #[test]
    fn test_client_and_server_errors() {
        let not_found = Error::from_api_response(404, serde_json::json!({}));
        assert!(not_found.is_client_error());
        assert!(!not_found.is_server_error());

        let unavailable = Error::from_api_response(503, Value::Null);
        assert!(unavailable.is_server_error());
        assert!(Error::Config("no key".into()).is_client_error());
    }

    #[test]
    fn test_from_api_response_nested() {
        let body = serde_json::json!({
            "error": {
                "code": "INVALID_RANGE",
                "message": "start_date must be before end_date"
            }
        });

        match Error::from_api_response(400, body) {
            Error::Api {
                status, message, ..
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "start_date must be before end_date");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_api_response_flat() {
        let body = serde_json::json!({ "error": "Endpoint not found" });
        match Error::from_api_response(404, body) {
            Error::Api { message, .. } => assert_eq!(message, "Endpoint not found"),
            other => panic!("Expected Api error, got {:?}", other),
        }

        match Error::from_api_response(500, Value::Null) {
            Error::Api { message, .. } => assert_eq!(message, "Unknown API error"),
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_limited_display() {
        assert_eq!(
            Error::RateLimited { retry_after_secs: Some(12) }.to_string(),
            "Rate limited; retry after 12 seconds"
        );
        assert_eq!(
            Error::RateLimited { retry_after_secs: None }.to_string(),
            "Rate limited"
        );
    }
}
