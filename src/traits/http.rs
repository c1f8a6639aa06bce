//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction for HTTP operations, enabling
//! dependency injection and mocking in tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;
use thiserror::Error;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// A streaming response body: chunks arrive at arbitrary boundaries.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Bytes,
}

impl HttpResponse {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self { status, body }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text, lossily decoded.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP transport errors.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    /// Connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    /// Request timed out
    #[error("request timeout: {0}")]
    Timeout(String),
    /// Server returned an error status before a body stream was established
    #[error("server error ({status}): {message}")]
    Status { status: u16, message: String },
    /// The response body was aborted mid-read
    #[error("io error: {0}")]
    Io(String),
    /// Other transport error
    #[error("http error: {0}")]
    Other(String),
}

/// Trait for HTTP client operations.
///
/// Implementations include the production reqwest-based client
/// ([`crate::adapters::ReqwestHttpClient`]) and a scriptable mock
/// ([`crate::adapters::MockHttpClient`]) for tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request.
    async fn get(&self, url: &str, headers: &Headers) -> Result<HttpResponse, HttpError>;

    /// Perform a POST request with a string body.
    async fn post(&self, url: &str, body: &str, headers: &Headers)
        -> Result<HttpResponse, HttpError>;

    /// Perform a POST request and return the response body as a byte stream.
    ///
    /// Used for the streaming chat endpoint, where the body is received
    /// incrementally. A non-2xx status is reported as [`HttpError::Status`]
    /// before any stream is returned.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_success() {
        assert!(HttpResponse::new(200, Bytes::new()).is_success());
        assert!(HttpResponse::new(204, Bytes::new()).is_success());
        assert!(HttpResponse::new(299, Bytes::new()).is_success());
        assert!(!HttpResponse::new(302, Bytes::new()).is_success());
        assert!(!HttpResponse::new(404, Bytes::new()).is_success());
        assert!(!HttpResponse::new(500, Bytes::new()).is_success());
    }

    #[test]
    fn test_response_text() {
        let response = HttpResponse::new(200, Bytes::from("Hello, World!"));
        assert_eq!(response.text(), "Hello, World!");
    }

    #[test]
    fn test_response_json() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct TestData {
            name: String,
            value: i32,
        }

        let response = HttpResponse::new(200, Bytes::from(r#"{"name":"test","value":42}"#));
        let data: TestData = response.json().unwrap();
        assert_eq!(
            data,
            TestData {
                name: "test".to_string(),
                value: 42
            }
        );
    }

    #[test]
    fn test_http_error_display() {
        assert_eq!(
            HttpError::ConnectionFailed("refused".to_string()).to_string(),
            "connection failed: refused"
        );
        assert_eq!(
            HttpError::Status {
                status: 500,
                message: "boom".to_string()
            }
            .to_string(),
            "server error (500): boom"
        );
        assert_eq!(
            HttpError::Io("read failed".to_string()).to_string(),
            "io error: read failed"
        );
    }
}
