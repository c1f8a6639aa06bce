//! Mock HTTP client for testing.
//!
//! Scriptable implementation of [`HttpClient`] that records every request and
//! returns preconfigured responses. Streaming responses are scripted as a
//! sequence of chunk results, so tests control exactly where byte boundaries
//! fall and where transport failures occur.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, HttpResponse};

/// A request captured by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

/// A scripted response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this response.
    Success(HttpResponse),
    /// Fail with this error.
    Error(HttpError),
    /// For `post_stream`: yield these chunk results in order, then end.
    Stream(Vec<Result<Bytes, HttpError>>),
}

impl MockResponse {
    /// A JSON success response.
    pub fn json(status: u16, body: &str) -> Self {
        Self::Success(HttpResponse::new(status, Bytes::from(body.to_string())))
    }

    /// A stream that yields each string as one chunk.
    pub fn stream_chunks(chunks: &[&str]) -> Self {
        Self::Stream(
            chunks
                .iter()
                .map(|c| Ok(Bytes::from(c.to_string())))
                .collect(),
        )
    }
}

#[derive(Debug, Default)]
struct MockState {
    responses: HashMap<String, MockResponse>,
    prefix_responses: Vec<(String, MockResponse)>,
    default_response: Option<MockResponse>,
    requests: Vec<RecordedRequest>,
}

/// Scriptable HTTP client for tests.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<MockState>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for an exact URL.
    pub fn on(&self, url: &str, response: MockResponse) {
        let mut state = self.state.lock().unwrap();
        state.responses.insert(url.to_string(), response);
    }

    /// Script a response for any URL starting with `prefix`. Exact matches
    /// take precedence.
    pub fn on_prefix(&self, prefix: &str, response: MockResponse) {
        let mut state = self.state.lock().unwrap();
        state.prefix_responses.push((prefix.to_string(), response));
    }

    /// Script a fallback response for unmatched URLs.
    pub fn on_any(&self, response: MockResponse) {
        let mut state = self.state.lock().unwrap();
        state.default_response = Some(response);
    }

    /// All requests seen so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }

    fn record_and_lookup(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        body: Option<&str>,
    ) -> Option<MockResponse> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body: body.map(|b| b.to_string()),
        });

        if let Some(response) = state.responses.get(url) {
            return Some(response.clone());
        }
        for (prefix, response) in &state.prefix_responses {
            if url.starts_with(prefix.as_str()) {
                return Some(response.clone());
            }
        }
        state.default_response.clone()
    }
}

fn unmatched(url: &str) -> HttpError {
    HttpError::Other(format!("no mock response for {url}"))
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<HttpResponse, HttpError> {
        match self.record_and_lookup("GET", url, headers, None) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Stream(_)) => Err(HttpError::Other(
                "stream response scripted for non-stream request".to_string(),
            )),
            None => Err(unmatched(url)),
        }
    }

    async fn post(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<HttpResponse, HttpError> {
        match self.record_and_lookup("POST", url, headers, Some(body)) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Stream(_)) => Err(HttpError::Other(
                "stream response scripted for non-stream request".to_string(),
            )),
            None => Err(unmatched(url)),
        }
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        match self.record_and_lookup("POST", url, headers, Some(body)) {
            Some(MockResponse::Stream(chunks)) => Ok(Box::pin(futures::stream::iter(chunks))),
            Some(MockResponse::Success(response)) => {
                // Treat a scripted response body as a single-chunk stream.
                Ok(Box::pin(futures::stream::iter(vec![Ok(response.body)])))
            }
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(unmatched(url)),
        }
    }
}
