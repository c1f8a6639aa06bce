//! API error types.

use serde_json::Value;
use thiserror::Error;

use crate::traits::{HttpError, HttpResponse, Translator};

/// Errors returned by [`crate::ApiClient`] operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never reached the server, or the connection broke.
    #[error(transparent)]
    Transport(#[from] HttpError),
    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Build a [`Status`](ApiError::Status) error from a non-success
    /// response, pulling a human-readable message out of the JSON body when
    /// one is present.
    pub(crate) fn from_response(response: &HttpResponse) -> Self {
        let body = response.text();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .or_else(|| value.get("error"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or(body);
        ApiError::Status {
            status: response.status,
            message,
        }
    }

    /// Stable key identifying the error category, for hosts that localize.
    pub fn message_key(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "error.transport",
            ApiError::Status { .. } => "error.server",
            ApiError::Decode(_) => "error.decode",
        }
    }

    /// Localized display text: the translated category followed by the
    /// underlying detail.
    pub fn user_message(&self, translator: &dyn Translator) -> String {
        format!("{}: {}", translator.translate(self.message_key()), self)
    }
}
