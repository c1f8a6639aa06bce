//! Streaming chat consumption.

use futures_util::StreamExt;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::FileChange;
use crate::sse::{EventParser, LineBuffer, StreamEvent};

/// Receives stream events as they arrive.
///
/// `on_token` fires once per token delta, in order; `on_file_changes` fires
/// at most once per response. Exactly one of `on_done` / `on_error` fires
/// when the server terminates the stream; neither fires when the connection
/// ends without a terminal event or the stream is cancelled.
pub trait ChatHandler: Send {
    fn on_token(&mut self, token: &str);
    fn on_file_changes(&mut self, changes: Vec<FileChange>);
    fn on_done(&mut self, tokens_used: u32, new_balance: u32);
    fn on_error(&mut self, message: &str);
}

/// How a streaming chat ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    /// The server sent a `done` event.
    Done,
    /// The server sent an `error` event.
    Errored,
    /// The connection closed without a terminal event.
    Incomplete,
    /// The caller cancelled.
    Cancelled,
}

impl ApiClient {
    /// Send a chat message and consume the reply incrementally.
    ///
    /// Events are delivered to `handler` as they arrive. The first terminal
    /// event ends consumption; any bytes buffered after it are dropped. On a
    /// mid-stream transport failure the error is returned after any events
    /// already delivered.
    pub async fn stream_chat(
        &self,
        request_id: &str,
        message: &str,
        handler: &mut dyn ChatHandler,
        cancel: Option<CancellationToken>,
    ) -> Result<StreamEnd, ApiError> {
        let url = self.url(&format!("/api/requests/{request_id}/chat/stream"));
        let body = json!({ "message": message }).to_string();
        let mut headers = self.headers();
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        let cancel = cancel.unwrap_or_default();
        let mut stream = self.http.post_stream(&url, &body, &headers).await?;

        let mut lines = LineBuffer::new();
        let mut parser = EventParser::new();

        loop {
            let chunk = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(request_id, "chat stream cancelled");
                    return Ok(StreamEnd::Cancelled);
                }
                chunk = stream.next() => chunk,
            };

            match chunk {
                None => {
                    if !lines.fragment().is_empty() {
                        debug!(
                            request_id,
                            fragment = lines.fragment(),
                            "stream ended with unterminated data"
                        );
                    }
                    return Ok(StreamEnd::Incomplete);
                }
                Some(Err(err)) => {
                    warn!(request_id, error = %err, "chat stream transport failure");
                    return Err(err.into());
                }
                Some(Ok(bytes)) => {
                    for line in lines.push(&bytes) {
                        match parser.feed_line(&line) {
                            Some(StreamEvent::Token { token }) => handler.on_token(&token),
                            Some(StreamEvent::FileChanges { changes }) => {
                                handler.on_file_changes(changes)
                            }
                            Some(StreamEvent::Done {
                                tokens_used,
                                new_balance,
                            }) => {
                                handler.on_done(tokens_used, new_balance);
                                return Ok(StreamEnd::Done);
                            }
                            Some(StreamEvent::Error { message }) => {
                                handler.on_error(&message);
                                return Ok(StreamEnd::Errored);
                            }
                            None => {}
                        }
                    }
                }
            }
        }
    }
}
