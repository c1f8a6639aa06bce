//! Line-to-event parsing.

use serde::Deserialize;
use serde_json::Value;

use crate::models::FileChange;
use crate::sse::{StreamEvent, DEFAULT_EVENT_TYPE};

#[derive(Debug, Deserialize, Default)]
struct FileChangesPayload {
    #[serde(default)]
    changes: Vec<FileChange>,
}

#[derive(Debug, Deserialize, Default)]
struct DonePayload {
    #[serde(rename = "tokensUsed", default)]
    tokens_used: u32,
    #[serde(rename = "newBalance", default)]
    new_balance: u32,
}

/// Stateful event parser.
///
/// An `event:` line sets the type of the next event; a `data:` line carries
/// the payload and dispatches immediately, resetting the type back to
/// [`DEFAULT_EVENT_TYPE`]. Any other line (blank lines included) is ignored.
#[derive(Debug)]
pub struct EventParser {
    event_type: String,
}

impl Default for EventParser {
    fn default() -> Self {
        Self {
            event_type: DEFAULT_EVENT_TYPE.to_string(),
        }
    }
}

impl EventParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one complete line. Returns an event when the line was a `data:`
    /// line with a recognizable payload.
    ///
    /// Malformed JSON and payloads missing their expected field are skipped
    /// so one bad event never kills the stream.
    pub fn feed_line(&mut self, line: &str) -> Option<StreamEvent> {
        if let Some(name) = line.strip_prefix("event: ") {
            self.event_type = name.trim().to_string();
            return None;
        }

        let data = line.strip_prefix("data: ")?;
        let event_type =
            std::mem::replace(&mut self.event_type, DEFAULT_EVENT_TYPE.to_string());

        let value: Value = match serde_json::from_str(data) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(event_type = %event_type, error = %err, "skipping malformed event payload");
                return None;
            }
        };

        match event_type.as_str() {
            "error" => {
                let message = value
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown error")
                    .to_string();
                Some(StreamEvent::Error { message })
            }
            "file_changes" => {
                let payload: FileChangesPayload =
                    serde_json::from_value(value).unwrap_or_default();
                Some(StreamEvent::FileChanges {
                    changes: payload.changes,
                })
            }
            "done" => {
                let payload: DonePayload = serde_json::from_value(value).unwrap_or_default();
                Some(StreamEvent::Done {
                    tokens_used: payload.tokens_used,
                    new_balance: payload.new_balance,
                })
            }
            _ => value
                .get("token")
                .and_then(Value::as_str)
                .map(|token| StreamEvent::Token {
                    token: token.to_string(),
                }),
        }
    }

    /// Reset to the initial state.
    pub fn reset(&mut self) {
        self.event_type = DEFAULT_EVENT_TYPE.to_string();
    }
}
