//! Stream event types.

use crate::models::FileChange;

/// Event type assumed when no `event:` line precedes a `data:` line.
pub const DEFAULT_EVENT_TYPE: &str = "message";

/// A parsed event from the streaming chat endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// An incremental piece of assistant text.
    Token { token: String },
    /// Proposed file changes for this response.
    FileChanges { changes: Vec<FileChange> },
    /// Generation finished successfully.
    Done { tokens_used: u32, new_balance: u32 },
    /// Generation failed server-side.
    Error { message: String },
}

impl StreamEvent {
    /// Whether this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Done { .. } | StreamEvent::Error { .. })
    }
}
