//! Server-sent event stream handling.
//!
//! The streaming chat endpoint delivers events as a line-oriented feed:
//! an optional `event: <type>` line naming the next event, followed by a
//! `data: <JSON>` line carrying its payload. Unlike textbook SSE, the server
//! terminates every event with its data line, so blank separator lines carry
//! no meaning and each `data:` line dispatches immediately.
//!
//! [`LineBuffer`] turns raw byte chunks into complete lines; [`EventParser`]
//! turns those lines into [`StreamEvent`]s.

mod events;
mod lines;
mod parser;

pub use events::{StreamEvent, DEFAULT_EVENT_TYPE};
pub use lines::LineBuffer;
pub use parser::EventParser;
