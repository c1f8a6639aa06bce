//! devreq-client — typed async client for the AI dev-request platform.
//!
//! Most of the crate is thin request/response wrappers over the platform's
//! HTTP API. The interesting part is the chat refinement stream consumer
//! ([`ApiClient::stream_chat`]): it reads the SSE-style response body of
//! `POST /api/requests/{id}/chat/stream`, reassembles events split across
//! network chunks, and drives caller-supplied callbacks until the stream
//! terminates.

pub mod adapters;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod sse;
pub mod traits;

pub use client::{ApiClient, ChatHandler, StreamEnd};
pub use config::ClientConfig;
pub use error::ApiError;
pub use models::{FileChange, FileOperation};
