//! Trait abstractions for dependency injection.
//!
//! The client never reaches for ambient singletons: the HTTP transport, the
//! auth header source, and the message translator are all passed in through
//! these traits, so tests can substitute each one independently.

mod auth;
mod http;
mod translate;

pub use auth::{Anonymous, AuthProvider, StaticToken};
pub use http::{ByteStream, Headers, HttpClient, HttpError, HttpResponse};
pub use translate::{IdentityTranslator, Translator};
