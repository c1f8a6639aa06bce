//! Auth header provider abstraction.
//!
//! The surrounding platform injects its bearer token through this trait
//! instead of a process-global; every [`crate::ApiClient`] carries its own
//! provider, so two clients with different identities never interfere.

/// Supplies the `Authorization` header value for outgoing requests.
pub trait AuthProvider: Send + Sync {
    /// The full header value (e.g. `Bearer <token>`), or `None` for
    /// unauthenticated requests.
    fn authorization(&self) -> Option<String>;
}

/// A fixed bearer token.
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl AuthProvider for StaticToken {
    fn authorization(&self) -> Option<String> {
        Some(format!("Bearer {}", self.token))
    }
}

/// No authentication.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl AuthProvider for Anonymous {
    fn authorization(&self) -> Option<String> {
        None
    }
}
