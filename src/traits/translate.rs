//! Message translation abstraction.
//!
//! Error types expose stable message keys (see
//! [`crate::ApiError::message_key`]); hosts that localize map those keys to
//! display text by implementing [`Translator`]. Passed explicitly, never
//! looked up from a global.

/// Resolves a stable message key to display text.
pub trait Translator: Send + Sync {
    /// Translate `key`; implementations should return the key itself when no
    /// translation exists, so callers always get something displayable.
    fn translate(&self, key: &str) -> String;
}

/// Returns every key unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_translator_echoes_key() {
        assert_eq!(
            IdentityTranslator.translate("chat.insufficient_tokens"),
            "chat.insufficient_tokens"
        );
    }
}
