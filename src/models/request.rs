//! Development request types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload for creating a development request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDevRequest {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

impl NewDevRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            contact_email: None,
            contact_phone: None,
        }
    }

    pub fn with_contact_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = Some(email.into());
        self
    }

    pub fn with_contact_phone(mut self, phone: impl Into<String>) -> Self {
        self.contact_phone = Some(phone.into());
        self
    }
}

/// A development request as returned by the server.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DevRequest {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    pub category: String,
    pub complexity: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub analyzed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub proposed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub project_id: Option<String>,
}
