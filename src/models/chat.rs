//! Iterative chat types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a proposed change does to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOperation {
    Create,
    Modify,
    Delete,
}

/// A single proposed file change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileChange {
    pub file: String,
    pub operation: FileOperation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a request's chat history.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i64,
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub file_changes: Vec<FileChange>,
    #[serde(default)]
    pub tokens_used: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// Result of a non-streaming chat message.
///
/// The server reports an exhausted token balance with a 200 response, so it
/// is part of the outcome rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    /// The assistant replied.
    Reply {
        message: ChatMessage,
        tokens_used: u32,
        new_balance: u32,
    },
    /// The user's balance cannot cover the message.
    InsufficientTokens { required: u32, balance: u32 },
}

/// Result of applying an assistant message's proposed changes.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedChanges {
    pub applied_changes: u32,
    pub modified_files: Vec<String>,
    #[serde(default)]
    pub created_files: Vec<String>,
}

/// Result of rolling back the last applied changes.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RevertedChanges {
    pub success: bool,
    #[serde(default)]
    pub restored_files: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_change_roundtrip() {
        let json = r#"{"file":"src/app.tsx","operation":"create","explanation":"new page"}"#;
        let change: FileChange = serde_json::from_str(json).unwrap();
        assert_eq!(change.file, "src/app.tsx");
        assert_eq!(change.operation, FileOperation::Create);
        assert!(change.diff.is_none());
        assert_eq!(change.explanation.as_deref(), Some("new page"));
    }

    #[test]
    fn test_chat_message_deserializes() {
        let json = r#"{
            "id": 7,
            "role": "assistant",
            "content": "Done, see the diff.",
            "fileChanges": [{"file":"a.ts","operation":"modify"}],
            "tokensUsed": 12,
            "createdAt": "2024-05-01T12:00:00Z"
        }"#;
        let message: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.id, 7);
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.file_changes.len(), 1);
        assert_eq!(message.tokens_used, Some(12));
    }

    #[test]
    fn test_chat_message_defaults() {
        let json = r#"{
            "id": 1,
            "role": "user",
            "content": "Make it blue",
            "createdAt": "2024-05-01T12:00:00Z"
        }"#;
        let message: ChatMessage = serde_json::from_str(json).unwrap();
        assert!(message.file_changes.is_empty());
        assert!(message.tokens_used.is_none());
    }

    #[test]
    fn test_accepted_changes_deserializes() {
        let json = r#"{"appliedChanges":2,"modifiedFiles":["a.ts"],"createdFiles":["b.ts"]}"#;
        let accepted: AcceptedChanges = serde_json::from_str(json).unwrap();
        assert_eq!(accepted.applied_changes, 2);
        assert_eq!(accepted.modified_files, vec!["a.ts"]);
        assert_eq!(accepted.created_files, vec!["b.ts"]);
    }

    #[test]
    fn test_reverted_changes_deserializes() {
        let json = r#"{"success":true,"restoredFiles":["a.ts","b.ts"]}"#;
        let reverted: RevertedChanges = serde_json::from_str(json).unwrap();
        assert!(reverted.success);
        assert_eq!(reverted.restored_files.len(), 2);
    }
}
