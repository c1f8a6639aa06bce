//! The API client.

mod stream;

pub use stream::{ChatHandler, StreamEnd};

use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::{
    AcceptedChanges, ChatMessage, ChatOutcome, DevRequest, NewDevRequest, RevertedChanges,
};
use crate::traits::{Anonymous, AuthProvider, Headers, HttpClient, HttpResponse};

/// The non-streaming send endpoint answers 200 for both outcomes; the body
/// shape tells them apart.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SendChatBody {
    #[serde(rename_all = "camelCase")]
    InsufficientTokens {
        #[allow(dead_code)]
        error: String,
        required: u32,
        balance: u32,
    },
    #[serde(rename_all = "camelCase")]
    Reply {
        message: ChatMessage,
        tokens_used: u32,
        new_balance: u32,
    },
}

/// Client for the development-request platform API.
///
/// All HTTP goes through the injected [`HttpClient`]; the injected
/// [`AuthProvider`] supplies the `Authorization` header. Construction with
/// [`ApiClient::new`] wires in the production reqwest adapter and no auth.
pub struct ApiClient {
    config: ClientConfig,
    http: Arc<dyn HttpClient>,
    auth: Arc<dyn AuthProvider>,
}

impl ApiClient {
    /// Production client with default wiring.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_parts(config, Arc::new(ReqwestHttpClient::new()), Arc::new(Anonymous))
    }

    /// Production client with an auth provider.
    pub fn with_auth(config: ClientConfig, auth: Arc<dyn AuthProvider>) -> Self {
        Self::with_parts(config, Arc::new(ReqwestHttpClient::new()), auth)
    }

    /// Fully injected client, for tests and custom transports.
    pub fn with_parts(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self { config, http, auth }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        if let Some(value) = self.auth.authorization() {
            headers.insert("Authorization".to_string(), value);
        }
        headers
    }

    fn decode<T: serde::de::DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
        if !response.is_success() {
            return Err(ApiError::from_response(&response));
        }
        Ok(response.json()?)
    }

    /// Submit a new development request.
    pub async fn create_request(&self, request: &NewDevRequest) -> Result<DevRequest, ApiError> {
        let body = serde_json::to_string(request)?;
        let response = self
            .http
            .post(&self.url("/api/requests"), &body, &self.headers())
            .await?;
        Self::decode(response)
    }

    /// Fetch a single request by id.
    pub async fn get_request(&self, request_id: &str) -> Result<DevRequest, ApiError> {
        let response = self
            .http
            .get(&self.url(&format!("/api/requests/{request_id}")), &self.headers())
            .await?;
        Self::decode(response)
    }

    /// List requests, newest first.
    pub async fn list_requests(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<DevRequest>, ApiError> {
        let url = self.url(&format!("/api/requests?page={page}&pageSize={page_size}"));
        let response = self.http.get(&url, &self.headers()).await?;
        Self::decode(response)
    }

    /// Fetch the chat history for a request.
    pub async fn chat_history(&self, request_id: &str) -> Result<Vec<ChatMessage>, ApiError> {
        let url = self.url(&format!("/api/requests/{request_id}/chat"));
        let response = self.http.get(&url, &self.headers()).await?;
        Self::decode(response)
    }

    /// Send a chat message and wait for the full reply.
    pub async fn send_chat(
        &self,
        request_id: &str,
        message: &str,
    ) -> Result<ChatOutcome, ApiError> {
        let url = self.url(&format!("/api/requests/{request_id}/chat"));
        let body = json!({ "message": message }).to_string();
        let response = self.http.post(&url, &body, &self.headers()).await?;

        match Self::decode(response)? {
            SendChatBody::Reply {
                message,
                tokens_used,
                new_balance,
            } => Ok(ChatOutcome::Reply {
                message,
                tokens_used,
                new_balance,
            }),
            SendChatBody::InsufficientTokens {
                required, balance, ..
            } => Ok(ChatOutcome::InsufficientTokens { required, balance }),
        }
    }

    /// Apply the file changes proposed by an assistant message.
    pub async fn accept_changes(
        &self,
        request_id: &str,
        message_id: i64,
    ) -> Result<AcceptedChanges, ApiError> {
        let url = self.url(&format!("/api/requests/{request_id}/chat/accept"));
        let body = json!({ "messageId": message_id }).to_string();
        let response = self.http.post(&url, &body, &self.headers()).await?;
        Self::decode(response)
    }

    /// Roll back the changes applied from an assistant message.
    pub async fn revert_changes(
        &self,
        request_id: &str,
        message_id: i64,
    ) -> Result<RevertedChanges, ApiError> {
        let url = self.url(&format!("/api/requests/{request_id}/chat/revert"));
        let body = json!({ "messageId": message_id }).to_string();
        let response = self.http.post(&url, &body, &self.headers()).await?;
        Self::decode(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockHttpClient, MockResponse};
    use crate::traits::StaticToken;

    fn client_with_mock(mock: MockHttpClient) -> ApiClient {
        ApiClient::with_parts(
            ClientConfig::new("http://test"),
            Arc::new(mock),
            Arc::new(StaticToken::new("secret")),
        )
    }

    #[tokio::test]
    async fn test_headers_include_auth_and_content_type() {
        let mock = MockHttpClient::new();
        mock.on_any(MockResponse::json(200, "[]"));
        let client = client_with_mock(mock.clone());

        client.list_requests(1, 20).await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(
            request.headers.get("Authorization").map(String::as_str),
            Some("Bearer secret")
        );
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(request.url, "http://test/api/requests?page=1&pageSize=20");
    }

    #[tokio::test]
    async fn test_send_chat_reply() {
        let mock = MockHttpClient::new();
        mock.on_any(MockResponse::json(
            200,
            r#"{
                "message": {
                    "id": 9,
                    "role": "assistant",
                    "content": "Changed the color.",
                    "createdAt": "2024-05-01T12:00:00Z"
                },
                "tokensUsed": 12,
                "newBalance": 88
            }"#,
        ));
        let client = client_with_mock(mock.clone());

        let outcome = client.send_chat("req-1", "Make it blue").await.unwrap();
        match outcome {
            ChatOutcome::Reply {
                message,
                tokens_used,
                new_balance,
            } => {
                assert_eq!(message.content, "Changed the color.");
                assert_eq!(tokens_used, 12);
                assert_eq!(new_balance, 88);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        let request = mock.last_request().unwrap();
        assert_eq!(request.url, "http://test/api/requests/req-1/chat");
        assert_eq!(request.body.as_deref(), Some(r#"{"message":"Make it blue"}"#));
    }

    #[tokio::test]
    async fn test_send_chat_insufficient_tokens() {
        let mock = MockHttpClient::new();
        mock.on_any(MockResponse::json(
            200,
            r#"{"error":"insufficient_tokens","required":10,"balance":3}"#,
        ));
        let client = client_with_mock(mock);

        let outcome = client.send_chat("req-1", "hi").await.unwrap();
        assert_eq!(
            outcome,
            ChatOutcome::InsufficientTokens {
                required: 10,
                balance: 3
            }
        );
    }

    #[tokio::test]
    async fn test_error_status_maps_to_api_error() {
        let mock = MockHttpClient::new();
        mock.on_any(MockResponse::json(404, r#"{"message":"Request not found"}"#));
        let client = client_with_mock(mock);

        let err = client.get_request("missing").await.unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Request not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_accept_changes_sends_message_id() {
        let mock = MockHttpClient::new();
        mock.on_any(MockResponse::json(
            200,
            r#"{"appliedChanges":1,"modifiedFiles":["a.ts"]}"#,
        ));
        let client = client_with_mock(mock.clone());

        let accepted = client.accept_changes("req-1", 9).await.unwrap();
        assert_eq!(accepted.applied_changes, 1);

        let request = mock.last_request().unwrap();
        assert_eq!(request.url, "http://test/api/requests/req-1/chat/accept");
        assert_eq!(request.body.as_deref(), Some(r#"{"messageId":9}"#));
    }

    #[tokio::test]
    async fn test_revert_changes_sends_message_id() {
        let mock = MockHttpClient::new();
        mock.on_any(MockResponse::json(
            200,
            r#"{"success":true,"restoredFiles":["a.ts"]}"#,
        ));
        let client = client_with_mock(mock.clone());

        let reverted = client.revert_changes("req-1", 9).await.unwrap();
        assert!(reverted.success);

        let request = mock.last_request().unwrap();
        assert_eq!(request.url, "http://test/api/requests/req-1/chat/revert");
        assert_eq!(request.body.as_deref(), Some(r#"{"messageId":9}"#));
    }
}
