use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use studio_core::{ChatMessage, ChatReply, NO_RESPONSE};
use studio_logging::studio_warn;

use crate::ApiError;

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl ApiSettings {
    pub(crate) fn endpoint(&self, path: &str) -> Result<url::Url, ApiError> {
        url::Url::parse(&self.base_url)
            .and_then(|base| base.join(path))
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))
    }

    pub(crate) fn build_client(&self) -> Result<reqwest::Client, ApiError> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .map_err(ApiError::from_reqwest)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest<'a> {
    session_id: &'a str,
    messages: &'a [ChatMessage],
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends the conversation and returns the assistant's text.
    async fn send(&self, session_id: &str, messages: &[ChatMessage]) -> Result<String, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestChatClient {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestChatClient {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = settings.build_client()?;
        Ok(Self { settings, client })
    }
}

#[async_trait]
impl ChatClient for ReqwestChatClient {
    async fn send(&self, session_id: &str, messages: &[ChatMessage]) -> Result<String, ApiError> {
        let url = self.settings.endpoint("/api/chat")?;
        let response = self
            .client
            .post(url)
            .json(&ChatRequest {
                session_id,
                messages,
            })
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok();
            studio_warn!("Chat API responded with {}: {:?}", status, body);
            return Err(ApiError::Status {
                code: status.as_u16(),
                message: body,
            });
        }

        // An unreadable body still counts as an answer, just an empty one.
        let body: Value = response.json().await.unwrap_or(Value::Null);
        Ok(reply_text(&body))
    }
}

/// Picks the reply out of `text`, `output` or `raw.text`.
pub fn reply_text(body: &Value) -> String {
    [
        body.get("text"),
        body.get("output"),
        body.get("raw").and_then(|raw| raw.get("text")),
    ]
    .into_iter()
    .flatten()
    .filter_map(Value::as_str)
    .find(|text| !text.is_empty())
    .unwrap_or(NO_RESPONSE)
    .to_string()
}

/// Folds a chat result into what the conversation shows.
pub fn chat_reply(result: Result<String, ApiError>) -> ChatReply {
    match result {
        Ok(text) => ChatReply::Text(text),
        Err(ApiError::Status { .. }) => ChatReply::ServerError,
        Err(err) => {
            studio_warn!("Chat request failed: {}", err);
            ChatReply::Unreachable
        }
    }
}
