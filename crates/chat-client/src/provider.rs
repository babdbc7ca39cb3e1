use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::{ChatError, ChatResult};
use crate::ChatConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One role-tagged message in a model conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Backend-agnostic chat-completion interface.
///
/// Implemented by the HTTP client below and by mocks in tests.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Complete a conversation, returning the model's reply text.
    async fn complete(&self, messages: &[ChatMessage]) -> ChatResult<String>;

    fn backend_name(&self) -> &'static str;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

/// HTTP provider speaking the OpenAI-style chat-completions protocol
#[derive(Clone)]
pub struct HttpChatProvider {
    client: reqwest::Client,
    config: ChatConfig,
}

impl HttpChatProvider {
    pub fn new(config: ChatConfig) -> ChatResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ChatError::RequestFailed)?;

        Ok(Self { client, config })
    }

    pub fn with_defaults() -> ChatResult<Self> {
        Self::new(ChatConfig::default())
    }
}

#[async_trait]
impl ChatProvider for HttpChatProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> ChatResult<String> {
        let request = CompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!(
            model = %self.config.model,
            message_count = messages.len(),
            "sending chat completion request"
        );

        let mut builder = self
            .client
            .post(format!("{}/v1/chat/completions", self.config.base_url))
            .json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            return Err(ChatError::ServiceUnavailable(format!(
                "Status: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let completion: CompletionResponse = serde_json::from_str(&body)?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ChatError::InvalidResponse("no choices in completion".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_serialize_with_lowercase_roles() {
        let msg = ChatMessage::system("be firm");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "be firm");
    }

    #[test]
    fn completion_response_parses() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"APPROVED"}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "APPROVED");
    }

    #[test]
    fn malformed_body_maps_to_serialization_error() {
        let err = serde_json::from_str::<CompletionResponse>("<html>gateway timeout</html>")
            .map(|_| ())
            .map_err(ChatError::from)
            .unwrap_err();
        assert!(matches!(err, ChatError::Serialization(_)));
    }
}
