pub mod error;
pub mod provider;

pub use error::{ChatError, ChatResult};
pub use provider::{ChatMessage, ChatProvider, ChatRole, HttpChatProvider};

use std::time::Duration;

/// Configuration for the chat-completion backend
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        dotenvy::dotenv().ok();

        Self {
            base_url: std::env::var("CHAT_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            model: std::env::var("CHAT_MODEL").unwrap_or_else(|_| "coach-chat".to_string()),
            api_key: std::env::var("CHAT_API_KEY").ok(),
            temperature: 0.7,
            max_tokens: 2048,
            timeout: Duration::from_secs(30),
        }
    }
}
