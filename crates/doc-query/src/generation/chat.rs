//! Hosted chat-completions client with configurable retry
//!
//! Talks to any OpenAI-compatible chat completions endpoint (Groq by
//! default). Retries default to zero, one outbound call per question.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::LlmConfig;
use crate::error::{Error, Result};

/// Chat completions API client
pub struct ChatClient {
    client: Client,
    config: LlmConfig,
}

/// One message of a chat request
#[derive(Clone, Copy, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage<'a>],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

impl ChatClient {
    /// Create a new client
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to build model HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// The configured model identifier
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Run one chat completion and return the assistant's text.
    pub async fn complete(
        &self,
        messages: &[ChatMessage<'_>],
        max_tokens: Option<u32>,
    ) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match self.complete_once(messages, max_tokens).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.config.max_retries {
                        let delay = Duration::from_secs(2u64.pow(attempt));
                        tracing::warn!(
                            "model request failed (attempt {}/{}), retrying in {:?}",
                            attempt + 1,
                            self.config.max_retries + 1,
                            delay
                        );
                        sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::Model("unknown model error".to_string())))
    }

    async fn complete_once(
        &self,
        messages: &[ChatMessage<'_>],
        max_tokens: Option<u32>,
    ) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Model("GROQ_API_KEY is not set".to_string()))?;

        let url = format!("{}/chat/completions", self.config.api_base);
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.trim())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Model(format!("chat request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Model(format!(
                "chat completion failed: HTTP {status} - {body}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Model(format!("failed to parse chat response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::Model("chat response contained no choices".to_string()))
    }
}
