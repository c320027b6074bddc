//! Async HTTP client for the hosted language model
//!
//! Model-agnostic: supports both Anthropic and OpenAI-compatible APIs
//! (DeepSeek, etc). The client only moves text in and out; schema handling
//! and validation live in the adapter.

use crate::core::error::{Result, TaskError};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// API format type
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFormat {
    Anthropic,
    OpenAI,
}

/// Async client for model API calls
pub struct RemoteClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    api_format: ApiFormat,
}

impl RemoteClient {
    /// Create a client with explicit configuration
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        let api_format = Self::detect_api_format(&api_url);
        Self {
            client: Client::new(),
            api_key,
            api_url,
            model,
            api_format,
        }
    }

    fn detect_api_format(url: &str) -> ApiFormat {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else {
            ApiFormat::OpenAI
        }
    }

    /// Create a client from environment variables
    ///
    /// Required: LLM_API_KEY
    /// Optional: LLM_API_URL (defaults to Anthropic API)
    /// Optional: LLM_MODEL (defaults to claude-3-haiku-20240307)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("LLM_API_KEY").map_err(|_| TaskError::NoCredential)?;
        let api_url = std::env::var("LLM_API_URL")
            .unwrap_or_else(|_| "https://api.anthropic.com/v1/messages".into());
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| "claude-3-haiku-20240307".into());

        Ok(Self::new(api_key, api_url, model))
    }

    /// Send a completion request and return the model's text response
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(TaskError::NoCredential);
        }
        match self.api_format {
            ApiFormat::Anthropic => self.complete_anthropic(system, user).await,
            ApiFormat::OpenAI => self.complete_openai(system, user).await,
        }
    }

    /// Send a prepared request and map transport and HTTP failures onto the
    /// error taxonomy
    async fn send_checked(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|e| TaskError::TransportFailure(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TaskError::TransportFailure(format!(
                "API error: {}",
                error_text
            )));
        }
        Ok(response)
    }

    async fn complete_anthropic(&self, system: &str, user: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: 4096,
            system: system.into(),
            messages: vec![Message {
                role: "user".into(),
                content: user.into(),
            }],
        };

        let response = self
            .send_checked(
                self.client
                    .post(&self.api_url)
                    .header("x-api-key", &self.api_key)
                    .header("anthropic-version", "2023-06-01")
                    .json(&request),
            )
            .await?;

        let completion: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| TaskError::TransportFailure(e.to_string()))?;

        completion
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or_else(|| TaskError::MalformedResponse("empty response".into()))
    }

    async fn complete_openai(&self, system: &str, user: &str) -> Result<String> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            max_tokens: 4096,
            messages: vec![
                Message {
                    role: "system".into(),
                    content: system.into(),
                },
                Message {
                    role: "user".into(),
                    content: user.into(),
                },
            ],
        };

        let response = self
            .send_checked(
                self.client
                    .post(&self.api_url)
                    .header("Authorization", format!("Bearer {}", self.api_key))
                    .json(&request),
            )
            .await?;

        let completion: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| TaskError::TransportFailure(e.to_string()))?;

        completion
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| TaskError::MalformedResponse("empty response".into()))
    }
}

// Anthropic API format
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

// OpenAI-compatible API format
#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

// Shared
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = RemoteClient::new(
            "test-key".into(),
            "https://api.example.com".into(),
            "test-model".into(),
        );
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.api_format, ApiFormat::OpenAI);
    }

    #[test]
    fn test_anthropic_format_detection() {
        let client = RemoteClient::new(
            "k".into(),
            "https://api.anthropic.com/v1/messages".into(),
            "m".into(),
        );
        assert_eq!(client.api_format, ApiFormat::Anthropic);
    }

    #[test]
    fn test_from_env_missing_key() {
        if std::env::var("LLM_API_KEY").is_err() {
            assert!(matches!(
                RemoteClient::from_env(),
                Err(TaskError::NoCredential)
            ));
        }
    }
}
