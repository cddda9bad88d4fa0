//! OpenAI-compatible chat completions.
//!
//! The same adapter serves OpenAI itself and OpenRouter; only the base URL,
//! display name and default model differ.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::ProjectContext;
use crate::error::ProviderError;

use super::http::{decode, send_json};
use super::{Provider, ProviderInfo, model_or_default, user_message};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

const OPENAI_DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const OPENROUTER_DEFAULT_MODEL: &str = "openrouter/optimus-alpha";

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 50;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat completions client for OpenAI-compatible APIs.
pub struct OpenAiProvider {
    client: reqwest::Client,
    name: &'static str,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    /// OpenAI at its public endpoint.
    pub fn new(api_key: impl Into<String>, model: &str) -> Self {
        Self::with_base_url(
            "OpenAI",
            OPENAI_BASE_URL,
            api_key,
            model_or_default(model, OPENAI_DEFAULT_MODEL),
        )
    }

    /// OpenRouter through its OpenAI-compatible endpoint.
    pub fn openrouter(api_key: impl Into<String>, model: &str) -> Self {
        Self::with_base_url(
            "OpenRouter",
            OPENROUTER_BASE_URL,
            api_key,
            model_or_default(model, OPENROUTER_DEFAULT_MODEL),
        )
    }

    /// Any OpenAI-compatible server at `base_url` (e.g. `http://host/v1`).
    pub fn with_base_url(
        name: &'static str,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            name,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    fn build_request<'a>(&'a self, context: &'a ProjectContext, user: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: context.system_prompt(),
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn generate_commit_message(
        &self,
        context: &ProjectContext,
    ) -> Result<String, ProviderError> {
        let user = user_message(context);
        let body = self.build_request(context, &user);

        let request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key);

        let text = send_json(self.name, request, &body).await?;
        let response: ChatResponse = decode(self.name, &text)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ProviderError::EmptyResult(self.name))
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: self.name.to_string(),
            model: self.model.clone(),
        }
    }
}
