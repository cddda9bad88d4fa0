//! Anthropic legacy text completions (`/v1/complete`).
//!
//! Unlike the chat adapters this protocol takes a single prompt string with
//! `Human:`/`Assistant:` turn markers and returns one `completion` string.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::ProjectContext;
use crate::error::ProviderError;

use super::http::{decode, send_json};
use super::{Provider, ProviderInfo, model_or_default};

const NAME: &str = "Anthropic Claude";
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-3-7-sonnet-latest";
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 50;
const STOP_SEQUENCES: [&str; 2] = ["\n", "Human:"];

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: String,
    max_tokens_to_sample: u32,
    temperature: f64,
    stop_sequences: [&'static str; 2],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    completion: String,
}

pub struct AnthropicProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AnthropicProvider {
    pub fn new(api_key: impl Into<String>, model: &str) -> Self {
        Self::with_base_url(ANTHROPIC_BASE_URL, api_key, model)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: &str,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model_or_default(model, DEFAULT_MODEL),
        }
    }
}

/// Single-turn prompt: instructions and context in the human turn, then an
/// open assistant turn for the model to complete.
fn build_prompt(context: &ProjectContext) -> String {
    format!(
        "\n\nHuman: {}\n\nProject Context:\n\n{}\n\nAssistant:",
        context.system_prompt(),
        context.narrative()
    )
}

#[async_trait]
impl Provider for AnthropicProvider {
    async fn generate_commit_message(
        &self,
        context: &ProjectContext,
    ) -> Result<String, ProviderError> {
        let body = CompletionRequest {
            model: &self.model,
            prompt: build_prompt(context),
            max_tokens_to_sample: MAX_TOKENS,
            temperature: TEMPERATURE,
            stop_sequences: STOP_SEQUENCES,
        };

        let request = self
            .client
            .post(format!("{}/complete", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION);

        let text = send_json(NAME, request, &body).await?;
        let response: CompletionResponse = decode(NAME, &text)?;

        if response.completion.trim().is_empty() {
            return Err(ProviderError::EmptyResult(NAME));
        }
        Ok(response.completion)
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: NAME.to_string(),
            model: self.model.clone(),
        }
    }
}
