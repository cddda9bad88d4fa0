//! Mistral AI chat completions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::ProjectContext;
use crate::error::ProviderError;

use super::http::{decode, send_json};
use super::{Provider, ProviderInfo, model_or_default, user_message};

const NAME: &str = "Mistral AI";
pub const MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";
const DEFAULT_MODEL: &str = "mistral-medium";
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 50;

#[derive(Debug, Serialize)]
struct MistralRequest<'a> {
    model: &'a str,
    messages: [MistralMessage<'a>; 2],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct MistralMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MistralResponse {
    #[serde(default)]
    choices: Vec<MistralChoice>,
}

#[derive(Debug, Deserialize)]
struct MistralChoice {
    message: MistralResponseMessage,
}

#[derive(Debug, Deserialize)]
struct MistralResponseMessage {
    content: String,
}

pub struct MistralProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl MistralProvider {
    pub fn new(api_key: impl Into<String>, model: &str) -> Self {
        Self::with_base_url(MISTRAL_BASE_URL, api_key, model)
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

#[async_trait]
impl Provider for MistralProvider {
    async fn generate_commit_message(
        &self,
        context: &ProjectContext,
    ) -> Result<String, ProviderError> {
        let user = user_message(context);
        let body = MistralRequest {
            model: &self.model,
            messages: [
                MistralMessage {
                    role: "system",
                    content: context.system_prompt(),
                },
                MistralMessage {
                    role: "user",
                    content: &user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key);

        let text = send_json(NAME, request, &body).await?;
        let response: MistralResponse = decode(NAME, &text)?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ProviderError::EmptyResult(NAME))
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: NAME.to_string(),
            model: self.model.clone(),
        }
    }
}
