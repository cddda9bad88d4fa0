//! Google Gemini `generateContent`.
//!
//! Authenticates with the API key as a `key` query parameter. The system
//! prompt travels as the leading part of the single content entry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::ProjectContext;
use crate::error::ProviderError;

use super::http::{decode, send_json};
use super::{Provider, ProviderInfo, model_or_default};

const NAME: &str = "Google Gemini";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";
const DEFAULT_MODEL: &str = "gemini-pro";
const TEMPERATURE: f64 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 50;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>, model: &str) -> Self {
        Self::with_base_url(GEMINI_BASE_URL, api_key, model)
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

/// First text part of the first candidate.
fn first_text(response: GenerateResponse) -> Result<String, ProviderError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or(ProviderError::EmptyResult(NAME))
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate_commit_message(
        &self,
        context: &ProjectContext,
    ) -> Result<String, ProviderError> {
        let user = format!("Project Context:\n\n{}", context.narrative());
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: context.system_prompt(),
                    },
                    Part { text: &user },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let request = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .query(&[("key", self.api_key.as_str())]);

        let text = send_json(NAME, request, &body).await?;
        first_text(decode(NAME, &text)?)
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: NAME.to_string(),
            model: self.model.clone(),
        }
    }
}
