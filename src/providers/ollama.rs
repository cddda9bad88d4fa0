//! Local models served by Ollama's `/api/generate`.
//!
//! Ollama streams newline-delimited JSON objects, each carrying one fragment
//! of the output in `response`. The whole body is read and then reassembled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::ProjectContext;
use crate::error::ProviderError;

use super::http::{decode, send_json};
use super::{Provider, ProviderInfo, model_or_default};

const NAME: &str = "Local (Ollama)";
pub const OLLAMA_DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";
const DEFAULT_MODEL: &str = "llama2";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    error: Option<String>,
}

pub struct OllamaProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OllamaProvider {
    /// `endpoint` is the full generate URL; `None` or blank means the local default.
    pub fn new(model: &str, endpoint: Option<String>) -> Self {
        let endpoint = endpoint
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| OLLAMA_DEFAULT_ENDPOINT.to_string());

        Self {
            client: reqwest::Client::new(),
            endpoint,
            model: model_or_default(model, DEFAULT_MODEL),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn build_prompt(context: &ProjectContext) -> String {
    format!(
        "{}\n\nProject Context:\n\n{}",
        context.system_prompt(),
        context.narrative()
    )
}

/// Concatenate the `response` fragments of an NDJSON stream.
///
/// Blank lines are skipped. A chunk carrying `error` aborts with
/// [`ProviderError::Backend`]; a line that is not JSON aborts with
/// [`ProviderError::Decoding`]. The result is trimmed.
pub fn reassemble_stream(body: &str) -> Result<String, ProviderError> {
    let mut message = String::new();

    for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let chunk: StreamChunk = decode(NAME, line)?;
        if let Some(error) = chunk.error {
            return Err(ProviderError::Backend {
                provider: NAME,
                status: 200,
                body: error,
            });
        }
        message.push_str(&chunk.response);
    }

    Ok(message.trim().to_string())
}

#[async_trait]
impl Provider for OllamaProvider {
    async fn generate_commit_message(
        &self,
        context: &ProjectContext,
    ) -> Result<String, ProviderError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt: build_prompt(context),
        };

        let request = self.client.post(&self.endpoint);
        let text = send_json(NAME, request, &body).await?;
        debug!("Reassembling {} NDJSON lines", text.lines().count());

        reassemble_stream(&text)
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: NAME.to_string(),
            model: self.model.clone(),
        }
    }
}
