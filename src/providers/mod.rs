//! Provider abstraction over the supported LLM backends.
//!
//! Every backend speaks a different wire protocol. Each adapter module owns
//! its request/response schema; the shared surface is only the [`Provider`]
//! trait.

pub mod anthropic;
pub mod gemini;
pub mod http;
pub mod mistral;
pub mod ollama;
pub mod openai;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::context::ProjectContext;
use crate::error::ProviderError;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use mistral::MistralProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Supported backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Claude,
    Mistral,
    Gemini,
    OpenRouter,
    Local,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 6] = [
        ProviderKind::OpenAi,
        ProviderKind::Claude,
        ProviderKind::Mistral,
        ProviderKind::Gemini,
        ProviderKind::OpenRouter,
        ProviderKind::Local,
    ];

    /// Name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Claude => "claude",
            ProviderKind::Mistral => "mistral",
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenRouter => "openrouter",
            ProviderKind::Local => "local",
        }
    }

    /// Environment variable holding the API key, if the backend needs one.
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            ProviderKind::OpenAi => Some("OPENAI_API_KEY"),
            ProviderKind::Claude => Some("CLAUDE_API_KEY"),
            ProviderKind::Mistral => Some("MISTRAL_API_KEY"),
            ProviderKind::Gemini => Some("GEMINI_API_KEY"),
            ProviderKind::OpenRouter => Some("OPENROUTER_API_KEY"),
            ProviderKind::Local => None,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ProviderError::UnknownProvider(s.to_string()))
    }
}

/// Inputs for constructing a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Backend name, one of [`ProviderKind::as_str`].
    pub provider: String,
    /// API key, empty when not set.
    pub api_key: String,
    /// Model name, empty to use the adapter's default.
    pub model: String,
    /// Endpoint override, only honored by the local backend.
    pub endpoint: Option<String>,
}

/// Display descriptor for a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    pub name: String,
    pub model: String,
}

impl fmt::Display for ProviderInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.model)
    }
}

/// Turns a project context into a commit message.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Issue one request to the backend and return the generated message.
    async fn generate_commit_message(&self, context: &ProjectContext)
    -> Result<String, ProviderError>;

    /// Backend name and resolved model, for display.
    fn info(&self) -> ProviderInfo;
}

/// Construct the adapter for `config.provider`.
///
/// Fails without touching the network when the provider name is unknown or a
/// keyed backend has no API key.
pub fn new_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>, ProviderError> {
    let kind: ProviderKind = config.provider.parse()?;

    if let Some(env_var) = kind.api_key_env() {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::MissingApiKey {
                provider: kind.as_str(),
                env_var,
            });
        }
    }

    let api_key = config.api_key.clone();
    let model = config.model.as_str();

    let provider: Box<dyn Provider> = match kind {
        ProviderKind::OpenAi => Box::new(OpenAiProvider::new(api_key, model)),
        ProviderKind::OpenRouter => Box::new(OpenAiProvider::openrouter(api_key, model)),
        ProviderKind::Claude => Box::new(AnthropicProvider::new(api_key, model)),
        ProviderKind::Mistral => Box::new(MistralProvider::new(api_key, model)),
        ProviderKind::Gemini => Box::new(GeminiProvider::new(api_key, model)),
        ProviderKind::Local => Box::new(OllamaProvider::new(model, config.endpoint.clone())),
    };

    Ok(provider)
}

/// Use `model` unless it is blank.
pub(crate) fn model_or_default(model: &str, default: &str) -> String {
    let model = model.trim();
    if model.is_empty() {
        default.to_string()
    } else {
        model.to_string()
    }
}

/// User turn shared by the chat-style adapters.
pub(crate) fn user_message(context: &ProjectContext) -> String {
    format!("Project Context:\n\n{}\n\n", context.narrative())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider: &str, api_key: &str) -> ProviderConfig {
        ProviderConfig {
            provider: provider.to_string(),
            api_key: api_key.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.as_str().parse::<ProviderKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn test_kind_parse_is_case_sensitive() {
        assert!("OpenAI".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let result = new_provider(&config("unknown", "key"));
        match result {
            Err(ProviderError::UnknownProvider(name)) => assert_eq!(name, "unknown"),
            Err(other) => panic!("Expected UnknownProvider, got: {other}"),
            Ok(p) => panic!("Expected UnknownProvider, got provider {}", p.info()),
        }
    }

    #[test]
    fn test_missing_api_key_is_rejected_for_keyed_backends() {
        for kind in ["openai", "claude", "mistral", "gemini", "openrouter"] {
            let result = new_provider(&config(kind, "  "));
            assert!(
                matches!(result, Err(ProviderError::MissingApiKey { .. })),
                "{kind} should require an API key"
            );
        }
    }

    #[test]
    fn test_local_needs_no_api_key() {
        let provider = new_provider(&config("local", "")).unwrap();
        assert_eq!(provider.info().model, "llama2");
    }

    #[test]
    fn test_factory_dispatches_to_matching_adapter() {
        let cases = [
            ("openai", "OpenAI", "gpt-3.5-turbo"),
            ("openrouter", "OpenRouter", "openrouter/optimus-alpha"),
            ("claude", "Anthropic Claude", "claude-3-7-sonnet-latest"),
            ("mistral", "Mistral AI", "mistral-medium"),
            ("gemini", "Google Gemini", "gemini-pro"),
        ];
        for (kind, name, model) in cases {
            let info = new_provider(&config(kind, "key")).unwrap().info();
            assert_eq!(info.name, name);
            assert_eq!(info.model, model);
        }
    }

    #[test]
    fn test_factory_passes_model_through() {
        let mut cfg = config("mistral", "key");
        cfg.model = "mistral-large-latest".to_string();
        let info = new_provider(&cfg).unwrap().info();
        assert_eq!(info.model, "mistral-large-latest");
    }

    #[test]
    fn test_model_or_default() {
        assert_eq!(model_or_default("", "fallback"), "fallback");
        assert_eq!(model_or_default("   ", "fallback"), "fallback");
        assert_eq!(model_or_default("custom", "fallback"), "custom");
    }

    #[test]
    fn test_provider_info_display() {
        let info = ProviderInfo {
            name: "OpenAI".to_string(),
            model: "gpt-4o".to_string(),
        };
        assert_eq!(info.to_string(), "OpenAI (gpt-4o)");
    }
}
