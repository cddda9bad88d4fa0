//! Resolution of command-line flags and environment into run configuration.

use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::providers::{ProviderConfig, ProviderKind};

/// Read when the Claude backend has no `CLAUDE_API_KEY`.
pub const ANTHROPIC_KEY_FALLBACK: &str = "ANTHROPIC_API_KEY";

/// Endpoint override for the local backend when `--endpoint` is absent.
pub const OLLAMA_ENDPOINT_ENV: &str = "OLLAMA_ENDPOINT";

/// Raw flag values, before any environment lookup.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    pub provider: String,
    pub model: Option<String>,
    pub dir: PathBuf,
    pub endpoint: Option<String>,
    pub commit: bool,
    pub with_content: bool,
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    /// Canonical project directory.
    pub project_dir: PathBuf,
    pub commit: bool,
    pub with_content: bool,
}

impl AppConfig {
    /// Combine `flags` with the environment.
    ///
    /// An unknown provider name is passed through untouched so the provider
    /// factory reports it.
    pub fn resolve(flags: Flags) -> Result<Self, ConfigError> {
        let project_dir =
            flags
                .dir
                .canonicalize()
                .map_err(|source| ConfigError::InvalidDirectory {
                    path: flags.dir.display().to_string(),
                    source,
                })?;

        let kind = flags.provider.parse::<ProviderKind>().ok();
        let api_key = kind.map(api_key_for).unwrap_or_default();

        let endpoint = match kind {
            Some(ProviderKind::Local) => flags
                .endpoint
                .filter(|e| !e.trim().is_empty())
                .or_else(|| env_value(OLLAMA_ENDPOINT_ENV)),
            _ => None,
        };

        Ok(Self {
            provider: ProviderConfig {
                provider: flags.provider,
                api_key,
                model: flags.model.unwrap_or_default(),
                endpoint,
            },
            project_dir,
            commit: flags.commit,
            with_content: flags.with_content,
        })
    }
}

/// API key for `kind` from its environment variable, or empty.
pub fn api_key_for(kind: ProviderKind) -> String {
    let primary = kind.api_key_env().and_then(env_value);

    match (kind, primary) {
        (_, Some(key)) => key,
        (ProviderKind::Claude, None) => env_value(ANTHROPIC_KEY_FALLBACK).unwrap_or_default(),
        (_, None) => String::new(),
    }
}

/// Non-empty value of `name`.
fn env_value(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(provider: &str) -> Flags {
        Flags {
            provider: provider.to_string(),
            dir: PathBuf::from("."),
            ..Default::default()
        }
    }

    #[test]
    fn test_api_key_from_env() {
        temp_env::with_var("OPENAI_API_KEY", Some("sk-test"), || {
            assert_eq!(api_key_for(ProviderKind::OpenAi), "sk-test");
        });
    }

    #[test]
    fn test_empty_api_key_counts_as_unset() {
        temp_env::with_var("MISTRAL_API_KEY", Some(""), || {
            assert_eq!(api_key_for(ProviderKind::Mistral), "");
        });
    }

    #[test]
    fn test_claude_falls_back_to_anthropic_key() {
        temp_env::with_vars(
            [
                ("CLAUDE_API_KEY", None),
                ("ANTHROPIC_API_KEY", Some("sk-ant")),
            ],
            || {
                assert_eq!(api_key_for(ProviderKind::Claude), "sk-ant");
            },
        );
    }

    #[test]
    fn test_claude_key_takes_precedence_over_fallback() {
        temp_env::with_vars(
            [
                ("CLAUDE_API_KEY", Some("sk-claude")),
                ("ANTHROPIC_API_KEY", Some("sk-ant")),
            ],
            || {
                assert_eq!(api_key_for(ProviderKind::Claude), "sk-claude");
            },
        );
    }

    #[test]
    fn test_fallback_is_claude_only() {
        temp_env::with_vars(
            [
                ("GEMINI_API_KEY", None),
                ("ANTHROPIC_API_KEY", Some("sk-ant")),
            ],
            || {
                assert_eq!(api_key_for(ProviderKind::Gemini), "");
            },
        );
    }

    #[test]
    fn test_local_has_no_key() {
        assert_eq!(api_key_for(ProviderKind::Local), "");
    }

    #[test]
    fn test_resolve_canonicalises_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = flags("openai");
        f.dir = dir.path().join(".");

        let config = AppConfig::resolve(f).unwrap();
        assert_eq!(config.project_dir, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_missing_dir_is_error() {
        let mut f = flags("openai");
        f.dir = PathBuf::from("/definitely/not/a/real/dir");

        let result = AppConfig::resolve(f);
        assert!(matches!(result, Err(ConfigError::InvalidDirectory { .. })));
    }

    #[test]
    fn test_resolve_unknown_provider_passes_through() {
        let config = AppConfig::resolve(flags("unknown")).unwrap();
        assert_eq!(config.provider.provider, "unknown");
        assert_eq!(config.provider.api_key, "");
    }

    #[test]
    fn test_local_endpoint_flag_wins_over_env() {
        temp_env::with_var(OLLAMA_ENDPOINT_ENV, Some("http://env:11434/api/generate"), || {
            let mut f = flags("local");
            f.endpoint = Some("http://flag:11434/api/generate".to_string());
            let config = AppConfig::resolve(f).unwrap();
            assert_eq!(
                config.provider.endpoint.as_deref(),
                Some("http://flag:11434/api/generate")
            );
        });
    }

    #[test]
    fn test_local_endpoint_falls_back_to_env() {
        temp_env::with_var(OLLAMA_ENDPOINT_ENV, Some("http://env:11434/api/generate"), || {
            let config = AppConfig::resolve(flags("local")).unwrap();
            assert_eq!(
                config.provider.endpoint.as_deref(),
                Some("http://env:11434/api/generate")
            );
        });
    }

    #[test]
    fn test_endpoint_ignored_for_hosted_backends() {
        let mut f = flags("openai");
        f.endpoint = Some("http://elsewhere".to_string());
        let config = AppConfig::resolve(f).unwrap();
        assert!(config.provider.endpoint.is_none());
    }
}
