//! Error types for ai-commit modules using thiserror.

use thiserror::Error;

/// Errors from running the `git` executable.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found in PATH. Install git and make sure it is on your PATH")]
    NotInstalled,

    #[error("Failed to spawn git {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {command} exited with {}: {stderr}",
             code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Errors from capturing staged changes.
#[derive(Error, Debug)]
pub enum ChangesError {
    #[error("No staged changes detected in the repository. Stage files with 'git add' first")]
    NoChanges,

    #[error("Failed to get staged changes: {0}")]
    Git(#[source] GitError),
}

/// Errors recorded while assembling the project context.
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Failed to list tracked files: {0}")]
    ListFiles(#[source] GitError),

    #[error("Failed to read current branch: {0}")]
    Branch(#[source] GitError),

    #[error(transparent)]
    Changes(#[from] ChangesError),
}

impl ContextError {
    /// Whether this error is the expected "nothing staged" condition.
    pub fn is_no_changes(&self) -> bool {
        matches!(self, ContextError::Changes(ChangesError::NoChanges))
    }
}

/// Errors from LLM provider construction and calls.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error(
        "Unknown provider '{0}'. Expected one of: openai, claude, mistral, gemini, openrouter, local"
    )]
    UnknownProvider(String),

    #[error("No API key for {provider}. Set the {env_var} environment variable")]
    MissingApiKey {
        provider: &'static str,
        env_var: &'static str,
    },

    #[error("Failed to encode request: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Request to {provider} failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API returned status {status}: {body}")]
    Backend {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to decode {provider} response: {message}")]
    Decoding {
        provider: &'static str,
        message: String,
    },

    #[error("{0} returned no commit message")]
    EmptyResult(&'static str),
}

/// Errors from resolving CLI flags and environment into configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to resolve project directory '{path}': {source}")]
    InvalidDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the confirm-and-commit step.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Failed to read confirmation: {0}")]
    PromptFailed(String),

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] GitError),
}
