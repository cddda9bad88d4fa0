//! ai-commit - generate commit messages for staged changes with an LLM.
//!
//! # Overview
//!
//! The context pipeline ([`context::ContextBuilder`]) gathers tracked files,
//! languages, the current branch, the staged diff and optionally the changed
//! files' contents into a [`ProjectContext`]. A [`providers::Provider`] sends
//! that context to one of the supported backends and returns a one-line
//! conventional commit message.

pub mod config;
pub mod context;
pub mod error;
pub mod providers;
pub mod repo;
pub mod ui;

// Re-export commonly used types
pub use config::{AppConfig, Flags};
pub use context::{ContextBuilder, ProjectContext, SYSTEM_PROMPT};
pub use error::{ChangesError, CommitError, ConfigError, ContextError, GitError, ProviderError};
pub use providers::{Provider, ProviderConfig, ProviderInfo, ProviderKind, new_provider};
pub use repo::{Changes, GitCli, GitSource};
