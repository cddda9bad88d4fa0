//! Project context assembly for commit message generation.

pub mod builder;
pub mod prompt;

pub use builder::ContextBuilder;
pub use prompt::{SYSTEM_PROMPT, SYSTEM_PROMPT_VERSION};

/// Repository description handed to a provider, plus the instruction text.
///
/// Built once per run by [`ContextBuilder::build`] and never mutated after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    narrative: String,
    system_prompt: String,
}

impl ProjectContext {
    pub fn new(narrative: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            narrative: narrative.into(),
            system_prompt: system_prompt.into(),
        }
    }

    /// The section-delimited context document.
    pub fn narrative(&self) -> &str {
        &self.narrative
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}
