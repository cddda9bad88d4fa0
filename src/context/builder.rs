//! Step-wise accumulation of repository signals into a [`ProjectContext`].
//!
//! Each `add_*` step may fail independently. Failures are recorded rather than
//! returned, so a caller can chain every step and inspect the outcome once at
//! [`ContextBuilder::build`].

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::ContextError;
use crate::repo::{Changes, GitCli, GitSource, current_branch, detect_languages, list_tracked_files};

use super::ProjectContext;
use super::prompt::{SYSTEM_PROMPT, SYSTEM_PROMPT_VERSION};

const STRUCTURE_HEADER: &str = "Project Structure";
const LANGUAGES_HEADER: &str = "Project Languages";
const BRANCH_HEADER: &str = "Git branch";
const CHANGES_HEADER: &str = "Changes";
const CONTENTS_HEADER: &str = "Changed Files Content";

/// Accumulator for the context document.
///
/// Created by [`ContextBuilder::new`], advanced by the `add_*` steps (each
/// consumes and returns the builder) and finished by [`ContextBuilder::build`].
pub struct ContextBuilder<S = GitCli> {
    source: S,
    root: PathBuf,
    files: Vec<String>,
    errors: Vec<ContextError>,
    languages: Option<BTreeSet<&'static str>>,
    branch: Option<String>,
    changes: Option<Changes>,
    file_contents: Option<IndexMap<String, String>>,
}

impl ContextBuilder<GitCli> {
    /// Start a builder for the repository at `root` using the `git` CLI.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ContextError> {
        let root = root.into();
        Self::with_source(GitCli::new(root.clone()), root)
    }
}

impl<S: GitSource> ContextBuilder<S> {
    /// Start a builder over any [`GitSource`].
    ///
    /// Fails when the tracked files cannot be listed; every later step
    /// depends on that list.
    pub fn with_source(source: S, root: impl Into<PathBuf>) -> Result<Self, ContextError> {
        let files = list_tracked_files(&source).map_err(ContextError::ListFiles)?;
        debug!("Listed {} tracked files", files.len());

        Ok(Self {
            source,
            root: root.into(),
            files,
            errors: Vec::new(),
            languages: None,
            branch: None,
            changes: None,
            file_contents: None,
        })
    }

    /// Tracked files listed at construction.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Record the languages derived from tracked file extensions.
    pub fn add_languages(mut self) -> Self {
        self.languages = Some(detect_languages(&self.files));
        self
    }

    /// Record the current branch.
    pub fn add_git_branch(mut self) -> Self {
        match current_branch(&self.source) {
            Ok(branch) => self.branch = Some(branch),
            Err(e) => self.errors.push(ContextError::Branch(e)),
        }
        self
    }

    /// Record the staged diff and its changed files.
    pub fn add_changes(mut self) -> Self {
        match Changes::capture(&self.source) {
            Ok(changes) => {
                debug!("Staged changes touch {} files", changes.changed_files().len());
                self.changes = Some(changes);
            }
            Err(e) => self.errors.push(ContextError::Changes(e)),
        }
        self
    }

    /// Record the current on-disk content of every changed file.
    ///
    /// Only meaningful after a successful [`add_changes`](Self::add_changes);
    /// otherwise the recorded map is empty. Diff paths are relative to the
    /// working tree's top level, which may sit above the builder's root.
    /// Missing or unreadable files (deleted, binary) map to an empty string.
    pub fn add_changed_files_content(mut self) -> Self {
        let contents = match &self.changes {
            Some(changes) => read_contents(&self.worktree_root(), changes),
            None => IndexMap::new(),
        };
        self.file_contents = Some(contents);
        self
    }

    fn worktree_root(&self) -> PathBuf {
        match self.source.show_toplevel() {
            Ok(toplevel) if !toplevel.trim().is_empty() => PathBuf::from(toplevel.trim()),
            Ok(_) => self.root.clone(),
            Err(e) => {
                warn!("Could not resolve working tree top level, using {}: {}", self.root.display(), e);
                self.root.clone()
            }
        }
    }

    /// Finish the context.
    ///
    /// When any step failed, returns the first recorded error; later ones are
    /// dropped.
    pub fn build(self) -> Result<ProjectContext, ContextError> {
        if let Some(first) = self.errors.into_iter().next() {
            return Err(first);
        }

        let mut narrative = String::new();

        push_section(&mut narrative, STRUCTURE_HEADER, &lines(&self.files));

        if let Some(languages) = &self.languages {
            push_section(&mut narrative, LANGUAGES_HEADER, &lines(languages));
        }

        if let Some(branch) = &self.branch {
            push_section(&mut narrative, BRANCH_HEADER, branch);
        }

        if let Some(changes) = &self.changes {
            push_section(
                &mut narrative,
                CHANGES_HEADER,
                &String::from_utf8_lossy(changes.diff()),
            );
        }

        if let Some(contents) = &self.file_contents {
            let body: String = contents
                .iter()
                .map(|(path, content)| format!("--- {path} ---\n{}", with_newline(content)))
                .collect();
            push_section(&mut narrative, CONTENTS_HEADER, &body);
        }

        debug!(
            "Built project context: {} chars, system prompt v{}",
            narrative.len(),
            SYSTEM_PROMPT_VERSION
        );
        Ok(ProjectContext::new(narrative, SYSTEM_PROMPT))
    }
}

fn read_contents(root: &Path, changes: &Changes) -> IndexMap<String, String> {
    changes
        .changed_files()
        .iter()
        .map(|path| {
            let content = std::fs::read_to_string(root.join(path)).unwrap_or_default();
            (path.clone(), content)
        })
        .collect()
}

/// Append `=== title ===` and `body`, or nothing when `body` is blank.
fn push_section(out: &mut String, title: &str, body: &str) {
    if body.trim().is_empty() {
        return;
    }
    out.push_str("\n=== ");
    out.push_str(title);
    out.push_str(" ===\n");
    out.push_str(&with_newline(body));
}

fn lines<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| format!("{}\n", item.as_ref()))
        .collect()
}

fn with_newline(text: &str) -> String {
    if text.is_empty() || text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}
