//! Staged diff capture and changed-file extraction.

use indexmap::IndexSet;
use tracing::debug;

use crate::error::ChangesError;

use super::git::GitSource;

/// Per-file header line emitted by `git diff`.
const DIFF_HEADER_PREFIX: &str = "diff --git ";

/// Staged changes captured from the index.
#[derive(Debug, Clone)]
pub struct Changes {
    diff: Vec<u8>,
    changed_files: IndexSet<String>,
}

impl Changes {
    /// Capture the staged diff and derive the changed-file set from it.
    pub fn capture<S: GitSource + ?Sized>(source: &S) -> Result<Self, ChangesError> {
        let diff = capture_staged_diff(source)?;
        Ok(Self::from_diff(diff))
    }

    /// Build from an already captured, non-empty diff.
    pub fn from_diff(diff: Vec<u8>) -> Self {
        let changed_files = extract_changed_files(&diff);
        Self {
            diff,
            changed_files,
        }
    }

    /// Raw unified diff bytes.
    pub fn diff(&self) -> &[u8] {
        &self.diff
    }

    /// Changed paths in order of first appearance in the diff.
    pub fn changed_files(&self) -> &IndexSet<String> {
        &self.changed_files
    }
}

/// Capture staged changes with the minimal diff algorithm.
///
/// Returns [`ChangesError::NoChanges`] when nothing is staged, which callers
/// should treat as an expected condition rather than a failure.
pub fn capture_staged_diff<S: GitSource + ?Sized>(source: &S) -> Result<Vec<u8>, ChangesError> {
    let diff = source.diff_cached().map_err(ChangesError::Git)?;

    if String::from_utf8_lossy(&diff).trim().is_empty() {
        return Err(ChangesError::NoChanges);
    }

    debug!("Captured staged diff: {} bytes", diff.len());
    Ok(diff)
}

/// Extract the set of changed file paths from unified diff text.
///
/// Reads `diff --git a/<path> b/<path>` headers, takes the destination path
/// and strips its `b/` prefix. A file touched by several hunks appears once.
pub fn extract_changed_files(diff: &[u8]) -> IndexSet<String> {
    let text = String::from_utf8_lossy(diff);

    text.lines()
        .filter(|line| line.starts_with(DIFF_HEADER_PREFIX))
        .filter_map(|line| line.split_whitespace().nth(3))
        .map(|token| token.strip_prefix("b/").unwrap_or(token).to_string())
        .collect()
}
