//! Tracked files, language detection and current branch.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::GitError;

use super::git::GitSource;

/// Closed extension → language table.
const LANGUAGE_TABLE: &[(&str, &str)] = &[
    ("go", "Go"),
    ("js", "JavaScript/TypeScript"),
    ("ts", "JavaScript/TypeScript"),
    ("py", "Python"),
    ("php", "PHP"),
    ("java", "Java"),
    ("rb", "Ruby"),
    ("rs", "Rust"),
];

/// List version-controlled files, dropping blank lines.
pub fn list_tracked_files<S: GitSource + ?Sized>(source: &S) -> Result<Vec<String>, GitError> {
    let stdout = source.ls_files()?;
    Ok(stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Read the current branch name.
///
/// Detached HEAD yields an empty string rather than an error.
pub fn current_branch<S: GitSource + ?Sized>(source: &S) -> Result<String, GitError> {
    Ok(source.show_current_branch()?.trim().to_string())
}

/// Map file extensions to the distinct set of languages in use.
///
/// Unknown extensions are ignored. The result is sorted by name.
pub fn detect_languages<S: AsRef<str>>(files: &[S]) -> BTreeSet<&'static str> {
    files
        .iter()
        .filter_map(|file| language_for(file.as_ref()))
        .collect()
}

fn language_for(file: &str) -> Option<&'static str> {
    let ext = Path::new(file).extension()?.to_str()?;
    LANGUAGE_TABLE
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, language)| *language)
}
