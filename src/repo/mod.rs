//! Repository inspection through the `git` CLI.

pub mod diff;
pub mod git;
pub mod scan;

pub use diff::{Changes, capture_staged_diff, extract_changed_files};
pub use git::{GitCli, GitSource};
pub use scan::{current_branch, detect_languages, list_tracked_files};
