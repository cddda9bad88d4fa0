//! End-to-end context assembly against real temporary git repositories.

mod common;

use ai_commit::context::{ContextBuilder, SYSTEM_PROMPT};
use ai_commit::error::{ChangesError, ContextError};
use ai_commit::repo::GitCli;

use common::TestRepo;

fn seeded_repo() -> TestRepo {
    let repo = TestRepo::new();
    repo.write_and_stage("README.md", "# demo\n");
    repo.write_and_stage("src/lib.rs", "pub fn one() -> u32 { 1 }\n");
    repo.commit("chore: initial commit");
    repo
}

#[test]
fn test_full_context_from_staged_changes() {
    let repo = seeded_repo();
    repo.write_and_stage("src/lib.rs", "pub fn one() -> u32 { 1 }\npub fn two() -> u32 { 2 }\n");
    repo.write_and_stage("web/app.ts", "export const x = 1;\n");

    let context = ContextBuilder::new(repo.path())
        .unwrap()
        .add_languages()
        .add_git_branch()
        .add_changes()
        .add_changed_files_content()
        .build()
        .unwrap();

    let narrative = context.narrative();
    assert_eq!(context.system_prompt(), SYSTEM_PROMPT);

    let structure = narrative.find("=== Project Structure ===").unwrap();
    let languages = narrative.find("=== Project Languages ===").unwrap();
    let branch = narrative.find("=== Git branch ===").unwrap();
    let changes = narrative.find("=== Changes ===").unwrap();
    let contents = narrative.find("=== Changed Files Content ===").unwrap();
    assert!(structure < languages && languages < branch && branch < changes && changes < contents);

    assert!(narrative.contains("README.md"));
    assert!(narrative.contains("JavaScript/TypeScript\nRust"));
    assert!(narrative.contains("\nmain\n"));
    assert!(narrative.contains("+pub fn two() -> u32 { 2 }"));
    assert!(narrative.contains("--- src/lib.rs ---\npub fn one()"));
    assert!(narrative.contains("--- web/app.ts ---\nexport const x = 1;"));
}

#[test]
fn test_nothing_staged_is_no_changes() {
    let repo = seeded_repo();

    let result = ContextBuilder::new(repo.path())
        .unwrap()
        .add_languages()
        .add_git_branch()
        .add_changes()
        .build();

    match result {
        Err(ContextError::Changes(ChangesError::NoChanges)) => {}
        other => panic!("Expected NoChanges, got: {:?}", other.map(|c| c.narrative().len())),
    }
}

#[test]
fn test_unstaged_edits_are_not_changes() {
    let repo = seeded_repo();
    repo.write_file("README.md", "# demo\n\nedited but not staged\n");

    let result = ContextBuilder::new(repo.path()).unwrap().add_changes().build();
    assert!(result.is_err_and(|e| e.is_no_changes()));
}

#[test]
fn test_outside_a_repository_fails_to_list_files() {
    let dir = tempfile::tempdir().unwrap();

    let result = ContextBuilder::new(dir.path());
    assert!(matches!(result, Err(ContextError::ListFiles(_))));
}

#[test]
fn test_deleted_file_content_is_empty() {
    let repo = seeded_repo();
    std::fs::remove_file(repo.path().join("README.md")).unwrap();
    let mut index = repo.repo.index().unwrap();
    index.remove_path(std::path::Path::new("README.md")).unwrap();
    index.write().unwrap();

    let context = ContextBuilder::new(repo.path())
        .unwrap()
        .add_changes()
        .add_changed_files_content()
        .build()
        .unwrap();

    assert!(context.narrative().contains("-# demo"));
    assert!(context.narrative().contains("--- README.md ---\n"));
}

#[test]
fn test_changed_file_content_from_subdirectory_root() {
    let repo = seeded_repo();
    repo.write_and_stage("sub/a.rs", "fn a() {}\n");

    let context = ContextBuilder::new(repo.path().join("sub"))
        .unwrap()
        .add_changes()
        .add_changed_files_content()
        .build()
        .unwrap();

    assert!(
        context
            .narrative()
            .ends_with("=== Changed Files Content ===\n--- sub/a.rs ---\nfn a() {}\n"),
        "got: {}",
        context.narrative()
    );
}

#[test]
fn test_commit_with_generated_message() {
    let repo = seeded_repo();
    repo.write_and_stage("src/lib.rs", "pub fn one() -> u32 { 1 }\n// note\n");

    GitCli::new(repo.path())
        .commit("docs: add note to lib")
        .unwrap();

    assert_eq!(repo.head_message().trim(), "docs: add note to lib");
}

#[test]
fn test_commit_with_nothing_staged_fails() {
    let repo = seeded_repo();

    let result = GitCli::new(repo.path()).commit("chore: nothing");
    assert!(result.is_err());
}
