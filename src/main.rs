//! ai-commit - CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use console::Term;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ai_commit::config::{AppConfig, Flags};
use ai_commit::context::{ContextBuilder, SYSTEM_PROMPT_VERSION};
use ai_commit::error::CommitError;
use ai_commit::providers::new_provider;
use ai_commit::repo::GitCli;
use ai_commit::ui::{self, Card};

const DEFAULT_CARD_WIDTH: usize = 80;

/// Generate a commit message for your staged changes using an LLM.
#[derive(Parser, Debug)]
#[command(name = "ai-commit")]
#[command(about = "Generate a commit message for staged changes using an LLM")]
#[command(version)]
struct Cli {
    /// LLM backend: openai, claude, mistral, gemini, openrouter or local
    #[arg(long, default_value = "openai")]
    provider: String,

    /// Model name (defaults to the backend's default model)
    #[arg(long)]
    model: Option<String>,

    /// Project directory
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Endpoint for the local backend (falls back to OLLAMA_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Offer to commit with the generated message
    #[arg(long)]
    commit: bool,

    /// Include the full contents of changed files in the context
    #[arg(long)]
    with_content: bool,

    /// Show debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let width = card_width();
    match run(cli, width).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", ui::render_error(&format!("{:#}", e), width));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "ai_commit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn card_width() -> usize {
    let (_, cols) = Term::stdout().size();
    usize::from(cols).min(DEFAULT_CARD_WIDTH)
}

async fn run(cli: Cli, width: usize) -> Result<()> {
    let config = AppConfig::resolve(Flags {
        provider: cli.provider,
        model: cli.model,
        dir: cli.dir,
        endpoint: cli.endpoint,
        commit: cli.commit,
        with_content: cli.with_content,
    })?;

    // Fail on configuration before touching git
    let provider = new_provider(&config.provider)?;
    let info = provider.info();
    debug!(
        "Using {} in {} (system prompt v{})",
        info,
        config.project_dir.display(),
        SYSTEM_PROMPT_VERSION
    );

    let mut builder = ContextBuilder::new(&config.project_dir)?
        .add_languages()
        .add_git_branch()
        .add_changes();
    if config.with_content {
        builder = builder.add_changed_files_content();
    }

    let context = match builder.build() {
        Ok(context) => context,
        Err(e) if e.is_no_changes() => {
            println!("{}", ui::notice(&e.to_string()));
            return Ok(());
        }
        Err(e) => return Err(anyhow::Error::new(e).context("Failed to build project context")),
    };

    println!("{}", ui::notice(&format!("Generating commit message with {}...", info)));
    let message = provider
        .generate_commit_message(&context)
        .await
        .with_context(|| format!("{} failed to generate a commit message", info.name))?;
    let message = message.trim();
    if message.is_empty() {
        anyhow::bail!("{} returned an empty commit message", info.name);
    }

    println!("{}", Card::new(info.to_string(), message, width).render());

    if config.commit && ui::ask_user()? {
        GitCli::new(&config.project_dir)
            .commit(message)
            .map_err(CommitError::CommitFailed)?;
        println!("{}", ui::notice("Committed."));
    }

    Ok(())
}
