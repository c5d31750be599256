mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::summarize::{self, SummarizeCommandArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::git::GitCli;
use crate::infra::llm::AnthropicClient;
use crate::workflow::publish::PublishOutcome;

#[derive(Parser)]
#[command(
    name = "docdigest",
    author,
    version,
    about = "Summarize changed documentation files with Claude"
)]
struct Cli {
    /// Repository root to operate in (defaults to the current directory).
    #[arg(short, long, global = true)]
    workspace: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize changed documents, write the summaries and push them.
    Summarize(SummarizeArgs),
    /// List the changed documents that would be summarized.
    Changed,
    /// Inspect the configuration read from the environment.
    Config(ConfigArgs),
}

#[derive(Args)]
struct SummarizeArgs {
    /// Write summaries but do not commit or push them.
    #[arg(long)]
    no_commit: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    if let Err(error) = run().await {
        error!("Fatal error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docdigest=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let workspace = match cli.workspace {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let config = AppConfig::load(&workspace)?;

    match cli.command {
        Commands::Config(args) => config_cmd::run(&config, args.command),
        Commands::Changed => {
            let ctx = build_context(config);
            for path in cmd::changed::run(&ctx).await {
                println!("{path}");
            }
            Ok(())
        }
        Commands::Summarize(args) => run_summarize(config, args).await,
    }
}

fn build_context(config: AppConfig) -> AppContext {
    let git = Arc::new(GitCli::new(config.workspace_root.clone()));
    let language_model = Arc::new(AnthropicClient::new(
        config.api_url.clone(),
        config.api_key.clone(),
        config.model.clone(),
        config.max_tokens,
    ));
    AppContext::new(config, git, language_model)
}

async fn run_summarize(config: AppConfig, args: SummarizeArgs) -> AppResult<()> {
    config.require_api_key()?;
    let ctx = build_context(config);

    let outcome = summarize::run(
        &ctx,
        SummarizeCommandArgs {
            no_commit: args.no_commit,
        },
    )
    .await?;

    if outcome.detected.is_empty() {
        return Ok(());
    }

    info!(
        "Summarized {} of {} file(s)",
        outcome.written.len(),
        outcome.detected.len()
    );
    if !outcome.failed.is_empty() {
        warn!(
            "{} file(s) failed: {}",
            outcome.failed.len(),
            outcome
                .failed
                .iter()
                .map(|(path, _)| path.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    if let PublishOutcome::Failed(reason) = &outcome.publish {
        warn!("Summaries were written but not pushed: {reason}");
    }

    Ok(())
}
