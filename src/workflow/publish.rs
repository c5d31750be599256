use std::path::PathBuf;

use tracing::{error, info};

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::commit::{CommitIdentity, SUMMARY_COMMIT_MESSAGE};
use crate::error::AppResult;
use crate::workflow::event::load_event_payload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    NothingToCommit,
    SkippedByFlag,
    SkippedFork,
    Pushed,
    Failed(String),
}

/// Commits and pushes the written summaries. Git failures are logged and
/// reported in the outcome; an unreadable event payload is returned as an error.
pub async fn publish(
    ctx: &AppContext,
    summary_paths: &[PathBuf],
    skip_commit: bool,
) -> AppResult<PublishOutcome> {
    if summary_paths.is_empty() {
        return Ok(PublishOutcome::NothingToCommit);
    }
    if skip_commit {
        info!(
            "Commit disabled - leaving {} summary file(s) uncommitted",
            summary_paths.len()
        );
        return Ok(PublishOutcome::SkippedByFlag);
    }

    if is_fork_pull_request(&ctx.config).await? {
        info!("Fork PR detected - skipping commit (no write access)");
        return Ok(PublishOutcome::SkippedFork);
    }

    let result = ctx
        .version_control
        .commit_and_push(
            summary_paths,
            &CommitIdentity::default(),
            SUMMARY_COMMIT_MESSAGE,
        )
        .await;

    match result {
        Ok(()) => {
            info!("Summaries committed and pushed.");
            Ok(PublishOutcome::Pushed)
        }
        Err(err) => {
            error!("Error committing summaries: {err}");
            Ok(PublishOutcome::Failed(err.to_string()))
        }
    }
}

async fn is_fork_pull_request(config: &AppConfig) -> AppResult<bool> {
    if !config.event.is_pull_request() {
        return Ok(false);
    }
    Ok(load_event_payload(config).await?.is_fork_pull_request())
}
