use std::path::PathBuf;

use tracing::{error, info};

use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::detect::changed_documents;
use crate::workflow::event::pusher_allowed;
use crate::workflow::publish::{PublishOutcome, publish};
use crate::workflow::summarize::process_file;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub skip_commit: bool,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub detected: Vec<String>,
    pub written: Vec<PathBuf>,
    pub failed: Vec<(String, String)>,
    pub publish: PublishOutcome,
}

impl RunOutcome {
    fn nothing_detected() -> Self {
        Self {
            detected: Vec::new(),
            written: Vec::new(),
            failed: Vec::new(),
            publish: PublishOutcome::NothingToCommit,
        }
    }
}

/// Detects changed documents, summarizes them one at a time and publishes the
/// summaries. A missing credential or an unreadable event payload aborts the
/// run; per-file and git failures do not.
pub async fn summarize_changes(ctx: &AppContext, options: RunOptions) -> AppResult<RunOutcome> {
    ctx.config.require_api_key()?;

    if !pusher_allowed(&ctx.config).await? {
        return Ok(RunOutcome::nothing_detected());
    }

    let detected = changed_documents(ctx).await;
    if detected.is_empty() {
        info!("No changed {} files found.", ctx.config.extension);
        return Ok(RunOutcome::nothing_detected());
    }

    info!(
        "Found {} changed {} file(s)",
        detected.len(),
        ctx.config.extension
    );

    let mut written = Vec::with_capacity(detected.len());
    let mut failed = Vec::new();
    for source in &detected {
        match process_file(ctx, source).await {
            Ok(path) => written.push(path),
            Err(err) => {
                error!("Error processing {source}: {err}");
                failed.push((source.clone(), err.to_string()));
            }
        }
    }

    let publish = publish(ctx, &written, options.skip_commit).await?;

    Ok(RunOutcome {
        detected,
        written,
        failed,
        publish,
    })
}
