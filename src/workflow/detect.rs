use std::path::Path;

use tracing::error;

use crate::context::AppContext;
use crate::domain::commit::DiffRange;
use crate::domain::event::CiEvent;

/// Documents touched by the triggering event that still exist in the
/// workspace. Never fails: diff problems are logged and yield no documents.
pub async fn changed_documents(ctx: &AppContext) -> Vec<String> {
    let range = match &ctx.config.event {
        CiEvent::PullRequest {
            base_ref: Some(base_ref),
        } => DiffRange::MergeBase {
            base_ref: base_ref.clone(),
        },
        CiEvent::PullRequest { base_ref: None } => {
            error!(
                "Error getting changed files: GITHUB_BASE_REF not set for pull_request event"
            );
            return Vec::new();
        }
        CiEvent::Push => DiffRange::LastCommit,
    };

    match ctx.version_control.changed_paths(&range).await {
        Ok(paths) => filter_documents(paths, &ctx.config.extension, &ctx.config.workspace_root),
        Err(err) => {
            error!("Error getting changed files: {err}");
            Vec::new()
        }
    }
}

pub fn filter_documents(
    paths: Vec<String>,
    extension: &str,
    workspace_root: &Path,
) -> Vec<String> {
    paths
        .into_iter()
        .filter(|path| path.ends_with(extension))
        .filter(|path| workspace_root.join(path).exists())
        .collect()
}
