use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::commit::{CommitIdentity, DiffRange};
use crate::error::AppResult;

#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Paths touched in `range`, in the order git reports them.
    async fn changed_paths(&self, range: &DiffRange) -> AppResult<Vec<String>>;

    /// Stages `paths`, commits them as `identity` and pushes the current branch.
    async fn commit_and_push(
        &self,
        paths: &[PathBuf],
        identity: &CommitIdentity,
        message: &str,
    ) -> AppResult<()>;
}
