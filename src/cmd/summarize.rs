use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::pipeline::{RunOptions, RunOutcome, summarize_changes};

#[derive(Debug, Clone)]
pub struct SummarizeCommandArgs {
    pub no_commit: bool,
}

pub async fn run(ctx: &AppContext, args: SummarizeCommandArgs) -> AppResult<RunOutcome> {
    summarize_changes(
        ctx,
        RunOptions {
            skip_commit: args.no_commit,
        },
    )
    .await
}
