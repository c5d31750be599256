use std::path::PathBuf;

use tokio::fs;
use tracing::info;

use crate::context::AppContext;
use crate::domain::chunk::{char_len, chunk_text};
use crate::domain::summary::{render_summary, summary_path};
use crate::error::AppResult;
use crate::services::LanguageModelService;

pub const DOCUMENT_PROMPT: &str = "Summarize this Markdown document concisely:";
pub const COMBINE_PROMPT: &str =
    "Combine these section summaries into a cohesive overall summary:";
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

fn section_prompt(index: usize, total: usize) -> String {
    format!("Summarize this section (chunk {index} of {total}):")
}

/// Summarizes `content` with one call when it fits in `chunk_size` characters,
/// otherwise one call per chunk plus a final call merging the section summaries.
pub async fn summarize_text(
    model: &dyn LanguageModelService,
    content: &str,
    chunk_size: usize,
) -> AppResult<String> {
    if char_len(content) <= chunk_size {
        return model.complete(DOCUMENT_PROMPT, content).await;
    }

    let chunks = chunk_text(content, chunk_size);
    let total = chunks.len();
    info!("  File split into {total} chunks");

    let mut section_summaries = Vec::with_capacity(total);
    for (idx, chunk) in chunks.iter().enumerate() {
        info!("  Summarizing chunk {}/{total}...", idx + 1);
        let summary = model.complete(&section_prompt(idx + 1, total), chunk).await?;
        section_summaries.push(summary);
    }

    model
        .complete(COMBINE_PROMPT, &section_summaries.join(SECTION_SEPARATOR))
        .await
}

/// Summarizes one document and writes its summary file. Returns the summary
/// path relative to the workspace root.
pub async fn process_file(ctx: &AppContext, source: &str) -> AppResult<PathBuf> {
    info!("Processing: {source}");
    let config = &ctx.config;
    let content = fs::read_to_string(config.workspace_root.join(source)).await?;

    let summary = summarize_text(ctx.language_model.as_ref(), &content, config.chunk_size).await?;

    let relative = summary_path(&config.output_dir, source, &config.extension);
    let target = config.workspace_root.join(&relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(&target, render_summary(source, &summary)).await?;

    info!("  Summary written to: {}", relative.display());
    Ok(relative)
}
