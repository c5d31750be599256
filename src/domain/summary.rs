use std::path::{Path, PathBuf};

/// Where the summary of `source` lives, relative to the workspace root.
///
/// The trailing `extension` is swapped for `.summary{extension}` and the result
/// is placed under `output_dir`, mirroring the source's directory layout.
pub fn summary_path(output_dir: &Path, source: &str, extension: &str) -> PathBuf {
    let renamed = match source.strip_suffix(extension) {
        Some(stem) => format!("{stem}.summary{extension}"),
        None => format!("{source}.summary{extension}"),
    };
    output_dir.join(renamed)
}

pub fn render_summary(source: &str, summary: &str) -> String {
    format!("# Summary of {source}\n\n{summary}\n")
}
