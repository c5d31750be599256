use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::domain::event::CiEvent;
use crate::error::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_CHUNK_SIZE: usize = 8000;
pub const DEFAULT_OUTPUT_DIR: &str = ".claude-summaries";
pub const DEFAULT_EXTENSION: &str = ".md";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub chunk_size: usize,
    pub event: CiEvent,
    pub event_path: Option<PathBuf>,
    pub allowed_pusher: Option<String>,
    pub output_dir: PathBuf,
    pub extension: String,
    pub workspace_root: PathBuf,
}

impl AppConfig {
    /// Reads the CI environment once. Call at startup only.
    pub fn load(workspace_hint: &Path) -> AppResult<Self> {
        Self::from_lookup(workspace_hint, |key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(workspace_hint: &Path, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let chunk_size = match get("CHUNK_SIZE_CHARS") {
            Some(raw) => parse_positive::<usize>("CHUNK_SIZE_CHARS", &raw)?,
            None => DEFAULT_CHUNK_SIZE,
        };
        let max_tokens = match get("CLAUDE_MAX_TOKENS") {
            Some(raw) => parse_positive::<u32>("CLAUDE_MAX_TOKENS", &raw)?,
            None => DEFAULT_MAX_TOKENS,
        };

        let extension = get("SUMMARY_EXTENSION")
            .map(|ext| {
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

        Ok(Self {
            api_key: get("ANTHROPIC_API_KEY"),
            api_url: get("ANTHROPIC_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: get("CLAUDE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens,
            chunk_size,
            event: CiEvent::from_parts(
                get("GITHUB_EVENT_NAME").as_deref(),
                get("GITHUB_BASE_REF"),
            ),
            event_path: get("GITHUB_EVENT_PATH").map(PathBuf::from),
            allowed_pusher: get("ALLOWED_PUSHER"),
            output_dir: get("SUMMARY_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            extension,
            workspace_root: workspace_hint.to_path_buf(),
        })
    }

    pub fn require_api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or(AppError::MissingCredential)
    }
}

fn parse_positive<T>(name: &str, raw: &str) -> AppResult<T>
where
    T: FromStr + PartialEq + Default,
{
    match raw.parse::<T>() {
        Ok(value) if value != T::default() => Ok(value),
        Ok(_) => Err(AppError::Configuration(format!(
            "{name} must be greater than zero"
        ))),
        Err(_) => Err(AppError::Configuration(format!(
            "{name} must be a positive integer, got '{raw}'"
        ))),
    }
}
