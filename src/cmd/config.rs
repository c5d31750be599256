use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::AppConfig;
use crate::domain::event::CiEvent;
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the effective configuration read from the environment (secrets masked).
    Show,
}

pub fn run(config: &AppConfig, command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => run_show(config, &mut io::stdout()),
    }
}

fn run_show(config: &AppConfig, out: &mut impl Write) -> AppResult<()> {
    writeln!(out, "Workspace: {}", config.workspace_root.display())?;
    writeln!(out, "API key: {}", mask_secret(&config.api_key))?;
    writeln!(out, "API URL: {}", config.api_url)?;
    writeln!(out, "Model: {}", config.model)?;
    writeln!(out, "Max tokens: {}", config.max_tokens)?;
    writeln!(out, "Chunk size: {} characters", config.chunk_size)?;
    writeln!(out, "Document extension: {}", config.extension)?;
    writeln!(out, "Output directory: {}", config.output_dir.display())?;
    writeln!(out, "Event: {}", config.event.as_str())?;
    if let CiEvent::PullRequest { base_ref } = &config.event {
        writeln!(out, "Base ref: {}", display_value(base_ref))?;
    }
    writeln!(
        out,
        "Event payload: {}",
        display_value(
            &config
                .event_path
                .as_ref()
                .map(|path| path.display().to_string())
        )
    )?;
    writeln!(out, "Allowed pusher: {}", display_value(&config.allowed_pusher))?;
    Ok(())
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars: Vec<char> = token.chars().collect();
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[chars.len() - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
