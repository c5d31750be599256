use tracing::info;

use crate::config::AppConfig;
use crate::domain::event::EventPayload;
use crate::error::{AppError, AppResult};

/// Reads and parses the webhook payload named by `GITHUB_EVENT_PATH`.
pub async fn load_event_payload(config: &AppConfig) -> AppResult<EventPayload> {
    let event_path = config.event_path.as_ref().ok_or_else(|| {
        AppError::Configuration(format!(
            "GITHUB_EVENT_PATH not set for {} event",
            config.event.as_str()
        ))
    })?;

    let raw = tokio::fs::read_to_string(event_path).await.map_err(|err| {
        AppError::Configuration(format!(
            "failed to read GITHUB_EVENT_PATH {}: {err}",
            event_path.display()
        ))
    })?;

    EventPayload::from_json(&raw).map_err(|err| {
        AppError::Configuration(format!(
            "invalid event payload in GITHUB_EVENT_PATH {}: {err}",
            event_path.display()
        ))
    })
}

/// Whether the run may proceed given `ALLOWED_PUSHER`. With no allow-listed
/// pusher every event is accepted without reading the payload.
pub async fn pusher_allowed(config: &AppConfig) -> AppResult<bool> {
    let Some(allowed) = config.allowed_pusher.as_deref() else {
        return Ok(true);
    };

    let payload = load_event_payload(config).await?;
    match payload.pusher() {
        Some(pusher) if pusher == allowed => Ok(true),
        Some(pusher) => {
            info!("Pusher {pusher} is not {allowed} (ALLOWED_PUSHER) - skipping run.");
            Ok(false)
        }
        None => {
            info!("Event has no pusher and ALLOWED_PUSHER is {allowed} - skipping run.");
            Ok(false)
        }
    }
}
