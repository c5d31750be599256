use serde::Deserialize;

/// The CI trigger that started the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CiEvent {
    PullRequest { base_ref: Option<String> },
    Push,
}

impl CiEvent {
    pub fn from_parts(event_name: Option<&str>, base_ref: Option<String>) -> Self {
        match event_name {
            Some("pull_request") => CiEvent::PullRequest { base_ref },
            _ => CiEvent::Push,
        }
    }

    pub fn is_pull_request(&self) -> bool {
        matches!(self, CiEvent::PullRequest { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CiEvent::PullRequest { .. } => "pull_request",
            CiEvent::Push => "push",
        }
    }
}

/// The slice of the webhook payload needed to tell fork pull requests apart
/// and to identify who pushed.
#[derive(Debug, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pull_request: Option<PullRequestPayload>,
    #[serde(default)]
    pusher: Option<PusherPayload>,
}

#[derive(Debug, Deserialize)]
struct PusherPayload {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    #[serde(default)]
    head: Option<HeadPayload>,
}

#[derive(Debug, Deserialize)]
struct HeadPayload {
    #[serde(default)]
    repo: Option<RepoPayload>,
}

#[derive(Debug, Deserialize)]
struct RepoPayload {
    #[serde(default)]
    fork: bool,
}

impl EventPayload {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn is_fork_pull_request(&self) -> bool {
        self.pull_request
            .as_ref()
            .and_then(|pr| pr.head.as_ref())
            .and_then(|head| head.repo.as_ref())
            .is_some_and(|repo| repo.fork)
    }

    /// The pusher's `name`, falling back to `username`. Absent on events that
    /// are not pushes.
    pub fn pusher(&self) -> Option<&str> {
        let pusher = self.pusher.as_ref()?;
        pusher
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| pusher.username.as_deref().filter(|name| !name.is_empty()))
    }
}
