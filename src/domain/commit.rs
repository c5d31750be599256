pub const DEFAULT_AUTHOR_NAME: &str = "Claude Bot";
pub const DEFAULT_AUTHOR_EMAIL: &str = "claude-bot@users.noreply.github.com";
pub const SUMMARY_COMMIT_MESSAGE: &str = "Add Claude summaries [skip ci]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

impl Default for CommitIdentity {
    fn default() -> Self {
        Self {
            name: DEFAULT_AUTHOR_NAME.to_string(),
            email: DEFAULT_AUTHOR_EMAIL.to_string(),
        }
    }
}

/// Revision range compared to find changed files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffRange {
    /// Three-dot comparison against the pull request's base branch.
    MergeBase { base_ref: String },
    /// The last commit on the pushed branch.
    LastCommit,
}

impl DiffRange {
    pub fn to_args(&self) -> Vec<String> {
        match self {
            DiffRange::MergeBase { base_ref } => vec![format!("origin/{base_ref}...HEAD")],
            DiffRange::LastCommit => vec!["HEAD~1".to_string(), "HEAD".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_base_range() {
        let range = DiffRange::MergeBase {
            base_ref: "main".to_string(),
        };
        assert_eq!(range.to_args(), vec!["origin/main...HEAD"]);
    }

    #[test]
    fn last_commit_range() {
        assert_eq!(DiffRange::LastCommit.to_args(), vec!["HEAD~1", "HEAD"]);
    }
}
