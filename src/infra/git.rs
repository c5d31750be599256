use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::commit::{CommitIdentity, DiffRange};
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    async fn run_git<I, S>(&self, args: I) -> AppResult<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args
            .into_iter()
            .map(|arg| arg.as_ref().to_os_string())
            .collect();
        let rendered = args
            .iter()
            .map(|arg| arg.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        debug!(command = %rendered, "running git");

        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.workspace_root)
            .output()
            .await
            .map_err(|err| {
                AppError::VersionControl(format!("failed to run git {rendered}: {err}"))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::VersionControl(format!(
                "git {rendered} exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Splits `git diff --name-only` output into paths. Names are kept as git
/// prints them, apart from a trailing carriage return.
fn parse_name_only(stdout: &str) -> Vec<String> {
    stdout
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn changed_paths(&self, range: &DiffRange) -> AppResult<Vec<String>> {
        let mut args = vec!["diff".to_string(), "--name-only".to_string()];
        args.extend(range.to_args());
        let stdout = self.run_git(&args).await?;
        Ok(parse_name_only(&stdout))
    }

    async fn commit_and_push(
        &self,
        paths: &[PathBuf],
        identity: &CommitIdentity,
        message: &str,
    ) -> AppResult<()> {
        if paths.is_empty() {
            return Err(AppError::VersionControl("nothing to commit".to_string()));
        }

        self.run_git(["config", "user.name", identity.name.as_str()]).await?;
        self.run_git(["config", "user.email", identity.email.as_str()]).await?;

        let mut add: Vec<OsString> = vec!["add".into(), "--".into()];
        add.extend(paths.iter().map(|path| path.as_os_str().to_os_string()));
        self.run_git(add).await?;

        self.run_git(["commit", "-m", message]).await?;
        self.run_git(["push"]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::process::Command as StdCommand;

    use tempfile::TempDir;

    use super::*;

    fn git(dir: &Path, args: &[&str]) -> String {
        let output = StdCommand::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .expect("git is installed");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    fn init_repo(dir: &Path) {
        git(dir, &["init", "-q", "-b", "main"]);
        git(dir, &["config", "user.name", "Test"]);
        git(dir, &["config", "user.email", "test@example.com"]);
        git(dir, &["config", "commit.gpgsign", "false"]);
    }

    fn commit_all(dir: &Path, message: &str) {
        git(dir, &["add", "-A"]);
        git(dir, &["commit", "-q", "-m", message]);
    }

    #[test]
    fn keeps_surrounding_spaces_in_names() {
        let paths = parse_name_only("docs/a.md\r\n spaced name.md \n\nREADME.md\n");
        assert_eq!(paths, vec!["docs/a.md", " spaced name.md ", "README.md"]);
    }

    #[tokio::test]
    async fn lists_paths_changed_in_last_commit() {
        let repo = TempDir::new().unwrap();
        init_repo(repo.path());
        fs::write(repo.path().join("README.md"), "# Readme\n").unwrap();
        commit_all(repo.path(), "initial");

        fs::create_dir_all(repo.path().join("docs")).unwrap();
        fs::write(repo.path().join("docs/guide.md"), "guide\n").unwrap();
        fs::write(repo.path().join("main.rs"), "fn main() {}\n").unwrap();
        commit_all(repo.path(), "second");

        let cli = GitCli::new(repo.path().to_path_buf());
        let mut paths = cli.changed_paths(&DiffRange::LastCommit).await.unwrap();
        paths.sort();
        assert_eq!(paths, vec!["docs/guide.md", "main.rs"]);
    }

    #[tokio::test]
    async fn diff_against_missing_base_fails() {
        let repo = TempDir::new().unwrap();
        init_repo(repo.path());
        fs::write(repo.path().join("README.md"), "# Readme\n").unwrap();
        commit_all(repo.path(), "initial");

        let cli = GitCli::new(repo.path().to_path_buf());
        let result = cli
            .changed_paths(&DiffRange::MergeBase {
                base_ref: "does-not-exist".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::VersionControl(_))));
    }

    #[tokio::test]
    async fn commits_and_pushes_to_upstream() {
        let root = TempDir::new().unwrap();
        let remote = root.path().join("remote.git");
        let work = root.path().join("work");
        fs::create_dir_all(&remote).unwrap();
        fs::create_dir_all(&work).unwrap();
        git(&remote, &["init", "-q", "--bare", "-b", "main"]);

        init_repo(&work);
        fs::write(work.join("README.md"), "# Readme\n").unwrap();
        commit_all(&work, "initial");
        git(&work, &["remote", "add", "origin", remote.to_str().unwrap()]);
        git(&work, &["push", "-q", "-u", "origin", "main"]);

        fs::create_dir_all(work.join(".claude-summaries")).unwrap();
        fs::write(
            work.join(".claude-summaries/README.summary.md"),
            "# Summary of README.md\n\nok\n",
        )
        .unwrap();

        let cli = GitCli::new(work.clone());
        cli.commit_and_push(
            &[PathBuf::from(".claude-summaries/README.summary.md")],
            &CommitIdentity::default(),
            "Add Claude summaries [skip ci]",
        )
        .await
        .unwrap();

        let log = git(&remote, &["log", "-1", "--format=%an <%ae>|%s"]);
        assert_eq!(
            log.trim(),
            "Claude Bot <claude-bot@users.noreply.github.com>|Add Claude summaries [skip ci]"
        );
    }

    #[tokio::test]
    async fn push_without_remote_is_an_error() {
        let repo = TempDir::new().unwrap();
        init_repo(repo.path());
        fs::write(repo.path().join("README.md"), "# Readme\n").unwrap();
        commit_all(repo.path(), "initial");
        fs::write(repo.path().join("out.md"), "summary\n").unwrap();

        let cli = GitCli::new(repo.path().to_path_buf());
        let result = cli
            .commit_and_push(
                &[PathBuf::from("out.md")],
                &CommitIdentity::default(),
                "msg",
            )
            .await;
        assert!(matches!(result, Err(AppError::VersionControl(_))));

        // The local commit stays in place.
        let log = git(repo.path(), &["log", "-1", "--format=%s"]);
        assert_eq!(log.trim(), "msg");
    }
}
