//! `GitClient` backed by the system `git` binary

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use super::clone::clone_dir_name;
use super::tags::{parse_tag_list, TagSet};
use super::GitClient;
use crate::{Error, Result};

/// Runs git as a child process
///
/// Authentication is whatever the user's git and SSH configuration provide.
#[derive(Debug, Clone)]
pub struct SystemGit {
    git_path: String,
}

impl SystemGit {
    /// Use `git` from `PATH`
    pub fn new() -> Self {
        Self {
            git_path: "git".to_string(),
        }
    }

    /// Use a specific git executable
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.git_path = path.into();
        self
    }

    /// Path of the git executable in use
    pub fn git_path(&self) -> &str {
        &self.git_path
    }

    /// Run git in `cwd` and return stdout, or a message describing the failure
    async fn run<I, S>(&self, cwd: &Path, args: I) -> std::result::Result<String, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.git_path);
        cmd.args(args).current_dir(cwd);
        tracing::debug!(git = %self.git_path, cwd = %cwd.display(), command = ?cmd.as_std(), "Running git");

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                format!("git executable not found at '{}'", self.git_path)
            } else {
                format!("failed to run git: {}", e)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(if stderr.is_empty() {
                format!("git exited with {}", output.status)
            } else {
                stderr
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GitClient for SystemGit {
    async fn clone_repo(
        &self,
        remote_url: &str,
        target_dir: &Path,
        options: &[String],
    ) -> Result<PathBuf> {
        let destination = target_dir.join(clone_dir_name(remote_url, options));

        let mut args: Vec<&OsStr> = vec![OsStr::new("clone")];
        args.extend(options.iter().map(OsStr::new));
        args.push(OsStr::new(remote_url));
        args.push(destination.as_os_str());

        self.run(target_dir, args)
            .await
            .map_err(|msg| Error::CloneFailed(format!("{}: {}", remote_url, msg)))?;

        Ok(destination)
    }

    async fn list_tags(&self, repo_path: &Path) -> Result<TagSet> {
        let stdout = self
            .run(repo_path, ["tag", "--list", "--sort=v:refname"])
            .await
            .map_err(Error::TagListFailed)?;

        Ok(parse_tag_list(&stdout))
    }

    async fn count_merge_commits(&self, repo_path: &Path, range: &str) -> Result<u64> {
        let stdout = self
            .run(repo_path, ["rev-list", "--count", "--merges", range])
            .await
            .map_err(|msg| Error::LogFailed(format!("{}: {}", range, msg)))?;

        stdout.trim().parse::<u64>().map_err(|e| {
            Error::LogFailed(format!("unexpected rev-list output {:?}: {}", stdout.trim(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command as StdCommand;
    use tempfile::TempDir;

    fn git_available() -> bool {
        StdCommand::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = StdCommand::new("git")
            .args([
                "-c",
                "user.name=marco",
                "-c",
                "user.email=marco@example.com",
                "-c",
                "commit.gpgsign=false",
                "-c",
                "tag.gpgsign=false",
            ])
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(
            status.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&status.stderr)
        );
    }

    /// An origin repo with a release tag and one merge landed after it
    fn origin_with_merge_after_release(root: &Path) -> PathBuf {
        let origin = root.join("origin");
        std::fs::create_dir_all(&origin).unwrap();
        git(&origin, &["init", "--quiet"]);
        git(&origin, &["symbolic-ref", "HEAD", "refs/heads/master"]);
        git(&origin, &["commit", "--allow-empty", "--quiet", "-m", "initial"]);
        git(&origin, &["tag", "1.0.0"]);
        git(&origin, &["checkout", "--quiet", "-b", "feature"]);
        git(&origin, &["commit", "--allow-empty", "--quiet", "-m", "feature work"]);
        git(&origin, &["checkout", "--quiet", "master"]);
        git(&origin, &["merge", "--no-ff", "--quiet", "-m", "Merge feature", "feature"]);
        git(&origin, &["tag", "v2.0.0-rc"]);
        origin
    }

    #[test]
    fn test_builder() {
        let git = SystemGit::new().with_path("/usr/local/bin/git");
        assert_eq!(git.git_path(), "/usr/local/bin/git");
        assert_eq!(SystemGit::default().git_path(), "git");
    }

    #[tokio::test]
    async fn test_clone_list_tags_and_count_merges() {
        if !git_available() {
            return;
        }

        let root = TempDir::new().unwrap();
        let origin = origin_with_merge_after_release(root.path());
        let scratch = root.path().join("scratch");
        std::fs::create_dir_all(&scratch).unwrap();

        let client = SystemGit::new();
        let clone = client
            .clone_repo(
                origin.to_str().unwrap(),
                &scratch,
                &["--bare".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(clone, scratch.join("origin.git"));
        assert!(clone.exists());

        let tags = client.list_tags(&clone).await.unwrap();
        assert_eq!(tags.all, vec!["1.0.0", "v2.0.0-rc"]);
        assert_eq!(tags.latest.as_deref(), Some("v2.0.0-rc"));

        let merges = client
            .count_merge_commits(&clone, "master...1.0.0")
            .await
            .unwrap();
        assert_eq!(merges, 1);

        let none = client
            .count_merge_commits(&clone, "master...v2.0.0-rc")
            .await
            .unwrap();
        assert_eq!(none, 0);
    }

    #[tokio::test]
    async fn test_count_merges_unknown_base_is_log_failure() {
        if !git_available() {
            return;
        }

        let root = TempDir::new().unwrap();
        let origin = origin_with_merge_after_release(root.path());

        let result = SystemGit::new()
            .count_merge_commits(&origin, "no-such-branch...1.0.0")
            .await;
        assert!(matches!(result, Err(Error::LogFailed(_))));
    }

    #[tokio::test]
    async fn test_clone_missing_remote_is_clone_failure() {
        if !git_available() {
            return;
        }

        let root = TempDir::new().unwrap();
        let missing = root.path().join("does-not-exist");

        let result = SystemGit::new()
            .clone_repo(missing.to_str().unwrap(), root.path(), &["--bare".to_string()])
            .await;
        assert!(matches!(result, Err(Error::CloneFailed(_))));
    }

    #[tokio::test]
    async fn test_missing_executable() {
        let root = TempDir::new().unwrap();
        let result = SystemGit::new()
            .with_path("/nonexistent/git")
            .list_tags(root.path())
            .await;

        match result {
            Err(Error::TagListFailed(msg)) => assert!(msg.contains("not found")),
            other => panic!("expected TagListFailed, got {:?}", other),
        }
    }
}
