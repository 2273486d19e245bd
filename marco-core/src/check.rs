//! Batch release check over every tracked repo
//!
//! Repos are processed one at a time: clone into a scratch directory, ask
//! the [`ReleaseChecker`], move on. The first failure aborts the batch and
//! throws away every match collected so far. Scratch directories are swept
//! once the batch ends, whether it completed or not.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use crate::git::GitClient;
use crate::github::build_remote_url;
use crate::release::ReleaseChecker;
use crate::repo::RepoEntry;
use crate::{Error, Result};

/// Name prefix of scratch directories created by marco
pub const SCRATCH_PREFIX: &str = "temp";

/// Whether a directory entry name belongs to a marco scratch directory
pub fn is_scratch_name(name: &str) -> bool {
    name.len() > SCRATCH_PREFIX.len() && name.starts_with(SCRATCH_PREFIX)
}

/// Remove every scratch entry directly under `parent`
///
/// Best effort: failures are logged and skipped. Returns how many entries
/// were removed.
pub async fn sweep_scratch_dirs(parent: &Path) -> usize {
    let mut entries = match tokio::fs::read_dir(parent).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %parent.display(), "Failed to read scratch parent: {}", e);
            return 0;
        }
    };

    let mut removed = 0;
    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name();
        if !is_scratch_name(&name.to_string_lossy()) {
            continue;
        }

        let path = entry.path();
        let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
        let result = if is_dir {
            tokio::fs::remove_dir_all(&path).await
        } else {
            tokio::fs::remove_file(&path).await
        };

        match result {
            Ok(()) => removed += 1,
            Err(e) => tracing::warn!(path = %path.display(), "Failed to remove scratch entry: {}", e),
        }
    }

    removed
}

/// A scratch directory for one batch of clones
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
    parent: PathBuf,
}

impl ScratchDir {
    /// Create a uniquely named scratch directory under `parent`
    pub async fn create(parent: &Path) -> Result<Self> {
        tokio::fs::create_dir_all(parent).await?;

        let parent = parent.to_path_buf();
        let in_parent = parent.clone();
        let dir = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix(SCRATCH_PREFIX)
                .tempdir_in(in_parent)
        })
        .await
        .map_err(std::io::Error::other)??;

        Ok(Self { dir, parent })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove this directory along with scratch leftovers from earlier runs
    pub async fn sweep(self) -> usize {
        let removed = sweep_scratch_dirs(&self.parent).await;
        // Anything the sweep missed is retried by TempDir's own cleanup
        drop(self.dir);
        removed
    }
}

/// Progress notification emitted before each repo is cloned
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// 1-based position in the batch
    pub index: usize,
    pub total: usize,
    pub entry: &'a RepoEntry,
}

/// Result of a batch run
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Repos with unreleased merges, in processing order; empty if aborted
    pub released: Vec<RepoEntry>,
    /// The failure that aborted the batch, if any
    pub error: Option<Error>,
}

impl BatchOutcome {
    pub fn aborted(&self) -> bool {
        self.error.is_some()
    }
}

/// Runs the release check across a list of repos
#[derive(Clone)]
pub struct BatchRunner {
    git: Arc<dyn GitClient>,
    checker: ReleaseChecker,
    clone_options: Vec<String>,
    scratch_parent: PathBuf,
}

impl std::fmt::Debug for BatchRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchRunner")
            .field("clone_options", &self.clone_options)
            .field("scratch_parent", &self.scratch_parent)
            .finish_non_exhaustive()
    }
}

impl BatchRunner {
    /// Runner cloning with `--bare` into scratch directories under `scratch_parent`
    pub fn new(git: Arc<dyn GitClient>, scratch_parent: impl Into<PathBuf>) -> Self {
        Self {
            checker: ReleaseChecker::new(git.clone()),
            git,
            clone_options: vec!["--bare".to_string()],
            scratch_parent: scratch_parent.into(),
        }
    }

    /// Replace the flags passed to `git clone`
    pub fn with_clone_options(mut self, options: Vec<String>) -> Self {
        self.clone_options = options;
        self
    }

    /// Check every entry in order
    ///
    /// Only failing to create the scratch directory is returned as `Err`;
    /// per-repo failures end up in [`BatchOutcome::error`].
    pub async fn run<F>(&self, entries: &[RepoEntry], mut on_progress: F) -> Result<BatchOutcome>
    where
        F: FnMut(Progress<'_>),
    {
        let scratch = ScratchDir::create(&self.scratch_parent).await?;
        tracing::info!(count = entries.len(), scratch = %scratch.path().display(), "Starting release check");

        let mut outcome = BatchOutcome::default();
        for (i, entry) in entries.iter().enumerate() {
            on_progress(Progress {
                index: i + 1,
                total: entries.len(),
                entry,
            });

            match self.check_entry(scratch.path(), entry).await {
                Ok(true) => {
                    tracing::info!(repo = %entry, "Unreleased changes found");
                    outcome.released.push(entry.clone());
                }
                Ok(false) => tracing::info!(repo = %entry, "Up to date"),
                Err(e) => {
                    tracing::warn!(repo = %entry, error = %e, "Release check aborted");
                    outcome.released.clear();
                    outcome.error = Some(e);
                    break;
                }
            }
        }

        let removed = scratch.sweep().await;
        tracing::debug!(removed, "Scratch directories cleaned up");

        Ok(outcome)
    }

    async fn check_entry(&self, scratch: &Path, entry: &RepoEntry) -> Result<bool> {
        // Repo names repeat across owners; the owner keeps clone paths apart
        let target_dir = scratch.join(&entry.user);
        tokio::fs::create_dir_all(&target_dir).await?;

        let remote_url = build_remote_url(entry);
        let clone = self
            .git
            .clone_repo(&remote_url, &target_dir, &self.clone_options)
            .await?;

        self.checker.has_unreleased_changes(&clone, entry).await
    }
}
