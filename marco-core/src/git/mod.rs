//! Git operations for marco
//!
//! This module wraps the git client behind [`GitClient`] so release checks
//! can run against the system `git` binary or a test double.

mod clone;
mod system;
mod tags;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::Result;

pub use clone::clone_dir_name;
pub use system::SystemGit;
pub use tags::{parse_tag_list, TagSet};

/// Capabilities marco needs from a git client
///
/// The three operations are independent; ordering between them is the
/// caller's concern.
#[async_trait]
pub trait GitClient: Send + Sync {
    /// Clone `remote_url` into `target_dir`, passing `options` through to the
    /// client, and return the path of the new clone
    async fn clone_repo(
        &self,
        remote_url: &str,
        target_dir: &Path,
        options: &[String],
    ) -> Result<PathBuf>;

    /// List the tags of the repository at `repo_path`
    async fn list_tags(&self, repo_path: &Path) -> Result<TagSet>;

    /// Count merge commits in `range` (e.g. `master...1.2.0`)
    async fn count_merge_commits(&self, repo_path: &Path, range: &str) -> Result<u64>;
}
