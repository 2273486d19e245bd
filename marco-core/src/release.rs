//! Release readiness detection
//!
//! A clone is "ready for release" when merge commits exist between its base
//! branch and its most recent release tag. Only bare `MAJOR.MINOR.PATCH`
//! tags count as releases: `v1.2.3`, `1.2.3-rc` and `v0.1` are all ignored.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::git::GitClient;
use crate::repo::RepoEntry;
use crate::Result;

fn release_tag_regex() -> &'static Regex {
    static RELEASE_TAG: OnceLock<Regex> = OnceLock::new();
    RELEASE_TAG.get_or_init(|| {
        Regex::new(r"^\d+\.\d+\.\d+$").expect("release tag pattern is valid")
    })
}

/// Whether `tag` is a bare `MAJOR.MINOR.PATCH` release tag
pub fn is_release_tag(tag: &str) -> bool {
    release_tag_regex().is_match(tag)
}

/// Answers release readiness questions for cloned repositories
#[derive(Clone)]
pub struct ReleaseChecker {
    git: Arc<dyn GitClient>,
}

impl std::fmt::Debug for ReleaseChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseChecker").finish_non_exhaustive()
    }
}

impl ReleaseChecker {
    pub fn new(git: Arc<dyn GitClient>) -> Self {
        Self { git }
    }

    /// Find the most recent release tag of the clone at `repo_path`
    ///
    /// The client's own latest tag wins when it qualifies. Otherwise the tag
    /// list is scanned from the end and the first qualifying tag is returned.
    /// `None` means no release has been tagged yet.
    pub async fn resolve_latest_semver_tag(&self, repo_path: &Path) -> Result<Option<String>> {
        let tags = self.git.list_tags(repo_path).await?;

        if let Some(latest) = tags.latest.filter(|t| is_release_tag(t)) {
            return Ok(Some(latest));
        }

        Ok(tags.all.into_iter().rev().find(|t| is_release_tag(t)))
    }

    /// Whether `entry.base` carries merges not yet covered by a release tag
    pub async fn has_unreleased_changes(&self, repo_path: &Path, entry: &RepoEntry) -> Result<bool> {
        let Some(tag) = self.resolve_latest_semver_tag(repo_path).await? else {
            tracing::debug!(repo = %entry, "No release tag found");
            return Ok(false);
        };

        let range = format!("{}...{}", entry.base, tag);
        let merges = self.git.count_merge_commits(repo_path, &range).await?;
        tracing::debug!(repo = %entry, %range, merges, "Counted merge commits");

        Ok(merges > 0)
    }
}
