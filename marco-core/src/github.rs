//! GitHub remote addressing

use crate::repo::RepoEntry;

/// SSH remote URL for a tracked repository
///
/// No validation is done; an entry with empty fields still yields a
/// well-formed string.
pub fn build_remote_url(entry: &RepoEntry) -> String {
    format!("git@github.com:{}/{}.git", entry.user, entry.repo)
}
