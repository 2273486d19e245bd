//! Tracked repository entries

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Base branch used when none is given
pub const DEFAULT_BASE: &str = "master";

/// A tracked GitHub repository and the branch its releases are cut from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEntry {
    /// Repository owner or organization
    pub user: String,
    /// Repository name
    pub repo: String,
    /// Branch compared against the latest release tag
    pub base: String,
}

impl RepoEntry {
    pub fn new(user: impl Into<String>, repo: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            repo: repo.into(),
            base: base.into(),
        }
    }

    /// Parse a `user/repo` argument
    ///
    /// Everything after the first `/` is the repo name, so `a/b/c` yields
    /// user `a` and repo `b/c`.
    pub fn parse(arg: &str, base: impl Into<String>) -> Result<Self> {
        let (user, repo) = arg
            .split_once('/')
            .ok_or_else(|| Error::InvalidRepo(arg.to_string()))?;

        if user.is_empty() || repo.is_empty() {
            return Err(Error::InvalidRepo(arg.to_string()));
        }

        Ok(Self::new(user, repo, base))
    }

    /// The `user/repo` form of this entry
    pub fn slug(&self) -> String {
        format!("{}/{}", self.user, self.repo)
    }

    /// Whether both entries share the `(user, repo)` identity
    pub fn same_identity(&self, other: &RepoEntry) -> bool {
        self.user == other.user && self.repo == other.repo
    }

    /// Canonical registry ordering: ordinal comparison of `user/repo`
    pub fn canonical_cmp(&self, other: &RepoEntry) -> Ordering {
        self.slug().cmp(&other.slug())
    }
}

/// Parse an imported repo list
///
/// The payload must be a JSON array whose items all carry `user`, `repo`
/// and `base`. Entries are returned as given, without dedup or sorting.
pub fn parse_repo_list(json: &str) -> Result<Vec<RepoEntry>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(Error::Import("Parsed JSON is not an array".to_string()));
    }

    serde_json::from_value(value).map_err(|e| Error::Import(format!("Invalid repo entry: {}", e)))
}

/// Serialize a repo list for export, optionally indented by four spaces
pub fn export_repo_list(repos: &[RepoEntry], pretty: bool) -> Result<String> {
    if !pretty {
        return Ok(serde_json::to_string(repos)?);
    }

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    repos.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

impl fmt::Display for RepoEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user, self.repo)
    }
}
