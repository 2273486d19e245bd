//! Tag listing results

/// Tags reported by the git client for one clone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    /// The client's own notion of the latest tag
    pub latest: Option<String>,
    /// Every tag, in the order the client reported them
    pub all: Vec<String>,
}

impl TagSet {
    pub fn new(latest: Option<&str>, all: &[&str]) -> Self {
        Self {
            latest: latest.map(str::to_string),
            all: all.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Build a [`TagSet`] from `git tag --list --sort=v:refname` output
///
/// `latest` is the last listed tag that looks like a version, i.e. contains
/// a `.`; plain names such as `stable` never become the latest tag.
pub fn parse_tag_list(stdout: &str) -> TagSet {
    let all: Vec<String> = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    let latest = all.iter().rev().find(|tag| tag.contains('.')).cloned();

    TagSet { latest, all }
}
