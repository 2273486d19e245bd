//! Clone destination naming

/// Directory name git gives a clone of `remote_url`
///
/// Mirrors git's own rule: the last path segment of the URL with any `.git`
/// suffix removed, re-added for bare and mirror clones.
pub fn clone_dir_name(remote_url: &str, options: &[String]) -> String {
    let trimmed = remote_url.trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    let stem = last.strip_suffix(".git").unwrap_or(last);
    let stem = if stem.is_empty() { "repo" } else { stem };

    let bare = options.iter().any(|opt| opt == "--bare" || opt == "--mirror");
    if bare {
        format!("{}.git", stem)
    } else {
        stem.to_string()
    }
}
