//! Marco Core - Core library for marco
//!
//! Tracks a list of GitHub repositories and reports which of them have
//! merged work on their base branch that no release tag covers yet.

pub mod check;
pub mod error;
pub mod git;
pub mod github;
pub mod registry;
pub mod release;
pub mod repo;
pub mod settings;
pub mod store;

pub use check::{BatchOutcome, BatchRunner, Progress, ScratchDir, SCRATCH_PREFIX};
pub use error::{Error, Result};
pub use git::{GitClient, SystemGit, TagSet};
pub use github::build_remote_url;
pub use registry::RepoRegistry;
pub use release::{is_release_tag, ReleaseChecker};
pub use repo::{export_repo_list, parse_repo_list, RepoEntry, DEFAULT_BASE};
pub use settings::Settings;
pub use store::{Config, ConfigPatch, ConfigStore, JsonConfigStore};
