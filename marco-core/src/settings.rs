//! Settings for marco
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (MARCO_*)
//! 3. Settings file (~/.config/marco/settings.toml)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::repo::DEFAULT_BASE;
use crate::{Error, Result};

/// Git-related settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitSettings {
    /// Path to the git executable
    pub path: String,

    /// Flags passed to `git clone` during release checks
    pub clone_flags: Vec<String>,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            path: "git".to_string(),
            clone_flags: vec!["--bare".to_string()],
        }
    }
}

/// Defaults applied to new repo entries
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RepoDefaults {
    /// Base branch used by `add` when none is given
    pub default_base: String,
}

impl Default for RepoDefaults {
    fn default() -> Self {
        Self {
            default_base: DEFAULT_BASE.to_string(),
        }
    }
}

/// Root settings structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding `config.json` and scratch clones (defaults to `~/.marco`)
    pub data_dir: Option<PathBuf>,

    /// Git settings
    pub git: GitSettings,

    /// Repo defaults
    pub repos: RepoDefaults,
}

impl Settings {
    /// Load settings from the default settings file location
    ///
    /// Returns default settings if the file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_settings_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Get the default settings file path
    ///
    /// Returns `~/.config/marco/settings.toml` on Linux
    pub fn default_settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("marco").join("settings.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - MARCO_HOME: data directory
    /// - MARCO_GIT_PATH: path to git executable
    pub fn with_env_overrides(self) -> Self {
        let home = std::env::var_os("MARCO_HOME").map(PathBuf::from);
        let git_path = std::env::var("MARCO_GIT_PATH").ok();
        self.with_cli_overrides(home, git_path)
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, data_dir: Option<PathBuf>, git_path: Option<String>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = Some(dir);
        }

        if let Some(path) = git_path {
            self.git.path = path;
        }

        self
    }

    /// Load settings with all overrides applied
    ///
    /// Priority: CLI > env > settings file > defaults
    pub fn load_with_overrides(data_dir: Option<PathBuf>, git_path: Option<String>) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(data_dir, git_path))
    }

    /// Resolved data directory
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::home_dir()
                .map(|home| home.join(".marco"))
                .ok_or_else(|| Error::Config("Could not determine home directory".to_string())),
        }
    }
}
