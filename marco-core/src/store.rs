//! Persisted repo list document
//!
//! The document lives at `<data_dir>/config.json`. It is read at most once
//! per store; writes go through the same in-memory copy before hitting disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::repo::RepoEntry;
use crate::{Error, Result};

/// File name of the persisted document inside the data directory
pub const CONFIG_FILE: &str = "config.json";

/// Persisted document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracked repositories
    pub repos: Vec<RepoEntry>,
}

/// Partial document for [`ConfigStore::set`]; `None` fields are left alone
#[derive(Debug, Clone, Default)]
pub struct ConfigPatch {
    pub repos: Option<Vec<RepoEntry>>,
}

impl ConfigPatch {
    pub fn repos(repos: Vec<RepoEntry>) -> Self {
        Self { repos: Some(repos) }
    }
}

impl Config {
    /// Shallow merge of the top-level fields present in `patch`
    pub fn merge(&mut self, patch: ConfigPatch) {
        if let Some(repos) = patch.repos {
            self.repos = repos;
        }
    }
}

/// Key-value access to the persisted document
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Current document, or an empty one if nothing has been saved yet
    async fn get(&self) -> Result<Config>;

    /// Merge `patch` into the current document and persist it
    async fn set(&self, patch: ConfigPatch) -> Result<()>;
}

/// [`ConfigStore`] backed by a JSON file
#[derive(Debug)]
pub struct JsonConfigStore {
    path: PathBuf,
    cached: Mutex<Option<Config>>,
}

impl JsonConfigStore {
    /// Store using `<data_dir>/config.json`
    pub fn new(data_dir: &Path) -> Self {
        Self::at(data_dir.join(CONFIG_FILE))
    }

    /// Store using an explicit file path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the document has ever been written
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn load(&self) -> Result<Config> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No config file yet, using defaults");
                Ok(Config::default())
            }
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Write via a sibling temp file and rename so readers never see a torn file
    async fn write(&self, config: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string(config)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await
    }
}

#[async_trait]
impl ConfigStore for JsonConfigStore {
    async fn get(&self) -> Result<Config> {
        let mut cached = self.cached.lock().await;
        if let Some(config) = cached.as_ref() {
            return Ok(config.clone());
        }

        let config = self.load().await?;
        *cached = Some(config.clone());
        Ok(config)
    }

    async fn set(&self, patch: ConfigPatch) -> Result<()> {
        let mut cached = self.cached.lock().await;
        let current = match cached.as_ref() {
            Some(config) => config.clone(),
            None => self.load().await?,
        };
        let mut config = current.clone();
        config.merge(patch);

        // The cache only ever holds what is on disk
        match self.write(&config).await {
            Ok(()) => {
                *cached = Some(config);
                Ok(())
            }
            Err(e) => {
                *cached = Some(current);
                Err(Error::RegistryPersistFailed(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        }
    }
}
