//! CLI command implementations

pub mod init;
pub mod polo;
pub mod repos;
pub mod transfer;

use std::path::PathBuf;
use std::sync::Arc;

use marco_core::{JsonConfigStore, RepoRegistry, Settings};

pub use init::InitArgs;
pub use polo::PoloArgs;
pub use repos::{list, AddArgs, RemoveArgs, UpdateArgs};
pub use transfer::{ExportArgs, ImportArgs};

/// Shared state handed to every command
pub struct Context {
    pub settings: Settings,
    pub data_dir: PathBuf,
    pub store: Arc<JsonConfigStore>,
    pub registry: RepoRegistry,
}

impl Context {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let data_dir = settings.data_dir()?;
        let store = Arc::new(JsonConfigStore::new(&data_dir));
        let registry = RepoRegistry::new(store.clone());

        Ok(Self {
            settings,
            data_dir,
            store,
            registry,
        })
    }
}
