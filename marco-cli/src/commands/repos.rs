//! Repo list management commands

use clap::Args;
use marco_core::RepoEntry;

use super::Context;

/// Print every tracked repo with its base branch
pub async fn list(ctx: &Context) -> anyhow::Result<()> {
    for entry in ctx.registry.list().await? {
        println!("{} [{}]", entry, entry.base);
    }

    Ok(())
}

/// Add a repository
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Repository as <user>/<repo>
    repo: String,

    /// Base branch (defaults to the configured default base)
    base: Option<String>,
}

impl AddArgs {
    /// Execute the add command
    pub async fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        let base = self
            .base
            .clone()
            .unwrap_or_else(|| ctx.settings.repos.default_base.clone());
        let entry = RepoEntry::parse(&self.repo, base)?;

        if ctx.registry.add(entry.clone()).await? {
            println!("Added repo '{}'", entry);
        } else {
            eprintln!("Warning: repo '{}' already exists", entry);
        }

        Ok(())
    }
}

/// Update a repository's base branch
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Repository as <user>/<repo>
    repo: String,

    /// New base branch
    base: String,
}

impl UpdateArgs {
    /// Execute the update command
    pub async fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        let entry = RepoEntry::parse(&self.repo, self.base.clone())?;

        if ctx.registry.update(&entry).await? {
            println!("Updated repo '{}' with base branch '{}'", entry, entry.base);
        } else {
            eprintln!("Warning: repo '{}' does not exist", entry);
        }

        Ok(())
    }
}

/// Remove a repository
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Repository as <user>/<repo>
    repo: String,
}

impl RemoveArgs {
    /// Execute the remove command
    pub async fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        // Base is irrelevant for identity matching
        let entry = RepoEntry::parse(&self.repo, ctx.settings.repos.default_base.clone())?;

        if ctx.registry.remove(&entry).await? {
            println!("Removed repo '{}'", entry);
        } else {
            eprintln!("Warning: repo '{}' does not exist", entry);
        }

        Ok(())
    }
}
