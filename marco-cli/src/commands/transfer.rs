//! Import and export of the repo list as JSON

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use marco_core::{export_repo_list, parse_repo_list};

use super::Context;

/// Replace the repository list with a JSON array
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON array of {"user", "repo", "base"} objects
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    json: Option<String>,

    /// Read the JSON array from a file instead
    #[arg(short, long)]
    file: Option<PathBuf>,
}

impl ImportArgs {
    /// Execute the import command
    pub async fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        let json = match (&self.json, &self.file) {
            (Some(json), _) => json.clone(),
            (None, Some(path)) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?,
            (None, None) => anyhow::bail!("Nothing to import"),
        };

        // Bad payloads are reported, not raised, so scripts see a clean message
        let repos = match parse_repo_list(&json) {
            Ok(repos) => repos,
            Err(e) => {
                eprintln!("Error: {}", e);
                return Ok(());
            }
        };

        ctx.registry.set_all(repos).await?;
        println!("Import successful");

        Ok(())
    }
}

/// Print the repository list as JSON
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Indent the output
    #[arg(short, long)]
    pretty: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        let repos = ctx.registry.list().await?;
        println!("{}", export_repo_list(&repos, self.pretty)?);

        Ok(())
    }
}
