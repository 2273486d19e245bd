//! Init command - create the data directory and an empty repo list

use clap::Args;

use super::Context;

/// Initialize user settings
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force reinitialization, clearing the repo list
    #[arg(short, long)]
    force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        let first_run = !ctx.store.exists();
        if !self.force && !first_run {
            println!("Settings already initialized");
            return Ok(());
        }

        if first_run {
            print!("First run detected. Initializing settings...");
        } else {
            print!("Reinitializing settings...");
        }

        ctx.registry.set_all(Vec::new()).await?;
        println!("Done");

        Ok(())
    }
}
