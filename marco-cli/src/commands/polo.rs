//! Polo command - report repos with merges waiting for a release

use std::io::{IsTerminal, Write};
use std::sync::Arc;

use clap::Args;
use marco_core::{BatchRunner, SystemGit};

use super::Context;

/// Fetch release information for every tracked repo
#[derive(Args, Debug)]
pub struct PoloArgs {
    /// Extra flags for `git clone` (replaces the configured clone flags)
    #[arg(long = "clone-flag", value_name = "FLAG", allow_hyphen_values = true)]
    clone_flags: Vec<String>,
}

impl PoloArgs {
    /// Execute the polo command
    pub async fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        let entries = ctx.registry.list().await?;

        let clone_flags = if self.clone_flags.is_empty() {
            ctx.settings.git.clone_flags.clone()
        } else {
            self.clone_flags.clone()
        };

        let git = Arc::new(SystemGit::new().with_path(&ctx.settings.git.path));
        let runner = BatchRunner::new(git, &ctx.data_dir).with_clone_options(clone_flags);

        let outcome = runner
            .run(&entries, |p| {
                status_line(&format!(
                    "Cloning repo {}/{}: '{}'",
                    p.index, p.total, p.entry
                ))
            })
            .await?;
        status_line("");

        if let Some(err) = &outcome.error {
            eprintln!("Error: {}", err);
        }

        for entry in &outcome.released {
            println!("{}", entry);
        }

        Ok(())
    }
}

/// Overwrite the current stderr line when attached to a terminal
fn status_line(message: &str) {
    let mut stderr = std::io::stderr();
    if !stderr.is_terminal() {
        if !message.is_empty() {
            let _ = writeln!(stderr, "{}", message);
        }
        return;
    }

    let _ = write!(stderr, "\r\x1b[2K{}", message);
    let _ = stderr.flush();
}
