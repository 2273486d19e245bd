//! Marco CLI - Command line interface for marco
//!
//! Tracks GitHub repositories and reports which ones have merged work
//! waiting for a release.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use marco_core::Settings;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    AddArgs, Context, ExportArgs, ImportArgs, InitArgs, PoloArgs, RemoveArgs, UpdateArgs,
};

/// marco: find tracked repositories with unreleased merges
#[derive(Parser, Debug)]
#[command(name = "marco")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Data directory holding config.json (overrides settings and env)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Path to git executable (overrides settings and env)
    #[arg(long, global = true)]
    git_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Initialize user settings
    Init(InitArgs),

    /// List all repositories
    #[command(visible_alias = "ls")]
    List,

    /// Add a repository
    Add(AddArgs),

    /// Update a repository's base branch
    Update(UpdateArgs),

    /// Remove a repository
    #[command(visible_alias = "rm")]
    Remove(RemoveArgs),

    /// Replace the repository list with a JSON array
    Import(ImportArgs),

    /// Print the repository list as JSON
    Export(ExportArgs),

    /// Fetch release information for every repository
    #[command(visible_alias = "check")]
    Polo(PoloArgs),

    /// Show current settings
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays pipeable
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let settings = Settings::load_with_overrides(cli.home.clone(), cli.git_path.clone())?;
    tracing::info!(
        data_dir = ?settings.data_dir,
        git_path = %settings.git.path,
        "Settings loaded"
    );

    let Some(command) = cli.command else {
        println!("marco - track repositories with unreleased merges");
        println!();
        println!("Use --help for usage information");
        return Ok(());
    };

    let ctx = Context::new(settings)?;

    match command {
        Commands::Version => println!("marco {}", env!("CARGO_PKG_VERSION")),
        Commands::Init(args) => args.execute(&ctx).await?,
        Commands::List => commands::list(&ctx).await?,
        Commands::Add(args) => args.execute(&ctx).await?,
        Commands::Update(args) => args.execute(&ctx).await?,
        Commands::Remove(args) => args.execute(&ctx).await?,
        Commands::Import(args) => args.execute(&ctx).await?,
        Commands::Export(args) => args.execute(&ctx).await?,
        Commands::Polo(args) => args.execute(&ctx).await?,
        Commands::Config => print_config(&ctx),
    }

    Ok(())
}

fn print_config(ctx: &Context) {
    let settings = &ctx.settings;

    println!("Marco Configuration");
    println!("===================");
    println!();
    println!("Git Settings:");
    println!("  path: {}", settings.git.path);
    println!("  clone_flags: {}", settings.git.clone_flags.join(" "));
    println!();
    println!("Repo Defaults:");
    println!("  default_base: {}", settings.repos.default_base);
    println!();
    println!("Data directory: {}", ctx.data_dir.display());
    println!("Repo list: {}", ctx.store.path().display());
    if ctx.store.exists() {
        println!("  (exists)");
    } else {
        println!("  (not found - run 'marco init')");
    }
    if let Some(path) = Settings::default_settings_path() {
        println!("Settings file: {}", path.display());
        if path.exists() {
            println!("  (exists)");
        } else {
            println!("  (not found - using defaults)");
        }
    }
}
