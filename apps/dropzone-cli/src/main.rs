//! Dropzone command-line client.
//!
//! Lists and manages storage folders on the portal backend and uploads
//! files straight to the storage provider with backend-issued signatures.

mod access;
mod adapter;
mod commands;
mod config;
mod folders;
mod format;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dropzone", version, about = "Dropzone upload portal client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List storage folders
    Folders,
    /// Create a folder (admin only)
    Create {
        /// Letters, digits, `_` and `-`; at most 100 characters
        name: String,
    },
    /// Delete a folder and every file in it (admin only)
    Delete {
        name: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Upload files or directories into a folder
    Upload {
        folder: String,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Show the configured user and role
    Whoami,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = config::Config::load()?;
    tracing::debug!(api = %config.api_url, storage = %config.storage_url, "configuration loaded");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(cli.command, config))
}

async fn run(command: Commands, config: config::Config) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Folders => commands::list_folders(&config).await?,
        Commands::Create { name } => commands::create_folder(&config, &name).await?,
        Commands::Delete { name, yes } => commands::delete_folder(&config, &name, yes).await?,
        Commands::Whoami => commands::whoami(&config),
        Commands::Upload { folder, paths } => {
            let summary = commands::upload(&config, &folder, &paths).await?;
            if summary.has_failures() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
