//! CLI for the filedrop upload service.

mod commands;
#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::{Parser, Subcommand};
use filedrop_core::config;
use std::path::PathBuf;

use commands::{run_config, run_serve};

/// Top-level CLI for the filedrop upload service.
#[derive(Debug, Parser)]
#[command(name = "filedrop")]
#[command(about = "filedrop: HTTP upload service writing POST bodies to disk", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the upload server.
    Serve {
        /// Listen port (overrides the config file).
        #[arg(long)]
        port: Option<u16>,

        /// Storage root uploads are written under (overrides the config file).
        #[arg(long, value_name = "PATH")]
        storage_root: Option<PathBuf>,
    },

    /// Show the effective configuration and where it was loaded from.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Load global config early; subcommand flags override single fields.
        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Serve { port, storage_root } => {
                if let Some(port) = port {
                    cfg.port = port;
                }
                if let Some(root) = storage_root {
                    cfg.storage_root = root;
                }
                run_serve(cfg).await
            }
            CliCommand::Config => run_config(&cfg),
        }
    }
}
