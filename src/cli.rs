//! CLI definitions for scenelens.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// scenelens CLI.
#[derive(Parser)]
#[command(name = "scenelens")]
#[command(about = "Find, click and hover GUI elements by semantic id")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/scenelens.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Serve the line protocol over TCP (default)
    Serve {
        /// Listen host (overrides config)
        #[arg(long, env = "SCENELENS_HOST")]
        host: Option<String>,

        /// Listen port (overrides config)
        #[arg(long, env = "SCENELENS_PORT")]
        port: Option<u16>,

        /// Scene file to preload into the viewport
        #[arg(long)]
        scene: Option<PathBuf>,

        /// Log pointer events instead of delivering them
        #[arg(long)]
        dry_run: bool,
    },

    /// Run find_clickable once against a scene file and print the response
    Query {
        /// Scene file to load
        #[arg(long)]
        scene: Option<PathBuf>,

        /// Element id filter
        #[arg(long)]
        filter: Option<String>,
    },

    /// Validate the configuration file
    CheckConfig,
}
