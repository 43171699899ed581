//! photolib CLI
//!
//! Command-line interface for photolib - an S3-backed photo library.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use photolib_core::{Config, Library, S3Gateway};

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "photolib")]
#[command(about = "photolib - S3-backed photo library")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List library entries, newest first
    #[command(alias = "ls")]
    List,
    /// Upload JPG/PNG files as one batch
    Upload {
        /// Files to upload
        files: Vec<PathBuf>,
    },
    /// Delete an entry by key or bare file name
    #[command(alias = "rm")]
    Delete {
        /// Object key (prefix added if absent)
        key: String,
    },
    /// Fetch an entry's bytes
    Fetch {
        /// Object key (prefix added if absent)
        key: String,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the public URL for an entry
    Url {
        /// Object key (prefix added if absent)
        key: String,
    },
    /// Pick a random entry
    Random,
    /// Show bucket and catalog status
    Status,
    /// Show or inspect configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the config file path
    Path,
    /// Set a configuration value (bucket, region, prefix, endpoint_url)
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("photolib_core=warn,photolib_cli=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let config = Config::load().context("Failed to load configuration")?;

    // Commands that don't need the gateway
    if let Commands::Config { command } = &cli.command {
        return match command.clone().unwrap_or(ConfigCommands::Show) {
            ConfigCommands::Show => commands::config_show(&config, &output),
            ConfigCommands::Path => commands::config_path(&output),
            ConfigCommands::Set { key, value } => commands::config_set(key, value, &output),
        };
    }

    config.validate()?;
    let gateway = S3Gateway::connect(&config).await;
    let library = Library::new(config, gateway);

    match cli.command {
        Commands::List => commands::list(&library, &output).await,
        Commands::Upload { files } => commands::upload(&library, files, &output).await,
        Commands::Delete { key } => commands::delete(&library, key, &output).await,
        Commands::Fetch { key, output: out } => {
            commands::fetch(&library, key, out, &output).await
        }
        Commands::Url { key } => commands::url(&library, key, &output).await,
        Commands::Random => commands::random(&library, &output).await,
        Commands::Status => commands::status(&library, &output).await,
        Commands::Config { .. } => unreachable!("handled above"),
    }
}
