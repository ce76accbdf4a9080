//! Command-line interface for ImmiDoc.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use immidoc::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "immidoc")]
#[command(about = "Immigration document OCR, classification, and field extraction")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Process a document image and print the JSON result
    Process {
        /// Path to the image file (PNG or JPEG)
        image: PathBuf,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
        /// Caller identifier (pass-through, logged only)
        #[arg(long)]
        username: Option<String>,
    },

    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Show OCR engine availability and effective configuration
    Status,
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config.clone(),
    };
    let settings = load_settings_with_options(&options)
        .await
        .map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::Process {
            image,
            pretty,
            username,
        } => commands::cmd_process(&settings, &image, pretty, username.as_deref()),
        Commands::Serve { host, port } => commands::cmd_serve(&settings, host, port).await,
        Commands::Status => commands::cmd_status(&settings),
    }
}
