//! Grounded CLI
//!
//! Main entry point for the grounded command-line tool.
//! Provides retrieval-augmented chat over platform document collections.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand, FilesetsCommand};
use grounded_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Grounded CLI - answers grounded in your document collections
#[derive(Parser, Debug)]
#[command(name = "grounded")]
#[command(about = "Retrieval-augmented chat over platform filesets", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "GROUNDED_CONFIG")]
    config: Option<PathBuf>,

    /// Platform instance base URL (e.g. https://acme.domo.com)
    #[arg(short, long, global = true, env = "DOMO_INSTANCE")]
    instance: Option<String>,

    /// Fileset id to query (default: the built-in default collection)
    #[arg(short, long, global = true, env = "GROUNDED_FILESET")]
    fileset: Option<String>,

    /// Number of matches requested per retrieval call
    #[arg(long, global = true, env = "GROUNDED_TOP_K")]
    top_k: Option<usize>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a single question against a fileset
    Ask(AskCommand),

    /// Interactive chat session
    Chat(ChatCommand),

    /// List selectable filesets
    Filesets(FilesetsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.config,
        cli.instance,
        cli.fileset,
        cli.top_k,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    // Log startup
    tracing::info!("Grounded CLI starting");
    tracing::debug!("Instance: {}", config.instance);
    tracing::debug!("Top-k: {}", config.top_k);

    // Emit command.start span
    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Chat(_) => "chat",
        Commands::Filesets(_) => "filesets",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Filesets(cmd) => cmd.execute(&config).await,
    };

    // Log completion
    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
