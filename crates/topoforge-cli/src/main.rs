//! topoforge CLI
//!
//! Validate topology documents, generate simulator scripts, browse the
//! catalog, and serve the tool session over stdio.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use topoforge_core::CatalogKind;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod session;

/// topoforge - compile network topologies into simulator scripts
#[derive(Parser)]
#[command(name = "topoforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "topoforge.yaml")]
    config: PathBuf,

    /// Catalog file (overrides the configured one)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a topology document
    Validate {
        /// Topology file (YAML or JSON)
        topology: PathBuf,
    },

    /// Generate the simulator script for a topology document
    Generate {
        /// Topology file (YAML or JSON)
        topology: PathBuf,

        /// Generate even if validation reports problems
        #[arg(long)]
        no_validate: bool,

        /// Write the script to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List catalog entries
    Catalog {
        /// devices, modules, or links
        kind: CatalogKind,

        /// Maximum number of entries (1-500)
        #[arg(short, long, default_value_t = 50, allow_negative_numbers = true)]
        limit: i64,

        /// Case-insensitive key prefix
        #[arg(short, long, default_value = "")]
        starts_with: String,
    },

    /// Show entity counts and device names
    Summary {
        /// Topology file (YAML or JSON)
        topology: PathBuf,
    },

    /// Serve tool calls as JSON lines on stdin/stdout
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for scripts and tool responses
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = commands::Context::load(&cli.config, cli.catalog.as_deref())?;

    match cli.command {
        Commands::Validate { topology } => {
            commands::validate::run(&ctx, &topology).await?;
        }
        Commands::Generate {
            topology,
            no_validate,
            output,
        } => {
            commands::generate::run(&ctx, &topology, no_validate, output.as_deref()).await?;
        }
        Commands::Catalog {
            kind,
            limit,
            starts_with,
        } => {
            commands::catalog::run(&ctx, kind, limit, &starts_with).await?;
        }
        Commands::Summary { topology } => {
            commands::summary::run(&topology).await?;
        }
        Commands::Serve => {
            commands::serve::run(ctx).await?;
        }
    }

    Ok(())
}
