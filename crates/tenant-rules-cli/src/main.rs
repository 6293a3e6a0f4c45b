//! tenant-rules CLI tool.
//!
//! Usage:
//! ```bash
//! tenant-rules generate [OPTIONS] [SCHEMA]
//! tenant-rules list [--format json] [SCHEMA]
//! tenant-rules init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

/// Firestore security rule generator for multi-tenant GraphQL schemas
#[derive(Parser)]
#[command(name = "tenant-rules")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Project directory (config lookup and relative paths)
    #[arg(short = 'C', long = "dir", global = true, default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the rules document
    Generate {
        /// Schema file (default: `[schema] path` from config)
        schema: Option<PathBuf>,

        /// Output file (default: `[output] file` from config, else stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print to stdout even if an output file is configured
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// List collections declared in the schema
    List {
        /// Schema file (default: `[schema] path` from config)
        schema: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for collection listings.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Text,
    /// JSON output.
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // stdout carries the rules document
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            schema,
            output,
            stdout,
        } => commands::generate::run(
            &cli.dir,
            cli.config.as_deref(),
            schema.as_deref(),
            output.as_deref(),
            stdout,
        ),
        Commands::List { schema, format } => {
            commands::list::run(&cli.dir, cli.config.as_deref(), schema.as_deref(), format)
        }
        Commands::Init { force } => commands::init::run(&cli.dir, force),
    }
}
