//! udl CLI tool.
//!
//! Usage:
//! ```bash
//! udl lint [OPTIONS] [PATHS]...
//! udl list-linters
//! udl styles
//! udl classify <STYLE>
//! udl init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use udl::EolMode;

mod commands;
mod config_resolver;

/// Background linting and style-family tools for multi-language documents
#[derive(Parser)]
#[command(name = "udl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "UDL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint files through the background lint service
    Lint {
        /// Files or directories to lint (default: current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Lint every file as this language instead of mapping extensions
        #[arg(short, long)]
        language: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Declared document encoding (overrides the config)
        #[arg(long)]
        encoding: Option<String>,

        /// Expected line terminator: lf, crlf or cr (overrides the config)
        #[arg(long)]
        eol: Option<EolMode>,

        /// Lint languages that opted out of their generic linter
        #[arg(long)]
        force: bool,
    },

    /// List available linters
    ListLinters,

    /// Show style-family ranges and the indent precedence table
    Styles,

    /// Print the family that owns a style id
    Classify {
        /// Style id to classify
        style: u8,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
    /// Source snippets rendered with miette.
    Fancy,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Lint {
            paths,
            language,
            format,
            encoding,
            eol,
            force,
        } => {
            let project_dir = paths
                .first()
                .filter(|p| p.is_dir())
                .cloned()
                .unwrap_or_else(|| PathBuf::from("."));
            let source = config_resolver::resolve(&project_dir, cli.config.as_deref());
            let options = commands::lint::LintOptions {
                language,
                format,
                encoding,
                eol,
                force,
            };
            commands::lint::run(&paths, &options, &source)
        }
        Commands::ListLinters => {
            commands::list_linters::run();
            Ok(())
        }
        Commands::Styles => {
            commands::styles::run();
            Ok(())
        }
        Commands::Classify { style } => commands::classify::run(style),
        Commands::Init { force } => commands::init::run(force),
    }
}
