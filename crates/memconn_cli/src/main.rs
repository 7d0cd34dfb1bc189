//! memconn CLI — the command-line interface of the memory connectivity analyzer.
//!
//! Provides `memconn paths` for listing every master-to-memory-map route of a
//! topology, `memconn sets` for grouping those routes by shared memory, and
//! `memconn check` for validating topology descriptions without searching.

#![warn(missing_docs)]

mod analysis;
mod check;
mod paths;
mod report;
mod sets;

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// memconn — master-to-memory connectivity analysis for IP-XACT designs.
#[derive(Parser, Debug)]
#[command(name = "memconn", version, about = "Memory connectivity analyzer")]
pub struct Cli {
    /// Suppress all output except errors and results.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `memconn.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every route from a master interface to a memory map.
    Paths(SearchArgs),
    /// Group routes into sets sharing address spaces or memory maps.
    Sets(SearchArgs),
    /// Load and lower topology descriptions without searching.
    Check(CheckArgs),
}

/// Arguments for the `memconn paths` and `memconn sets` subcommands.
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Topology description files (`.toml` or `.json`).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format; overrides `[output] format` of the configuration.
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Maximum number of interfaces on a route; overrides `[search] max_depth`.
    #[arg(long)]
    pub max_depth: Option<NonZeroUsize>,
}

/// Arguments for the `memconn check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Topology description files (`.toml` or `.json`).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format; overrides `[output] format` of the configuration.
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

/// Result output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

impl From<memconn_config::OutputFormat> for ReportFormat {
    fn from(format: memconn_config::OutputFormat) -> Self {
        match format {
            memconn_config::OutputFormat::Text => ReportFormat::Text,
            memconn_config::OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    init_tracing(&global);

    let result = match cli.command {
        Command::Paths(ref args) => paths::run(args, &global),
        Command::Sets(ref args) => sets::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over the
/// level chosen by `--quiet`/`--verbose`.
fn init_tracing(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(global)));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn default_log_level(global: &GlobalArgs) -> &'static str {
    if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    }
}
