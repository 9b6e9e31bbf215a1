//! Command line argument parsing for the typosuggest CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// typosuggest - "did you mean" suggestions for mistyped commands
#[derive(Parser, Debug, Clone)]
#[command(name = "typosuggest")]
#[command(about = "Suggest registered commands close to a mistyped one")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TypoSuggestArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug, 4=trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Engine configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE", env = "TYPOSUGGEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TypoSuggestArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Suggest commands for a mistyped invocation
    Suggest(SuggestArgs),

    /// Compute the edit distance between two words
    Distance(DistanceArgs),

    /// Print a command hierarchy
    Tree(TreeArgs),
}

/// Arguments for suggesting commands
#[derive(Parser, Debug, Clone)]
pub struct SuggestArgs {
    /// Command hierarchy file (JSON)
    #[arg(short, long, value_name = "COMMANDS_FILE")]
    pub commands: PathBuf,

    /// Prefix the invocation was sent with; empty means none was used
    #[arg(short, long, default_value = "!")]
    pub prefix: String,

    /// Maximum distance worth suggesting (overrides the configuration)
    #[arg(short, long)]
    pub threshold: Option<usize>,

    /// Number of suggestions to show
    #[arg(short = 'n', long, default_value = "3")]
    pub top: usize,

    /// Invocation tokens following the prefix
    #[arg(value_name = "TOKENS", required = true, num_args = 1..)]
    pub tokens: Vec<String>,
}

/// Arguments for computing a distance
#[derive(Parser, Debug, Clone)]
pub struct DistanceArgs {
    /// First word
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Second word
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Stop counting above this distance
    #[arg(short, long)]
    pub max: Option<usize>,
}

/// Arguments for printing a hierarchy
#[derive(Parser, Debug, Clone)]
pub struct TreeArgs {
    /// Command hierarchy file (JSON)
    #[arg(short, long, value_name = "COMMANDS_FILE")]
    pub commands: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
