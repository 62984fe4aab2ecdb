//! CLI interface for pet-value
//!
//! Provides subcommands for:
//! - `prompt`: Interactive question-and-answer valuation
//! - `calc`: Single valuation from flags
//! - `resolve`: Fuzzy-match text against the type or variant vocabulary
//! - `config`: Show the active configuration and model table

mod calc;
mod input;
mod prompt;
mod resolve;

pub use calc::{CalcArgs, OutputFormat};
pub use input::{is_yes, parse_count, parse_in_range, parse_positive_decimal, InputError};
pub use prompt::{PromptArgs, PromptSession};
pub use resolve::{CategoryKind, ResolveArgs};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pet-value")]
#[command(about = "Estimate the value of collectible pets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file (defaults to ./config.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter, overrides the config file
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive valuation loop
    Prompt(PromptArgs),
    /// Value one pet from command-line fields
    Calc(CalcArgs),
    /// Match free text against the category vocabulary
    Resolve(ResolveArgs),
    /// Show configuration
    Config,
}
