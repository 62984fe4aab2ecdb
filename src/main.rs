use clap::Parser;
use pet_value::cli::{Cli, Commands};
use pet_value::config::Config;
use pet_value::valuation::ValuationEngine;
use std::path::Path;

const DEFAULT_CONFIG: &str = "config.toml";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => Config::load(path).unwrap_or_else(|e| {
            eprintln!("Warning: Could not load config from {}: {}", path.display(), e);
            eprintln!("Using default configuration");
            Config::default()
        }),
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load(DEFAULT_CONFIG)?,
        None => Config::default(),
    };
    if let Some(level) = &cli.log_level {
        config.telemetry.log_level = level.clone();
    }

    // Initialize telemetry
    pet_value::telemetry::init_telemetry(&config.telemetry)?;

    let engine = ValuationEngine::new(config.model_table()?);
    tracing::debug!(revision = ?config.valuation.revision, "Model table loaded");

    match cli.command {
        Commands::Prompt(args) => {
            tracing::info!("Starting interactive session");
            args.execute(&config, engine)?;
        }
        Commands::Calc(args) => {
            args.execute(&engine)?;
        }
        Commands::Resolve(args) => {
            args.execute(&config)?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("{}", toml::to_string_pretty(&config)?);
            println!("Active model table:");
            println!("{}", toml::to_string_pretty(engine.table())?);
        }
    }

    Ok(())
}
