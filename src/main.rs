// Copyright (c) 2025 Hewa Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Hewa command-line tool.
//!
//! Lists the error registry, builds errors from the command line and manages
//! the configuration file.

use clap::{Parser, Subcommand};
use hewa::config::{self, ConfigLoader, HewaConfig, LogConfig, ENV_PREFIX};
use hewa::{Arg, ErrorFactory, HewaError, HewaResult};
use std::path::PathBuf;
use std::process;
use tracing::info;

/// Command line arguments for the Hewa tool.
#[derive(Parser, Debug)]
#[clap(name = "hewa", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// List every error variant
    List,

    /// Build an error and print it as JSON
    Create {
        /// Factory arguments; each is parsed as JSON, falling back to a string
        #[clap(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
fn init_logging(log: &LogConfig) -> HewaResult<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .with_file(true);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| HewaError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

fn parse_arg(raw: &str) -> Arg {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => Arg::from(value),
        Err(_) => Arg::from(raw),
    }
}

fn load_config(loader: &ConfigLoader, explicit: bool) -> HewaResult<HewaConfig> {
    match loader.load() {
        Ok(config) => Ok(config),
        Err(hewa::error::config::ConfigError::FileNotFound(_)) if !explicit => {
            Ok(HewaConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Main entry point for the application.
fn main() -> HewaResult<()> {
    let args = <Args as clap::Parser>::parse();
    let loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);
    let explicit = args.config.is_some();

    match args.command {
        Command::List => {
            let config = load_config(&loader, explicit)?;
            init_logging(&config.log)?;
            let factory = ErrorFactory::from_config(&config);
            for variant in factory.registry().variants() {
                println!(
                    "{:<5} {:<36} {:<7} {}",
                    variant.code(),
                    variant.class_name(),
                    serde_json::to_string(&variant.kind())?.trim_matches('"'),
                    variant.default_message()
                );
            }
            Ok(())
        }
        Command::Create { args: raw } => {
            let config = load_config(&loader, explicit)?;
            init_logging(&config.log)?;
            let factory = ErrorFactory::from_config(&config);
            let err = factory.create(raw.iter().map(|arg| parse_arg(arg)))?;
            println!("{}", serde_json::to_string_pretty(&err)?);
            Ok(())
        }
        Command::Validate => {
            init_logging(&LogConfig::default())?;
            info!("Validating configuration");
            match loader.load() {
                Ok(_) => {
                    info!("Configuration validated successfully");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!("Configuration validation error: {}", e);
                    process::exit(1);
                }
            }
        }
        Command::GenConfig { output } => {
            init_logging(&LogConfig::default())?;
            info!("Generating default configuration");
            let default_config = config::HewaConfig::default();

            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| HewaError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}
