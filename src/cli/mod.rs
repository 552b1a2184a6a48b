//! CLI module for tuning-db
//!
//! # Commands
//!
//! - `serve` - Start the HTTP server
//! - `calculate` - Compute tuning parameters locally
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! tuning-db serve
//!
//! # Print a cnf fragment for a 16 GB host and save it
//! tuning-db calculate --memory "16 GB" --output ./tuning_db.cnf
//!
//! # Generate shell completions
//! tuning-db completions bash > ~/.bash_completion.d/tuning-db
//! ```

pub mod calculate;
pub mod completions;
pub mod config;
pub mod output;
pub mod serve;

pub use calculate::handle_calculate;
pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::hardware::MemorySize;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "tuning-db.toml";

/// tuning-db - MySQL tuning calculator
#[derive(Parser, Debug)]
#[command(
    name = "tuning-db",
    version,
    about = "Derive MySQL server tuning parameters from host hardware"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Calculate tuning parameters without starting a server
    Calculate(CalculateArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "TUNING_DB_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "TUNING_DB_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TUNING_DB_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Write every result to the configured output path
    #[arg(long)]
    pub persist: bool,
}

/// Rendering used by `calculate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `[mysqld]` option file fragment
    Cnf,
    /// Flat JSON object
    Json,
    /// Human-readable table
    Table,
}

#[derive(Args, Debug)]
pub struct CalculateArgs {
    /// Host memory, as "16 GB" or a bare number of gigabytes
    #[arg(short, long, value_parser = parse_memory_arg)]
    pub memory: MemorySize,

    /// Number of CPUs
    #[arg(long, default_value = "0")]
    pub cpus: u32,

    /// Database type
    #[arg(long, default_value = "mysql")]
    pub db_type: String,

    /// Database version
    #[arg(long, default_value = "")]
    pub db_version: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "cnf")]
    pub format: OutputFormat,

    /// Also save the cnf fragment to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to configuration file (used for the [tuning] baseline)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

fn parse_memory_arg(s: &str) -> Result<MemorySize, String> {
    Ok(match s.parse::<i64>() {
        Ok(gb) => MemorySize::Gigabytes(gb),
        Err(_) => MemorySize::Text(s.to_string()),
    })
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["tuning-db", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.config, PathBuf::from("tuning-db.toml"));
                assert!(!args.persist);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["tuning-db", "serve", "-p", "9000"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.port, Some(9000)),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_calculate_text_memory() {
        let cli = Cli::try_parse_from(["tuning-db", "calculate", "--memory", "16 GB"]).unwrap();
        match cli.command {
            Commands::Calculate(args) => {
                assert_eq!(args.memory, MemorySize::Text("16 GB".to_string()));
                assert_eq!(args.format, OutputFormat::Cnf);
                assert_eq!(args.db_type, "mysql");
                assert!(args.output.is_none());
            }
            _ => panic!("Expected Calculate command"),
        }
    }

    #[test]
    fn test_cli_parse_calculate_integer_memory_and_format() {
        let cli = Cli::try_parse_from([
            "tuning-db", "calculate", "-m", "32", "--format", "table", "--cpus", "8",
        ])
        .unwrap();
        match cli.command {
            Commands::Calculate(args) => {
                assert_eq!(args.memory, MemorySize::Gigabytes(32));
                assert_eq!(args.format, OutputFormat::Table);
                assert_eq!(args.cpus, 8);
            }
            _ => panic!("Expected Calculate command"),
        }
    }

    #[test]
    fn test_cli_calculate_requires_memory() {
        assert!(Cli::try_parse_from(["tuning-db", "calculate"]).is_err());
    }

    #[test]
    fn test_cli_parse_config_init() {
        let cli = Cli::try_parse_from(["tuning-db", "config", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init(args)) => assert!(args.force),
            _ => panic!("Expected Config Init command"),
        }
    }
}
