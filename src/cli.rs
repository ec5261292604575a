//! Command-line interface parsing for CLI-Mate
//!
//! This module handles parsing of CLI arguments using clap: the `weather`
//! command with its cache bypass flag and setting overrides, and `version`.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::config::Config;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// A required text argument was empty or whitespace
    #[error("value must not be empty")]
    Empty,
}

/// CLI-Mate: Terminal weather forecasts
#[derive(Parser, Debug)]
#[command(name = "cli-mate")]
#[command(about = "CLI-Mate: Terminal weather forecasts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get weather for a US city
    Weather(WeatherArgs),
    /// Show version
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct WeatherArgs {
    /// City name
    #[arg(long, value_parser = parse_non_empty)]
    pub city: String,

    /// State abbreviation (e.g., CA, NY)
    #[arg(long, value_parser = parse_non_empty)]
    pub state: String,

    /// Skip cache and fetch data
    #[arg(long)]
    pub no_cache: bool,

    /// Log pipeline and cache activity to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Timeout for each upstream request
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// How long a cached forecast stays fresh
    #[arg(long, value_name = "MINUTES")]
    pub ttl_minutes: Option<u64>,
}

impl WeatherArgs {
    /// Applies command-line overrides on top of `config`
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(minutes) = self.ttl_minutes {
            config = config.with_cache_ttl(Duration::from_secs(minutes.saturating_mul(60)));
        }
        config
    }
}

/// Rejects empty or whitespace-only values, trimming the rest
pub fn parse_non_empty(s: &str) -> Result<String, CliError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Err(CliError::Empty)
    } else {
        Ok(trimmed.to_string())
    }
}
