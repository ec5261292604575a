//! CLI-Mate - Terminal weather forecasts for US cities
//!
//! Looks up a city's forecast (from the local cache when fresh) and prints the
//! current conditions plus the next twelve forecast periods.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli_mate::app::lookup_weather;
use cli_mate::cache::WeatherCache;
use cli_mate::cli::{Cli, Command, WeatherArgs};
use cli_mate::config::Config;
use cli_mate::data::HttpWeatherResolver;
use cli_mate::ui;

/// Builds the stderr log subscriber; `RUST_LOG` wins over `--verbose`
fn build_subscriber(verbose: bool) -> impl tracing::Subscriber + Send + Sync {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish()
}

fn run_weather(args: &WeatherArgs) -> ExitCode {
    let config = args.apply(Config::from_env());
    let root = tracing::info_span!("cli_mate", city = %args.city, state = %args.state);

    let cache = config
        .cache_dir
        .clone()
        .map(|dir| WeatherCache::new(dir, config.cache_ttl, &root));

    let resolver = match HttpWeatherResolver::from_config(&config, &root) {
        Ok(resolver) => resolver,
        Err(e) => return report_error(&format!("Failed to create HTTP client: {}", e)),
    };

    match lookup_weather(&resolver, cache.as_ref(), &args.city, &args.state, args.no_cache) {
        Ok(lookup) => {
            tracing::debug!(parent: &root, source = ?lookup.source, "displaying weather");
            if let Err(e) = ui::print_weather(&lookup.result) {
                eprintln!("Failed to render forecast: {}", e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => report_error(&e.to_string()),
    }
}

fn report_error(message: &str) -> ExitCode {
    if ui::print_error(message).is_err() {
        eprintln!("Error: {}", message);
    }
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Version => {
            println!("cli-mate v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Command::Weather(args) => {
            let subscriber = build_subscriber(args.verbose);
            tracing::subscriber::with_default(subscriber, || run_weather(&args))
        }
    }
}
