//! # Dashboard Report
//!
//! Renders a JSON snapshot as the full dashboard report.
//!
//! ## Usage
//! ```bash
//! # Report over every sale, default filters from analytics.toml
//! cargo run -p tally-analytics --bin dashboard-report -- snapshot.json
//!
//! # Last 30 days
//! cargo run -p tally-analytics --bin dashboard-report -- snapshot.json --range 30d
//!
//! # Explicit config file
//! cargo run -p tally-analytics --bin dashboard-report -- snapshot.json --config ./analytics.toml
//! ```
//!
//! The report is printed to stdout as pretty JSON; logs go to stderr.

use std::env;
use std::path::PathBuf;

use tally_analytics::{AnalyticsConfig, AnalyticsResult, SalesAnalytics, Snapshot};
use tally_core::{TimeRange, ValidationError};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!("Tally Dashboard Report");
    println!();
    println!("Usage: dashboard-report <SNAPSHOT> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -r, --range <RANGE>    7d | 30d | 3m | 6m | 1y | all (default: from config)");
    println!("  -c, --config <PATH>    Config file path (default: platform config dir)");
    println!("  -h, --help             Show this help message");
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally_analytics=trace` - Show trace for the engine only
/// - Default: INFO, DEBUG for tally crates
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tally=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parsed command line. `None` from [`parse_args`] means help was shown.
#[derive(Debug, PartialEq)]
struct Args {
    snapshot_path: PathBuf,
    range: Option<TimeRange>,
    config_path: Option<PathBuf>,
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

/// Parses everything after the program name.
fn parse_args(args: &[String]) -> AnalyticsResult<Option<Args>> {
    let mut snapshot_path: Option<PathBuf> = None;
    let mut range: Option<TimeRange> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            flag @ ("--range" | "-r") => {
                let value = iter.next().ok_or_else(|| required(flag))?;
                range = Some(value.parse::<TimeRange>()?);
            }
            flag @ ("--config" | "-c") => {
                let value = iter.next().ok_or_else(|| required(flag))?;
                config_path = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Ok(None),
            other => snapshot_path = Some(PathBuf::from(other)),
        }
    }

    let snapshot_path = snapshot_path.ok_or_else(|| required("<SNAPSHOT>"))?;
    Ok(Some(Args {
        snapshot_path,
        range,
        config_path,
    }))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let Args {
        snapshot_path,
        range,
        config_path,
    } = match parse_args(&args) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_help();
            return Ok(());
        }
        Err(e) if e.is_user_input() => {
            eprintln!("error: {}", e);
            print_help();
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    init_tracing();

    let config = match config_path {
        Some(path) => AnalyticsConfig::load(Some(path))?,
        None => AnalyticsConfig::load_or_default(None),
    };

    let snapshot = Snapshot::load(&snapshot_path)?;
    snapshot.validate()?;

    let mut filters = config.defaults.clone();
    if let Some(range) = range {
        filters.time_range = range;
    }

    let engine = SalesAnalytics::new(
        &snapshot.sales,
        &snapshot.products,
        &snapshot.customers,
        config.clock()?,
    )
    .with_day_format(config.labels.day_format.clone())?;

    info!(
        sales = snapshot.sales.len(),
        time_range = %filters.time_range,
        "Rendering dashboard report"
    );

    let report = engine.report(&filters);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_analytics::AnalyticsError;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_parse_full_command_line() {
        let args = parse_args(&argv(&["snap.json", "-r", "30d", "--config", "a.toml"]))
            .unwrap()
            .unwrap();
        assert_eq!(
            args,
            Args {
                snapshot_path: PathBuf::from("snap.json"),
                range: Some(TimeRange::Last30Days),
                config_path: Some(PathBuf::from("a.toml")),
            }
        );
    }

    #[test]
    fn test_help_short_circuits() {
        assert_eq!(parse_args(&argv(&["--help", "--range"])).unwrap(), None);
    }

    #[test]
    fn test_trailing_flag_without_value_is_an_error() {
        for flag in ["--range", "-r", "--config", "-c"] {
            let err = parse_args(&argv(&["snap.json", flag])).unwrap_err();
            assert!(err.is_user_input());
            assert_eq!(err.to_string(), format!("{} is required", flag));
        }
    }

    #[test]
    fn test_unknown_range_is_user_input() {
        let err = parse_args(&argv(&["snap.json", "--range", "fortnight"])).unwrap_err();
        assert!(matches!(err, AnalyticsError::Validation(_)));
        assert!(err.is_user_input());
    }

    #[test]
    fn test_missing_snapshot_names_the_argument() {
        let err = parse_args(&argv(&["--range", "7d"])).unwrap_err();
        assert_eq!(err.to_string(), "<SNAPSHOT> is required");
    }
}
