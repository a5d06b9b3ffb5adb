//! Main entry point for the shop scenario runner.
//!
//! This binary loads a scenario file, creates the orders it describes and
//! walks each of them through its lifecycle, printing every status report.

use clap::{Parser, ValueEnum};
use shop_config::Config;
use std::path::PathBuf;

mod runner;

use runner::{run_scenario, EventSink, JsonSink, TextSink};

/// Output format of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
	/// Human-readable report lines
	Text,
	/// One JSON object per event
	Json,
}

/// Command-line arguments for the scenario runner.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to scenario file
	#[arg(short, long, default_value = "scenario.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	/// Output format
	#[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
	format: OutputFormat,
}

/// Main entry point for the scenario runner.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging on stderr
/// 3. Loads the scenario file
/// 4. Runs every order of the scenario, writing reports to stdout
fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt()
		.with_env_filter(env_filter)
		.with_target(true)
		.with_writer(std::io::stderr)
		.init();

	let config = Config::from_file(&args.config)?;
	tracing::info!(
		"Loaded scenario [{}] with {} orders",
		config.service.id,
		config.orders.len()
	);

	let stdout = std::io::stdout();
	let mut sink: Box<dyn EventSink> = match args.format {
		OutputFormat::Text => Box::new(TextSink::new(stdout.lock())),
		OutputFormat::Json => Box::new(JsonSink::new(stdout.lock())),
	};
	run_scenario(&config, sink.as_mut())?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;
	use tempfile::tempdir;

	#[test]
	fn test_default_args() {
		let args = Args::try_parse_from(["shop"]).unwrap();
		assert_eq!(args.config, PathBuf::from("scenario.toml"));
		assert_eq!(args.log_level, "info");
		assert_eq!(args.format, OutputFormat::Text);
	}

	#[test]
	fn test_json_format_flag() {
		let args = Args::try_parse_from(["shop", "-c", "demo.toml", "--format", "json"]).unwrap();
		assert_eq!(args.config, PathBuf::from("demo.toml"));
		assert_eq!(args.format, OutputFormat::Json);
	}

	#[test]
	fn test_scenario_file_runs_end_to_end() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("scenario.toml");
		fs::write(
			&path,
			r#"
[service]
id = "${SHOP_RUN_ID:-file-test}"

[[orders]]
number = 1
delivery = { method = "home", address = "8 Any St" }
products = [{ name = "tv", features = "very good" }]
"#,
		)
		.unwrap();

		let config = Config::from_file(&path).unwrap();
		assert_eq!(config.service.id, "file-test");

		let mut out = Vec::new();
		run_scenario(&config, &mut TextSink::new(&mut out)).unwrap();
		let text = String::from_utf8(out).unwrap();
		assert!(text.contains("your order contains:"));
		assert!(text.contains("order #1 handed over"));
	}
}
