//! Enlist terminal driver.
//!
//! Drives a form session backed by the mock lookup service from line
//! commands on stdin (or a script file) and prints the form after each change.

mod command;
mod driver;
mod render;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use enlist_form::{FormConfig, FormSession};
use tokio::io::BufReader;
use tracing::info;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "enlist")]
#[command(about = "Add name/location entries with debounced name checks")]
struct Args {
	/// Configuration file (defaults to $XDG_CONFIG_HOME/enlist/config.toml)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Read commands from a file instead of stdin
	#[arg(short, long, value_name = "PATH")]
	script: Option<PathBuf>,

	/// Override the debounce window
	#[arg(long, value_name = "MS")]
	debounce_ms: Option<u64>,

	/// Override the mock lookup latency bound
	#[arg(long, value_name = "MS")]
	max_latency_ms: Option<u64>,

	/// Cancel older name checks when a newer one starts
	#[arg(long)]
	supersede: bool,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	setup_tracing(args.verbose);

	let config = load_config(&args)?;
	info!(debounce_ms = config.debounce_ms, max_latency_ms = config.mock.max_latency_ms, "starting enlist");

	let mut session = FormSession::with_mock(&config);
	let mut stdout = std::io::stdout();
	match &args.script {
		Some(path) => {
			let file = tokio::fs::File::open(path)
				.await
				.with_context(|| format!("failed to open script {}", path.display()))?;
			driver::run(&mut session, BufReader::new(file), &mut stdout).await?;
		}
		None => {
			writeln!(stdout, "{}", command::HELP)?;
			driver::run(&mut session, BufReader::new(tokio::io::stdin()), &mut stdout).await?;
		}
	}
	session.close();
	Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<FormConfig> {
	let mut config = match &args.config {
		Some(path) => FormConfig::load(path)?,
		None => FormConfig::load_default()?,
	};
	if let Some(ms) = args.debounce_ms {
		anyhow::ensure!(ms > 0, "--debounce-ms must be greater than zero");
		config.debounce_ms = ms;
	}
	if let Some(ms) = args.max_latency_ms {
		config.mock.max_latency_ms = ms;
	}
	if args.supersede {
		config.supersede_in_flight = true;
	}
	Ok(config)
}

fn setup_tracing(verbose: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("enlist_form=trace,enlist_cli=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});

	// ENLIST_LOG_DIR keeps logs out of the command output.
	if let Some(log_dir) = std::env::var("ENLIST_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("enlist.{}.log", std::process::id()));
		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_target(true);
			tracing_subscriber::registry().with(filter).with(file_layer).init();
			tracing::info!(path = ?log_path, "tracing initialized");
			return;
		}
	}

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}
