#![allow(missing_docs)]

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};
use vaultscan::scan::{Result, ScanOptions, discover, scan_file};

mod report;

#[derive(Parser)]
#[command(name = "vaultscan", about = "Search Firefox IndexedDB files for MetaMask vaults")]
struct Cli {
	/// Database file to scan; defaults to every .sqlite file below the current folder.
	path: Option<PathBuf>,
}

fn main() {
	init_logging();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_logging() {
	let filter = EnvFilter::try_from_env("VAULTSCAN_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| EnvFilter::new("warn"));

	fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

fn run() -> Result<()> {
	let cli = Cli::parse();
	let opt = ScanOptions::default();
	let mut out = io::stdout().lock();

	match cli.path {
		Some(path) => scan_one(&mut out, &path, &opt)?,
		None => {
			writeln!(out, "Scanning all .{} files in the current folder recursively...", opt.extension)?;
			for path in discover(Path::new("."), &opt)? {
				scan_one(&mut out, &path, &opt)?;
			}
		}
	}

	out.flush()?;
	Ok(())
}

/// Scan one file, reporting file-level errors instead of propagating them.
fn scan_one(out: &mut impl Write, path: &Path, opt: &ScanOptions) -> Result<()> {
	match scan_file(path, opt) {
		Ok(Some(file)) => report::write_report(out, &file)?,
		Ok(None) => {}
		Err(err) => report::write_failure(out, path, &err)?,
	}
	Ok(())
}
