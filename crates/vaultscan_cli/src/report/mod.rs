use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

use tracing::info;
use vaultscan::scan::{FileReport, Finding};

/// Rule printed around every finding.
pub const SEPARATOR: &str = "---------------------------------------";

/// Print one finding between separators.
pub fn write_finding(out: &mut impl Write, finding: &Finding) -> io::Result<()> {
	writeln!(out, "{SEPARATOR}")?;
	writeln!(out, "{}\n", finding.kind.headline())?;
	writeln!(out, "{}", finding.payload)?;
	writeln!(out, "\n{SEPARATOR}\n\n\n")
}

/// Print every finding of a scanned file, then its failure count if any rows failed.
pub fn write_report(out: &mut impl Write, report: &FileReport) -> io::Result<()> {
	for finding in &report.findings {
		info!(path = %report.path.display(), location = %finding.path, "{}", finding.kind.headline());
		write_finding(out, finding)?;
	}
	if report.failures > 0 {
		writeln!(out, "Failed to parse {} rows in {}", report.failures, report.path.display())?;
	}
	Ok(())
}

/// Print a file-level error.
pub fn write_failure(out: &mut impl Write, path: &Path, err: &impl Display) -> io::Result<()> {
	writeln!(out, "{err}")?;
	writeln!(out, "Failure while reading {}", path.display())
}
