use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use crate::scan::{Finding, Result, ScanError, ScanOptions, decompress, inspect, read_payloads};
use crate::sclone::decode_with;

/// Scan outcome for one database file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
	/// Scanned file.
	pub path: PathBuf,
	/// Rows read from the object store.
	pub rows: usize,
	/// Rows that failed to decompress or decode.
	pub failures: usize,
	/// Findings in row order.
	pub findings: Vec<Finding>,
}

/// Scan every object-store row in `path`.
///
/// Returns `None` when the file has no object-store table. Row failures are counted, not returned.
pub fn scan_file(path: &Path, opt: &ScanOptions) -> Result<Option<FileReport>> {
	let Some(payloads) = read_payloads(path, opt)? else {
		debug!(path = %path.display(), "no object store table");
		return Ok(None);
	};

	let outcomes: Vec<Result<Vec<Finding>>> = payloads.par_iter().map(|payload| scan_payload(payload.as_deref(), opt)).collect();

	let mut report = FileReport {
		path: path.to_path_buf(),
		rows: outcomes.len(),
		failures: 0,
		findings: Vec::new(),
	};
	for (row, outcome) in outcomes.into_iter().enumerate() {
		match outcome {
			Ok(findings) => report.findings.extend(findings),
			Err(err) => {
				debug!(path = %path.display(), row, "row skipped: {err}");
				report.failures += 1;
			}
		}
	}

	debug!(
		path = %path.display(),
		rows = report.rows,
		failures = report.failures,
		findings = report.findings.len(),
		"file scanned"
	);
	Ok(Some(report))
}

/// Decompress, decode, and inspect a single row payload.
pub fn scan_payload(payload: Option<&[u8]>, opt: &ScanOptions) -> Result<Vec<Finding>> {
	let raw = payload.ok_or(ScanError::NullPayload)?;
	let bytes = decompress(raw, opt.max_decompressed_bytes)?;
	let decoded = decode_with(&bytes, &opt.decode)?;
	Ok(inspect(&decoded))
}

#[cfg(test)]
mod tests;
