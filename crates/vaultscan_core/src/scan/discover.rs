use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::scan::{Result, ScanError, ScanOptions};

/// Recursively collect candidate files under `root` whose extension matches.
///
/// Hidden files and ignore files do not hide candidates. Output is sorted.
pub fn discover(root: &Path, opt: &ScanOptions) -> Result<Vec<PathBuf>> {
	if !root.exists() {
		return Err(ScanError::NotFound { path: root.to_path_buf() });
	}

	let extension = OsStr::new(&opt.extension);
	let mut out = Vec::new();
	for entry in WalkBuilder::new(root).standard_filters(false).build() {
		let entry = match entry {
			Ok(entry) => entry,
			Err(err) => {
				warn!("skipping unreadable entry: {err}");
				continue;
			}
		};
		if !entry.file_type().is_some_and(|kind| kind.is_file()) {
			continue;
		}
		if entry.path().extension() == Some(extension) {
			out.push(entry.into_path());
		}
	}

	out.sort();
	debug!(root = %root.display(), candidates = out.len(), "discovery finished");
	Ok(out)
}
