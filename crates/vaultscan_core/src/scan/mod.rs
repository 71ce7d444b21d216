mod compression;
mod discover;
mod error;
mod file;
mod inspect;
mod store;

use crate::sclone::DecodeOptions;

/// Snappy detection and bounded decompression.
pub use compression::{Compression, SNAPPY_FRAME_MAGIC, decompress};
/// Recursive candidate discovery.
pub use discover::discover;
/// Scan error and result types.
pub use error::{Result, ScanError};
/// Per-file scan driver.
pub use file::{FileReport, scan_file, scan_payload};
/// Vault evidence search over decoded graphs.
pub use inspect::{Finding, FindingKind, inspect, looks_like_vault};
/// Read-only object-store access.
pub use store::{Payload, read_payloads, sqlite_uri};

/// Settings for discovering and scanning IndexedDB files.
#[derive(Debug, Clone)]
pub struct ScanOptions {
	/// File extension of candidate databases, without the dot.
	pub extension: String,
	/// Object-store table name.
	pub table: String,
	/// Payload column name.
	pub column: String,
	/// Largest decompressed row accepted, in bytes.
	pub max_decompressed_bytes: usize,
	/// Decoder limits applied to each row.
	pub decode: DecodeOptions,
}

impl Default for ScanOptions {
	fn default() -> Self {
		Self {
			extension: "sqlite".to_owned(),
			table: "object_data".to_owned(),
			column: "data".to_owned(),
			max_decompressed_bytes: 256 * 1024 * 1024,
			decode: DecodeOptions::for_scan(),
		}
	}
}
