use std::path::PathBuf;

use thiserror::Error;

use crate::sclone::CloneError;

/// Crate-local result type for scanning.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors produced while locating, reading, and decoding object-store rows.
#[derive(Debug, Error)]
pub enum ScanError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// SQLite open or query failure.
	#[error("sqlite: {0}")]
	Sqlite(#[from] rusqlite::Error),
	/// Snappy payload could not be decompressed.
	#[error("snappy: {0}")]
	Snappy(#[from] snap::Error),
	/// Decompressed output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes (claimed {claimed})")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
		/// Output size reached or claimed by the payload.
		claimed: usize,
	},
	/// Row payload is SQL `NULL`.
	#[error("row payload is null")]
	NullPayload,
	/// Structured-clone decoding failed.
	#[error("decode: {0}")]
	Decode(#[from] CloneError),
	/// Scan root does not exist.
	#[error("path not found: {}", path.display())]
	NotFound {
		/// Requested root.
		path: PathBuf,
	},
}
