//! Shared test helpers for workspace crates.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};

const HEADER: u32 = 0xFFF1_0000;
const NULL: u32 = 0xFFFF_0000;
const UNDEFINED: u32 = 0xFFFF_0001;
const BOOLEAN: u32 = 0xFFFF_0002;
const INT32: u32 = 0xFFFF_0003;
const STRING: u32 = 0xFFFF_0004;
const DATE_OBJECT: u32 = 0xFFFF_0005;
const REGEXP_OBJECT: u32 = 0xFFFF_0006;
const ARRAY_OBJECT: u32 = 0xFFFF_0007;
const OBJECT_OBJECT: u32 = 0xFFFF_0008;
const BOOLEAN_OBJECT: u32 = 0xFFFF_000A;
const STRING_OBJECT: u32 = 0xFFFF_000B;
const NUMBER_OBJECT: u32 = 0xFFFF_000C;
const BACK_REFERENCE_OBJECT: u32 = 0xFFFF_000D;
const MAP_OBJECT: u32 = 0xFFFF_0011;
const SET_OBJECT: u32 = 0xFFFF_0012;
const END_OF_KEYS: u32 = 0xFFFF_0013;
const LATIN1: u32 = 0x8000_0000;

/// Scope code of cross-process persisted data.
pub const SCOPE_DIFFERENT_PROCESS: u32 = 2;
/// Scope code of IndexedDB persisted data.
pub const SCOPE_INDEXED_DB: u32 = 3;

/// Writer for structured-clone byte streams, one 8-byte record at a time.
#[derive(Debug, Default, Clone)]
pub struct StreamBuilder {
	bytes: Vec<u8>,
}

impl StreamBuilder {
	/// Start a headerless (legacy) stream.
	pub fn new() -> Self {
		Self::default()
	}

	/// Start a stream with an explicit header record.
	pub fn with_scope(scope: u32) -> Self {
		Self::new().record(HEADER, scope)
	}

	/// Start a stream the way IndexedDB persists values.
	pub fn persisted() -> Self {
		Self::with_scope(SCOPE_INDEXED_DB)
	}

	/// Append one raw little-endian word.
	pub fn word(mut self, word: u64) -> Self {
		self.bytes.extend_from_slice(&word.to_le_bytes());
		self
	}

	/// Append one `(tag, data)` record.
	pub fn record(self, tag: u32, data: u32) -> Self {
		self.word((u64::from(tag) << 32) | u64::from(data))
	}

	/// Append raw bytes without alignment.
	pub fn raw(mut self, bytes: &[u8]) -> Self {
		self.bytes.extend_from_slice(bytes);
		self
	}

	/// `null`.
	pub fn null(self) -> Self {
		self.record(NULL, 0)
	}

	/// `undefined`.
	pub fn undefined(self) -> Self {
		self.record(UNDEFINED, 0)
	}

	/// Primitive boolean.
	pub fn boolean(self, value: bool) -> Self {
		self.record(BOOLEAN, u32::from(value))
	}

	/// Signed 32-bit integer.
	pub fn int32(self, value: i32) -> Self {
		self.record(INT32, value as u32)
	}

	/// Bare double.
	pub fn double(self, value: f64) -> Self {
		self.word(value.to_bits())
	}

	/// Primitive string; Latin-1 when every char fits a byte, UTF-16 otherwise.
	pub fn string(self, text: &str) -> Self {
		self.string_record(STRING, text)
	}

	/// Primitive string forced to the UTF-16 encoding.
	pub fn utf16_string(self, text: &str) -> Self {
		self.wide_record(STRING, text)
	}

	/// Boxed boolean.
	pub fn boolean_object(self, value: bool) -> Self {
		self.record(BOOLEAN_OBJECT, u32::from(value))
	}

	/// Boxed string.
	pub fn string_object(self, text: &str) -> Self {
		self.string_record(STRING_OBJECT, text)
	}

	/// Boxed number.
	pub fn number_object(self, value: f64) -> Self {
		self.record(NUMBER_OBJECT, 0).double(value)
	}

	/// `Date` with its stored time value.
	pub fn date(self, time: f64) -> Self {
		self.record(DATE_OBJECT, 0).double(time)
	}

	/// `RegExp` with flag bits and source.
	pub fn regexp(self, source: &str, flags: u32) -> Self {
		self.record(REGEXP_OBJECT, flags).string(source)
	}

	/// Open an array.
	pub fn array(self) -> Self {
		self.record(ARRAY_OBJECT, 0)
	}

	/// Open a plain object.
	pub fn object(self) -> Self {
		self.record(OBJECT_OBJECT, 0)
	}

	/// Open a `Map`.
	pub fn map(self) -> Self {
		self.record(MAP_OBJECT, 0)
	}

	/// Open a `Set`.
	pub fn set(self) -> Self {
		self.record(SET_OBJECT, 0)
	}

	/// Close the innermost container.
	pub fn end(self) -> Self {
		self.record(END_OF_KEYS, 0)
	}

	/// Reference an earlier object by table index.
	pub fn back_ref(self, index: u32) -> Self {
		self.record(BACK_REFERENCE_OBJECT, index)
	}

	/// `key: "value"` string property.
	pub fn str_prop(self, key: &str, value: &str) -> Self {
		self.string(key).string(value)
	}

	/// Finish and return the stream bytes.
	pub fn finish(self) -> Vec<u8> {
		self.bytes
	}

	fn string_record(self, tag: u32, text: &str) -> Self {
		if text.chars().all(|ch| u32::from(ch) <= 0xFF) {
			let payload: Vec<u8> = text.chars().map(|ch| u32::from(ch) as u8).collect();
			return self.record(tag, LATIN1 | payload.len() as u32).padded(&payload);
		}
		self.wide_record(tag, text)
	}

	fn wide_record(self, tag: u32, text: &str) -> Self {
		let units: Vec<u16> = text.encode_utf16().collect();
		let mut payload = Vec::with_capacity(units.len() * 2);
		for unit in &units {
			payload.extend_from_slice(&unit.to_le_bytes());
		}
		self.record(tag, units.len() as u32).padded(&payload)
	}

	fn padded(mut self, payload: &[u8]) -> Self {
		self.bytes.extend_from_slice(payload);
		let pad = (8 - payload.len() % 8) % 8;
		self.bytes.resize(self.bytes.len() + pad, 0);
		self
	}
}

/// One row of a fixture object store.
#[derive(Debug, Clone)]
pub enum StoreRow {
	/// Structured-clone bytes, Snappy-compressed on write.
	Clone(Vec<u8>),
	/// Bytes stored as-is.
	Raw(Vec<u8>),
	/// SQL `NULL` payload.
	Null,
}

/// Create an IndexedDB-shaped SQLite file at `path` holding `rows` in `object_data.data`.
pub fn write_object_store(path: &Path, rows: &[StoreRow]) {
	let conn = Connection::open(path).expect("fixture database opens");
	conn.execute_batch(
		"CREATE TABLE object_data (
			object_store_id INTEGER NOT NULL,
			key BLOB NOT NULL,
			index_data_values BLOB DEFAULT NULL,
			file_ids TEXT,
			data BLOB,
			PRIMARY KEY (object_store_id, key)
		);",
	)
	.expect("fixture table is created");

	for (idx, row) in rows.iter().enumerate() {
		let data = match row {
			StoreRow::Clone(bytes) => Some(snap::raw::Encoder::new().compress_vec(bytes).expect("snappy compresses")),
			StoreRow::Raw(bytes) => Some(bytes.clone()),
			StoreRow::Null => None,
		};
		conn.execute(
			"INSERT INTO object_data (object_store_id, key, data) VALUES (1, ?1, ?2)",
			params![(idx as i64).to_le_bytes().to_vec(), data],
		)
		.expect("fixture row is inserted");
	}
}

/// Create an SQLite file at `path` without an `object_data` table.
pub fn write_unrelated_store(path: &Path) {
	let conn = Connection::open(path).expect("fixture database opens");
	conn.execute_batch("CREATE TABLE moz_places (id INTEGER PRIMARY KEY, url TEXT);")
		.expect("unrelated table is created");
}

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Fresh, empty scratch directory under the target dir, unique per test name and process.
pub fn scratch_dir(name: &str) -> PathBuf {
	let dir = target_dir().join("vaultscan-scratch").join(format!("{name}-{}", std::process::id()));
	let _ = fs::remove_dir_all(&dir);
	fs::create_dir_all(&dir).expect("scratch dir is created");
	dir
}
