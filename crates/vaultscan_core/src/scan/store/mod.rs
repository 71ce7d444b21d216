use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, OptionalExtension};

use crate::scan::{Result, ScanOptions};

/// One extracted row payload; `None` when the column is SQL `NULL` or not a blob/text value.
pub type Payload = Option<Vec<u8>>;

/// Open `path` read-only and collect every row's payload column.
///
/// Returns `None` when the expected table is absent.
pub fn read_payloads(path: &Path, opt: &ScanOptions) -> Result<Option<Vec<Payload>>> {
	let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;
	let conn = Connection::open_with_flags(sqlite_uri(path), flags)?;

	let table: Option<String> = conn
		.query_row("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1", [opt.table.as_str()], |row| row.get(0))
		.optional()?;
	if table.is_none() {
		return Ok(None);
	}

	let sql = format!("SELECT {} FROM {}", quote_ident(&opt.column), quote_ident(&opt.table));
	let mut stmt = conn.prepare(&sql)?;
	let rows = stmt.query_map([], |row| {
		Ok(match row.get_ref(0)? {
			ValueRef::Blob(bytes) | ValueRef::Text(bytes) => Some(bytes.to_vec()),
			ValueRef::Null | ValueRef::Integer(_) | ValueRef::Real(_) => None,
		})
	})?;

	let mut out = Vec::new();
	for row in rows {
		out.push(row?);
	}
	Ok(Some(out))
}

/// SQLite URI opening `path` read-only and immutable.
pub fn sqlite_uri(path: &Path) -> String {
	let mut uri = String::from("file:");
	for ch in path.to_string_lossy().chars() {
		match ch {
			'%' => uri.push_str("%25"),
			'?' => uri.push_str("%3f"),
			'#' => uri.push_str("%23"),
			_ => uri.push(ch),
		}
	}
	uri.push_str("?mode=ro&immutable=1");
	uri
}

fn quote_ident(name: &str) -> String {
	format!("\"{}\"", name.replace('"', "\"\""))
}
