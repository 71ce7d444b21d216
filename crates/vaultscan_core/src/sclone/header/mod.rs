use crate::sclone::bytes::Cursor;
use crate::sclone::tag::{Record, Tag};
use crate::sclone::{CloneError, Result};

/// Originating context declared by a stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
	/// Live data within one process; never persisted.
	SameProcess,
	/// Data crossing a process boundary.
	DifferentProcess,
	/// Persisted IndexedDB data, also assumed for headerless legacy streams.
	DifferentProcessForIndexedDb,
	/// Reserved, unassigned scope.
	Unassigned,
	/// Destination not known to the writer.
	UnknownDestination,
}

impl Scope {
	/// Map a raw scope code to a known scope.
	pub fn from_code(code: u32) -> Option<Self> {
		match code {
			1 => Some(Self::SameProcess),
			2 => Some(Self::DifferentProcess),
			3 => Some(Self::DifferentProcessForIndexedDb),
			4 => Some(Self::Unassigned),
			5 => Some(Self::UnknownDestination),
			_ => None,
		}
	}
}

/// Validated stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloneHeader {
	/// Declared or assumed scope.
	pub scope: Scope,
	/// `true` when the stream carried an explicit header record.
	pub explicit: bool,
	/// Legacy IndexedDB compatibility mode.
	pub compat: bool,
}

impl CloneHeader {
	/// Read and validate the header and transfer-map position at the cursor.
	///
	/// A stream without a header record is the old on-disk format and is read as
	/// [`Scope::DifferentProcessForIndexedDb`].
	pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		let first = Record::from_word(cursor.peek_word()?);
		let (code, explicit) = if first.tag == Tag::Header.raw() {
			let _ = cursor.read_word()?;
			// Zero is the pre-scope encoding of same-process.
			(if first.data == 0 { 1 } else { first.data }, true)
		} else {
			(3, false)
		};

		let scope = Scope::from_code(code).ok_or(CloneError::UnknownScope { scope: code })?;
		let compat = match scope {
			Scope::DifferentProcess => false,
			Scope::DifferentProcessForIndexedDb => true,
			Scope::SameProcess => return Err(CloneError::SameProcessScope),
			Scope::Unassigned | Scope::UnknownDestination => return Err(CloneError::UnknownScope { scope: code }),
		};

		let next = Record::from_word(cursor.peek_word()?);
		if next.tag == Tag::TransferMapHeader.raw() {
			return Err(CloneError::TransferMapPresent);
		}

		Ok(Self { scope, explicit, compat })
	}
}
