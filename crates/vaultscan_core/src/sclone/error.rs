use thiserror::Error;

/// Crate-local result type for structured-clone decoding.
pub type Result<T> = std::result::Result<T, CloneError>;

/// Coarse failure class of a [`CloneError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Unsupported stream header, scope, or transfer map.
	InvalidHeader,
	/// Structurally invalid payload.
	Malformed,
	/// Byte source exhausted mid-record or mid-padding.
	UnexpectedEof,
	/// Well-formed payload kind the decoder does not cover.
	NotImplemented,
}

/// Errors produced while decoding a structured-clone stream.
///
/// Every error is terminal for the stream being decoded.
#[derive(Debug, Error)]
pub enum CloneError {
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Header declares the same-process scope, which only live in-memory data may use.
	#[error("invalid header: can only parse persistent data (scope is same-process)")]
	SameProcessScope,
	/// Header declares a scope outside the known set.
	#[error("invalid header: invalid scope {scope}")]
	UnknownScope {
		/// Raw scope code.
		scope: u32,
	},
	/// A transfer map header follows the stream header.
	#[error("invalid header: transfer maps are not allowed for persistent data")]
	TransferMapPresent,
	/// Back-reference index is not below the current table length.
	#[error("back-reference to non-existing object {index} (table holds {len})")]
	BadBackReference {
		/// Referenced table index.
		index: u32,
		/// Table length at the time of the read.
		len: usize,
	},
	/// Object or array key is neither a string nor an integer.
	#[error("object key must be a string or non-negative integer, got {got}")]
	MalformedKey {
		/// Logical kind of the offending key.
		got: &'static str,
	},
	/// RegExp record was not followed by its source string record.
	#[error("RegExp must be followed by string, got tag 0x{tag:08x}")]
	RegExpWithoutSource {
		/// Tag of the record found instead.
		tag: u32,
	},
	/// Tag is not part of the catalogue, or not valid at this position.
	#[error("unsupported type tag 0x{tag:08x} at offset {at}")]
	UnsupportedTag {
		/// Raw tag value.
		tag: u32,
		/// Byte offset of the record.
		at: usize,
	},
	/// Recognized payload kind the decoder does not implement.
	#[error("{what} is not implemented")]
	NotImplemented {
		/// Payload kind label.
		what: &'static str,
	},
	/// Open-container stack grew past the configured ceiling.
	#[error("container nesting exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: usize,
	},
}

impl CloneError {
	/// Classify this error into the coarse failure taxonomy.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::UnexpectedEof { .. } => ErrorKind::UnexpectedEof,
			Self::SameProcessScope | Self::UnknownScope { .. } | Self::TransferMapPresent => ErrorKind::InvalidHeader,
			Self::BadBackReference { .. }
			| Self::MalformedKey { .. }
			| Self::RegExpWithoutSource { .. }
			| Self::UnsupportedTag { .. }
			| Self::DepthExceeded { .. } => ErrorKind::Malformed,
			Self::NotImplemented { .. } => ErrorKind::NotImplemented,
		}
	}
}
