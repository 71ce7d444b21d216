mod bytes;
mod decode;
mod error;
mod header;
mod json;
mod tag;
mod value;

/// Word-aligned byte cursor.
pub use bytes::{Cursor, WORD, padding_for};
/// Decoding entry points and options.
pub use decode::{DecodeOptions, decode, decode_with};
/// Error, error class, and result aliases.
pub use error::{CloneError, ErrorKind, Result};
/// Stream header and scope.
pub use header::{CloneHeader, Scope};
/// JSON rendering of decoded graphs.
pub use json::{CIRCULAR, RenderOptions, TRUNCATED, to_json, value_to_json};
/// Tag catalogue and record shape.
pub use tag::{FLOAT_MAX, Record, TYPED_ARRAY_V1_MAX, TYPED_ARRAY_V1_MIN, Tag};
/// Decoded value model.
pub use value::{
	ArrayObject, DateObject, Decoded, Element, Heap, HeapObject, MapObject, ObjectId, PlainObject, PropertyKey, RegExpFlags, RegExpObject, SetObject, Value,
};
