use tracing::trace;

use crate::sclone::bytes::Cursor;
use crate::sclone::tag::{Record, Tag};
use crate::sclone::value::{ArrayObject, DateObject, Decoded, Heap, HeapObject, MapObject, ObjectId, PlainObject, PropertyKey, RegExpFlags, RegExpObject, SetObject, Value};
use crate::sclone::{CloneError, CloneHeader, Result};

/// Runtime limits for structured-clone decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum number of simultaneously open containers.
	pub max_depth: usize,
	/// Maximum holes one array keeps in dense storage before spilling to its sparse overlay.
	pub max_array_holes: usize,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 512,
			max_array_holes: 1024,
		}
	}
}

impl DecodeOptions {
	/// Preset for bulk scans of untrusted rows.
	pub fn for_scan() -> Self {
		Self {
			max_depth: 256,
			max_array_holes: 256,
		}
	}
}

/// Decode one stream with default limits.
pub fn decode(bytes: &[u8]) -> Result<Decoded> {
	decode_with(bytes, &DecodeOptions::default())
}

/// Decode one stream, returning the root value and the populated back-reference table.
pub fn decode_with(bytes: &[u8], opt: &DecodeOptions) -> Result<Decoded> {
	Decoder::new(bytes, opt).run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
	Array,
	Object,
	Map,
	Set,
}

/// Call-scoped decoding state.
struct Decoder<'a> {
	cursor: Cursor<'a>,
	opt: &'a DecodeOptions,
	/// Back-reference table; ids are emission order.
	heap: Heap,
	/// Containers awaiting their end-of-keys record, innermost last.
	open: Vec<(ObjectId, Container)>,
}

impl<'a> Decoder<'a> {
	fn new(bytes: &'a [u8], opt: &'a DecodeOptions) -> Self {
		Self {
			cursor: Cursor::new(bytes),
			opt,
			heap: Heap::new(),
			open: Vec::new(),
		}
	}

	fn run(mut self) -> Result<Decoded> {
		let header = CloneHeader::read(&mut self.cursor)?;
		trace!(scope = ?header.scope, explicit = header.explicit, compat = header.compat, "structured clone header");

		let root = self.start_read()?;

		while let Some(&(parent, container)) = self.open.last() {
			let next = Record::from_word(self.cursor.peek_word()?);
			if next.tag == Tag::EndOfKeys.raw() {
				let _ = self.cursor.read_word()?;
				self.open.pop();
				continue;
			}

			// Children are read before the parent is touched, so a child container is
			// already on the stack while its sibling value is decoded.
			let key = self.start_read()?;

			// Null once terminated object properties.
			if matches!(key, Value::Null) && !matches!(container, Container::Map | Container::Set) {
				self.open.pop();
				continue;
			}

			if container == Container::Set {
				return Err(CloneError::NotImplemented { what: "Set members" });
			}

			let value = self.start_read()?;
			self.assign(parent, key, value)?;
		}

		Ok(Decoded { root, heap: self.heap })
	}

	fn assign(&mut self, parent: ObjectId, key: Value, value: Value) -> Result<()> {
		let max_holes = self.opt.max_array_holes;
		match self.heap.get_mut(parent) {
			Some(HeapObject::Map(map)) => map.insert(key, value),
			Some(HeapObject::Array(array)) => match key {
				Value::Int32(index) if index >= 0 => array.set(index as u32, value, max_holes),
				// Named and negative properties on arrays are dropped.
				Value::Int32(_) | Value::String(_) => {}
				other => return Err(CloneError::MalformedKey { got: other.kind_label() }),
			},
			Some(HeapObject::Object(object)) => {
				let key = match key {
					Value::Int32(index) if index >= 0 => PropertyKey::Index(index as u32),
					Value::String(name) => PropertyKey::Name(name),
					other => return Err(CloneError::MalformedKey { got: other.kind_label() }),
				};
				object.insert(key, value);
			}
			_ => {}
		}
		Ok(())
	}

	fn open_container(&mut self, object: HeapObject, container: Container) -> Result<Value> {
		if self.open.len() >= self.opt.max_depth {
			return Err(CloneError::DepthExceeded { max_depth: self.opt.max_depth });
		}
		let id = self.heap.alloc(object);
		self.open.push((id, container));
		Ok(Value::Ref(id))
	}

	fn register(&mut self, object: HeapObject) -> Value {
		Value::Ref(self.heap.alloc(object))
	}

	/// Read one record and produce its value.
	///
	/// Table-eligible objects are registered as they are allocated; a back-reference
	/// yields an existing id and registers nothing.
	fn start_read(&mut self) -> Result<Value> {
		let at = self.cursor.pos();
		let record = Record::from_word(self.cursor.read_word()?);

		let Some(tag) = record.known_tag() else {
			if record.is_double() {
				return Ok(Value::Float64(record.as_double()));
			}
			if record.is_legacy_typed_array() {
				return Err(CloneError::NotImplemented { what: "legacy typed array" });
			}
			return Err(CloneError::UnsupportedTag { tag: record.tag, at });
		};

		let value = match tag {
			Tag::Null => Value::Null,
			Tag::Undefined => Value::Undefined,
			Tag::Int32 => Value::Int32(record.data as i32),
			Tag::Boolean => Value::Bool(record.data != 0),
			Tag::BooleanObject => self.register(HeapObject::Boolean(record.data != 0)),
			Tag::String => Value::String(self.read_string(record.data)?),
			Tag::StringObject => {
				let text = self.read_string(record.data)?;
				self.register(HeapObject::String(text))
			}
			Tag::NumberObject => {
				let number = self.cursor.read_double()?;
				self.register(HeapObject::Number(number))
			}
			Tag::BigInt | Tag::BigIntObject => return Err(CloneError::NotImplemented { what: "BigInt" }),
			Tag::DateObject => {
				let time = self.cursor.read_double()?;
				self.register(HeapObject::Date(DateObject { time }))
			}
			Tag::RegExpObject => {
				let source = Record::from_word(self.cursor.read_word()?);
				if source.tag != Tag::String.raw() {
					return Err(CloneError::RegExpWithoutSource { tag: source.tag });
				}
				let source = self.read_string(source.data)?;
				self.register(HeapObject::RegExp(RegExpObject {
					source,
					flags: RegExpFlags(record.data),
				}))
			}
			Tag::ArrayObject => self.open_container(HeapObject::Array(ArrayObject::new()), Container::Array)?,
			Tag::ObjectObject => self.open_container(HeapObject::Object(PlainObject::new()), Container::Object)?,
			Tag::MapObject => self.open_container(HeapObject::Map(MapObject::new()), Container::Map)?,
			Tag::SetObject => self.open_container(HeapObject::Set(SetObject), Container::Set)?,
			Tag::BackReferenceObject => {
				if record.data as usize >= self.heap.len() {
					return Err(CloneError::BadBackReference {
						index: record.data,
						len: self.heap.len(),
					});
				}
				Value::Ref(ObjectId::new(record.data))
			}
			Tag::ArrayBufferObject => return Err(CloneError::NotImplemented { what: "ArrayBuffer" }),
			Tag::SharedArrayBufferObject => return Err(CloneError::NotImplemented { what: "SharedArrayBuffer" }),
			Tag::SharedWasmMemoryObject => return Err(CloneError::NotImplemented { what: "shared wasm memory" }),
			Tag::TypedArrayObject => return Err(CloneError::NotImplemented { what: "typed array" }),
			Tag::DataViewObject => return Err(CloneError::NotImplemented { what: "DataView" }),
			Tag::SavedFrameObject => return Err(CloneError::NotImplemented { what: "SavedFrame" }),
			Tag::Header
			| Tag::EndOfKeys
			| Tag::JsPrincipals
			| Tag::NullJsPrincipals
			| Tag::ReconstructedSavedFramePrincipalsIsSystem
			| Tag::ReconstructedSavedFramePrincipalsIsNotSystem
			| Tag::TransferMapHeader
			| Tag::TransferMapPendingEntry
			| Tag::TransferMapArrayBuffer
			| Tag::TransferMapStoredArrayBuffer => return Err(CloneError::UnsupportedTag { tag: record.tag, at }),
		};
		Ok(value)
	}

	/// Decode a string payload: low 31 bits are the character count, the high bit marks Latin-1.
	fn read_string(&mut self, info: u32) -> Result<String> {
		let count = (info & 0x7FFF_FFFF) as usize;
		if info & 0x8000_0000 != 0 {
			let bytes = self.cursor.read_padded(count)?;
			return Ok(bytes.iter().map(|byte| char::from(*byte)).collect());
		}

		let bytes = self.cursor.read_padded(count * 2)?;
		let units = bytes.chunks_exact(2).map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
		Ok(char::decode_utf16(units).map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER)).collect())
	}
}
