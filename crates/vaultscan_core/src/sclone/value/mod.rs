use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// Position of a heap object in emission order.
///
/// This is also the index a back-reference record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
	/// Build an id from a raw table index.
	pub fn new(index: u32) -> Self {
		Self(index)
	}

	/// Raw table index.
	pub fn index(self) -> u32 {
		self.0
	}
}

impl fmt::Display for ObjectId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Inline value produced by the decoder.
///
/// Primitives live inline; everything that takes a back-reference slot lives in the
/// [`Heap`] and is held through [`Value::Ref`].
///
/// Equality and hashing follow SameValueZero: references compare by identity, `Int32` and
/// `Float64` compare numerically, `-0 == +0`, and NaN equals NaN. This is what makes a
/// `Value` usable as a [`MapObject`] key.
#[derive(Debug, Clone)]
pub enum Value {
	/// `null`.
	Null,
	/// `undefined`.
	Undefined,
	/// Primitive boolean.
	Bool(bool),
	/// Signed 32-bit integer.
	Int32(i32),
	/// Double-precision number.
	Float64(f64),
	/// Primitive string.
	String(String),
	/// Heap object, shared by identity.
	Ref(ObjectId),
}

impl Value {
	/// Borrow the string payload of a primitive string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(text) => Some(text),
			_ => None,
		}
	}

	/// Heap id for referenced objects.
	pub fn as_ref_id(&self) -> Option<ObjectId> {
		match self {
			Self::Ref(id) => Some(*id),
			_ => None,
		}
	}

	/// Short label of the value kind.
	pub fn kind_label(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Undefined => "undefined",
			Self::Bool(_) => "boolean",
			Self::Int32(_) => "int32",
			Self::Float64(_) => "float64",
			Self::String(_) => "string",
			Self::Ref(_) => "object",
		}
	}

	fn number_bits(&self) -> Option<u64> {
		let number = match self {
			Self::Int32(value) => f64::from(*value),
			Self::Float64(value) => *value,
			_ => return None,
		};
		Some(if number.is_nan() {
			f64::NAN.to_bits()
		} else if number == 0.0 {
			0.0_f64.to_bits()
		} else {
			number.to_bits()
		})
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		if let (Some(left), Some(right)) = (self.number_bits(), other.number_bits()) {
			return left == right;
		}
		match (self, other) {
			(Self::Null, Self::Null) | (Self::Undefined, Self::Undefined) => true,
			(Self::Bool(left), Self::Bool(right)) => left == right,
			(Self::String(left), Self::String(right)) => left == right,
			(Self::Ref(left), Self::Ref(right)) => left == right,
			_ => false,
		}
	}
}

impl Eq for Value {}

impl Hash for Value {
	fn hash<H: Hasher>(&self, state: &mut H) {
		if let Some(bits) = self.number_bits() {
			state.write_u8(3);
			state.write_u64(bits);
			return;
		}
		match self {
			Self::Null => state.write_u8(0),
			Self::Undefined => state.write_u8(1),
			Self::Bool(value) => {
				state.write_u8(2);
				value.hash(state);
			}
			Self::String(text) => {
				state.write_u8(4);
				text.hash(state);
			}
			Self::Ref(id) => {
				state.write_u8(5);
				id.hash(state);
			}
			Self::Int32(_) | Self::Float64(_) => {}
		}
	}
}

/// Property key of a plain object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
	/// Integer-like key.
	Index(u32),
	/// String key.
	Name(String),
}

impl fmt::Display for PropertyKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Index(index) => write!(f, "{index}"),
			Self::Name(name) => f.write_str(name),
		}
	}
}

/// Dense array slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
	/// Slot skipped by the stream; distinct from `undefined` and `null`.
	Hole,
	/// Assigned slot.
	Value(Value),
}

/// Array with dense storage and a sparse overlay for far-away indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayObject {
	dense: Vec<Element>,
	holes: usize,
	sparse: BTreeMap<u32, Value>,
}

impl ArrayObject {
	/// Create an empty array.
	pub fn new() -> Self {
		Self::default()
	}

	/// Array length: one past the highest assigned index.
	pub fn len(&self) -> usize {
		match self.sparse.last_key_value() {
			Some((index, _)) => self.dense.len().max(*index as usize + 1),
			None => self.dense.len(),
		}
	}

	/// `true` when nothing was ever assigned.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Dense slots from index 0, holes included.
	pub fn elements(&self) -> &[Element] {
		&self.dense
	}

	/// Entries stored past the dense part.
	pub fn sparse(&self) -> &BTreeMap<u32, Value> {
		&self.sparse
	}

	/// Assigned value at `index`; `None` for holes and unassigned indices.
	pub fn get(&self, index: u32) -> Option<&Value> {
		match self.dense.get(index as usize) {
			Some(Element::Value(value)) => Some(value),
			Some(Element::Hole) => None,
			None => self.sparse.get(&index),
		}
	}

	/// `true` when `index` is inside the array but was never assigned.
	pub fn is_hole(&self, index: u32) -> bool {
		(index as usize) < self.len() && self.get(index).is_none()
	}

	/// Assigned entries in index order.
	pub fn iter(&self) -> impl Iterator<Item = (u32, &Value)> {
		let dense = self.dense.iter().enumerate().filter_map(|(index, slot)| match slot {
			Element::Value(value) => Some((index as u32, value)),
			Element::Hole => None,
		});
		dense.chain(self.sparse.iter().map(|(index, value)| (*index, value)))
	}

	/// Assign `value` at `index`, filling skipped slots with holes.
	///
	/// Once the array holds `max_holes` holes, further gaps go to the sparse overlay
	/// instead of dense storage.
	pub fn set(&mut self, index: u32, value: Value, max_holes: usize) {
		let slot = index as usize;
		if slot < self.dense.len() {
			if matches!(self.dense[slot], Element::Hole) {
				self.holes -= 1;
			}
			self.dense[slot] = Element::Value(value);
			return;
		}

		let gap = slot - self.dense.len();
		if self.holes.saturating_add(gap) > max_holes {
			self.sparse.insert(index, value);
			return;
		}

		self.sparse.remove(&index);
		self.dense.resize(slot, Element::Hole);
		self.holes += gap;
		self.dense.push(Element::Value(value));
		self.absorb_sparse();
	}

	fn absorb_sparse(&mut self) {
		while let Some(entry) = self.sparse.first_entry() {
			let slot = *entry.key() as usize;
			if slot < self.dense.len() {
				if matches!(self.dense[slot], Element::Hole) {
					self.holes -= 1;
				}
				self.dense[slot] = Element::Value(entry.remove());
			} else if slot == self.dense.len() {
				self.dense.push(Element::Value(entry.remove()));
			} else {
				break;
			}
		}
	}
}

/// Plain object with insertion-ordered properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlainObject {
	properties: IndexMap<PropertyKey, Value>,
}

impl PlainObject {
	/// Create an empty object.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set a property, keeping the original position of an existing key.
	pub fn insert(&mut self, key: PropertyKey, value: Value) {
		self.properties.insert(key, value);
	}

	/// Look up a string-keyed property.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.properties.get(&PropertyKey::Name(name.to_owned()))
	}

	/// Look up a property by key.
	pub fn get_key(&self, key: &PropertyKey) -> Option<&Value> {
		self.properties.get(key)
	}

	/// `true` when a string-keyed property exists.
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Number of properties.
	pub fn len(&self) -> usize {
		self.properties.len()
	}

	/// `true` when the object has no properties.
	pub fn is_empty(&self) -> bool {
		self.properties.is_empty()
	}

	/// Properties in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&PropertyKey, &Value)> {
		self.properties.iter()
	}
}

/// `Map` with arbitrary keys, compared by SameValueZero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapObject {
	entries: IndexMap<Value, Value>,
}

impl MapObject {
	/// Create an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or replace an entry.
	pub fn insert(&mut self, key: Value, value: Value) {
		self.entries.insert(key, value);
	}

	/// Look up an entry.
	pub fn get(&self, key: &Value) -> Option<&Value> {
		self.entries.get(key)
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// `true` when the map has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
		self.entries.iter()
	}
}

/// `Set` placeholder; members are not decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetObject;

/// `Date` object holding the raw stored time value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateObject {
	/// Stored time value.
	pub time: f64,
}

impl DateObject {
	/// Interpret the time value as UTC epoch seconds.
	pub fn utc(&self) -> Option<DateTime<Utc>> {
		if !self.time.is_finite() {
			return None;
		}
		let secs = self.time.floor();
		if secs < i64::MIN as f64 || secs >= i64::MAX as f64 {
			return None;
		}
		let nanos = (((self.time - secs) * 1e9) as u32).min(999_999_999);
		DateTime::from_timestamp(secs as i64, nanos)
	}
}

/// `RegExp` flag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RegExpFlags(pub u32);

impl RegExpFlags {
	/// `i`.
	pub const IGNORE_CASE: u32 = 0b0001;
	/// `g`.
	pub const GLOBAL: u32 = 0b0010;
	/// `m`.
	pub const MULTILINE: u32 = 0b0100;
	/// `u`.
	pub const UNICODE: u32 = 0b1000;

	/// `true` when every bit of `flag` is set.
	pub fn contains(self, flag: u32) -> bool {
		self.0 & flag == flag
	}
}

impl fmt::Display for RegExpFlags {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (flag, letter) in [(Self::GLOBAL, 'g'), (Self::IGNORE_CASE, 'i'), (Self::MULTILINE, 'm'), (Self::UNICODE, 'u')] {
			if self.contains(flag) {
				write!(f, "{letter}")?;
			}
		}
		Ok(())
	}
}

/// `RegExp` object.
#[derive(Debug, Clone, PartialEq)]
pub struct RegExpObject {
	/// Pattern source text.
	pub source: String,
	/// Flag bits.
	pub flags: RegExpFlags,
}

/// Object occupying a back-reference slot.
#[derive(Debug, Clone, PartialEq)]
pub enum HeapObject {
	/// Boxed boolean.
	Boolean(bool),
	/// Boxed number.
	Number(f64),
	/// Boxed string.
	String(String),
	/// `Date`.
	Date(DateObject),
	/// `RegExp`.
	RegExp(RegExpObject),
	/// Array container.
	Array(ArrayObject),
	/// Plain object container.
	Object(PlainObject),
	/// `Map` container.
	Map(MapObject),
	/// `Set` container.
	Set(SetObject),
}

impl HeapObject {
	/// Short label of the object kind.
	pub fn kind_label(&self) -> &'static str {
		match self {
			Self::Boolean(_) => "Boolean",
			Self::Number(_) => "Number",
			Self::String(_) => "String",
			Self::Date(_) => "Date",
			Self::RegExp(_) => "RegExp",
			Self::Array(_) => "Array",
			Self::Object(_) => "Object",
			Self::Map(_) => "Map",
			Self::Set(_) => "Set",
		}
	}

	/// `true` for array, object, map, and set.
	pub fn is_container(&self) -> bool {
		matches!(self, Self::Array(_) | Self::Object(_) | Self::Map(_) | Self::Set(_))
	}
}

/// Arena of heap objects in emission order; doubles as the back-reference table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Heap {
	objects: Vec<HeapObject>,
}

impl Heap {
	/// Create an empty heap.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append an object and return its id.
	pub fn alloc(&mut self, object: HeapObject) -> ObjectId {
		let id = ObjectId(self.objects.len() as u32);
		self.objects.push(object);
		id
	}

	/// Borrow an object.
	pub fn get(&self, id: ObjectId) -> Option<&HeapObject> {
		self.objects.get(id.0 as usize)
	}

	/// Mutably borrow an object; changes are visible through every reference to it.
	pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut HeapObject> {
		self.objects.get_mut(id.0 as usize)
	}

	/// Number of registered objects.
	pub fn len(&self) -> usize {
		self.objects.len()
	}

	/// `true` when nothing was registered.
	pub fn is_empty(&self) -> bool {
		self.objects.is_empty()
	}

	/// Objects with their ids in emission order.
	pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &HeapObject)> {
		self.objects.iter().enumerate().map(|(index, object)| (ObjectId(index as u32), object))
	}
}

/// Result of decoding one stream: the root value and every object it can reach.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
	/// First value read from the stream.
	pub root: Value,
	/// Back-reference table, fully populated.
	pub heap: Heap,
}

impl Decoded {
	/// Resolve a value to its heap object, if it is a reference.
	pub fn resolve(&self, value: &Value) -> Option<&HeapObject> {
		value.as_ref_id().and_then(|id| self.heap.get(id))
	}

	/// Heap object behind the root value.
	pub fn root_object(&self) -> Option<&HeapObject> {
		self.resolve(&self.root)
	}
}

#[cfg(test)]
mod tests;
