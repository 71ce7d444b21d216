use serde_json::{Map as JsonMap, Number, Value as JsonValue};

use crate::sclone::value::{Decoded, Element, Heap, HeapObject, ObjectId, Value};

/// Placeholder for a reference back into the current render path.
pub const CIRCULAR: &str = "[Circular]";
/// Placeholder for output cut off by [`RenderOptions`] limits.
pub const TRUNCATED: &str = "[Truncated]";

/// Limits for JSON rendering of decoded graphs.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
	/// Maximum nesting depth rendered.
	pub max_depth: u32,
	/// Maximum number of heap objects expanded per render call.
	pub max_objects: usize,
	/// Arrays are filled out to at most this many slots; later sparse entries become one placeholder.
	pub max_array_len: usize,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			max_objects: 65_536,
			max_array_len: 65_536,
		}
	}
}

/// Render a decoded graph from its root.
pub fn to_json(decoded: &Decoded) -> JsonValue {
	value_to_json(&decoded.root, &decoded.heap, RenderOptions::default())
}

/// Render one value, resolving references through `heap`.
pub fn value_to_json(value: &Value, heap: &Heap, options: RenderOptions) -> JsonValue {
	let mut renderer = Renderer {
		heap,
		options,
		active: Vec::new(),
		expanded: 0,
	};
	renderer.render(value)
}

struct Renderer<'a> {
	heap: &'a Heap,
	options: RenderOptions,
	active: Vec<ObjectId>,
	expanded: usize,
}

impl Renderer<'_> {
	fn render(&mut self, value: &Value) -> JsonValue {
		match value {
			Value::Null | Value::Undefined => JsonValue::Null,
			Value::Bool(flag) => JsonValue::Bool(*flag),
			Value::Int32(number) => JsonValue::from(*number),
			Value::Float64(number) => number_json(*number),
			Value::String(text) => JsonValue::String(text.clone()),
			Value::Ref(id) => self.render_object(*id),
		}
	}

	fn render_object(&mut self, id: ObjectId) -> JsonValue {
		if self.active.contains(&id) {
			return JsonValue::String(CIRCULAR.to_owned());
		}
		let heap = self.heap;
		let Some(object) = heap.get(id) else {
			return JsonValue::Null;
		};
		if object.is_container() {
			if self.active.len() as u32 >= self.options.max_depth || self.expanded >= self.options.max_objects {
				return JsonValue::String(TRUNCATED.to_owned());
			}
			self.expanded += 1;
		}

		self.active.push(id);
		let out = match object {
			HeapObject::Boolean(flag) => JsonValue::Bool(*flag),
			HeapObject::Number(number) => number_json(*number),
			HeapObject::String(text) => JsonValue::String(text.clone()),
			HeapObject::Date(date) => match date.utc() {
				Some(utc) => JsonValue::String(utc.to_rfc3339()),
				None => number_json(date.time),
			},
			HeapObject::RegExp(regexp) => JsonValue::String(format!("/{}/{}", regexp.source, regexp.flags)),
			HeapObject::Array(array) => {
				let mut items: Vec<JsonValue> = array
					.elements()
					.iter()
					.map(|slot| match slot {
						Element::Hole => JsonValue::Null,
						Element::Value(item) => self.render(item),
					})
					.collect();
				// Sparse entries land at their index; the gaps render like holes.
				for (index, item) in array.sparse() {
					let slot = *index as usize;
					if slot >= self.options.max_array_len {
						items.push(JsonValue::String(TRUNCATED.to_owned()));
						break;
					}
					items.resize(slot, JsonValue::Null);
					items.push(self.render(item));
				}
				JsonValue::Array(items)
			}
			HeapObject::Object(object) => {
				let mut out = JsonMap::new();
				for (key, item) in object.iter() {
					out.insert(key.to_string(), self.render(item));
				}
				JsonValue::Object(out)
			}
			HeapObject::Map(map) => JsonValue::Array(
				map.iter()
					.map(|(key, item)| JsonValue::Array(vec![self.render(key), self.render(item)]))
					.collect(),
			),
			HeapObject::Set(_) => JsonValue::Array(Vec::new()),
		};
		self.active.pop();
		out
	}
}

fn number_json(number: f64) -> JsonValue {
	Number::from_f64(number).map_or(JsonValue::Null, JsonValue::Number)
}
