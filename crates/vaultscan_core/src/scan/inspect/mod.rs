use std::collections::HashSet;
use std::fmt::Write as _;

use crate::sclone::{Decoded, Heap, HeapObject, ObjectId, PropertyKey, RenderOptions, Value, value_to_json};

/// Kind of vault evidence recognised in a decoded graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
	/// Object carrying a `vault` property.
	VaultProperty,
	/// Object carrying both `data` and `salt` properties.
	VaultObject,
	/// String mentioning quoted `data` and `salt` keys.
	VaultString,
}

impl FindingKind {
	/// Human headline printed above a finding.
	pub fn headline(self) -> &'static str {
		match self {
			Self::VaultProperty => "Maybe found a Metamask vault:",
			Self::VaultObject => "Found a Metamask vault:",
			Self::VaultString => "Probably found a Metamask vault:",
		}
	}
}

/// One piece of evidence with its location inside the decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
	/// Evidence kind.
	pub kind: FindingKind,
	/// JSONPath-like location, rooted at `$`.
	pub path: String,
	/// Printable payload: raw string or rendered JSON.
	pub payload: String,
}

/// Search a decoded graph for vault evidence.
///
/// Objects, arrays, and map keys/values are traversed depth first in insertion order.
/// Each heap object is inspected once, so shared and cyclic graphs terminate.
pub fn inspect(decoded: &Decoded) -> Vec<Finding> {
	let heap = &decoded.heap;
	let mut findings = Vec::new();
	let mut visited: HashSet<ObjectId> = HashSet::new();
	let mut stack: Vec<(&Value, String)> = vec![(&decoded.root, "$".to_owned())];

	while let Some((value, path)) = stack.pop() {
		let id = match value {
			Value::String(text) => {
				check_string(text, &path, &mut findings);
				continue;
			}
			Value::Ref(id) => *id,
			_ => continue,
		};
		if !visited.insert(id) {
			continue;
		}

		let mut children: Vec<(&Value, String)> = Vec::new();
		match heap.get(id) {
			Some(HeapObject::String(text)) => check_string(text, &path, &mut findings),
			Some(HeapObject::Object(object)) => {
				if let Some(vault) = object.get("vault") {
					findings.push(Finding {
						kind: FindingKind::VaultProperty,
						path: path.clone(),
						payload: property_payload(vault, heap),
					});
				}
				if object.contains("data") && object.contains("salt") {
					findings.push(Finding {
						kind: FindingKind::VaultObject,
						path: path.clone(),
						payload: render(value, heap),
					});
				}
				for (key, child) in object.iter() {
					children.push((child, child_path(&path, key)));
				}
			}
			Some(HeapObject::Array(array)) => {
				for (index, child) in array.iter() {
					children.push((child, format!("{path}[{index}]")));
				}
			}
			Some(HeapObject::Map(map)) => {
				for (entry, (key, child)) in map.iter().enumerate() {
					children.push((key, format!("{path}[#{entry}].key")));
					children.push((child, format!("{path}[#{entry}].value")));
				}
			}
			_ => {}
		}

		stack.extend(children.into_iter().rev());
	}

	findings
}

fn check_string(text: &str, path: &str, findings: &mut Vec<Finding>) {
	if looks_like_vault(text) {
		findings.push(Finding {
			kind: FindingKind::VaultString,
			path: path.to_owned(),
			payload: text.to_owned(),
		});
	}
}

/// `true` when `text` mentions quoted `data` and `salt` keys.
pub fn looks_like_vault(text: &str) -> bool {
	let quoted = |key: &str| text.contains(&format!("\"{key}\"")) || text.contains(&format!("'{key}'"));
	quoted("data") && quoted("salt")
}

fn property_payload(value: &Value, heap: &Heap) -> String {
	match value {
		Value::String(text) => text.clone(),
		Value::Ref(id) => match heap.get(*id) {
			Some(HeapObject::String(text)) => text.clone(),
			_ => render(value, heap),
		},
		_ => render(value, heap),
	}
}

fn render(value: &Value, heap: &Heap) -> String {
	value_to_json(value, heap, RenderOptions::default()).to_string()
}

fn child_path(parent: &str, key: &PropertyKey) -> String {
	let mut out = parent.to_owned();
	match key {
		PropertyKey::Index(index) => {
			let _ = write!(out, "[{index}]");
		}
		PropertyKey::Name(name) if is_identifier(name) => {
			let _ = write!(out, ".{name}");
		}
		PropertyKey::Name(name) => {
			let _ = write!(out, "[{}]", serde_json::Value::String(name.clone()));
		}
	}
	out
}

fn is_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests;
