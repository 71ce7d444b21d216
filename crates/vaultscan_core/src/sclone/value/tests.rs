use std::collections::HashSet;

use crate::sclone::{ArrayObject, DateObject, Element, Heap, HeapObject, MapObject, ObjectId, PlainObject, PropertyKey, RegExpFlags, Value};

#[test]
fn numbers_compare_by_same_value_zero() {
	assert_eq!(Value::Int32(1), Value::Float64(1.0));
	assert_eq!(Value::Float64(0.0), Value::Float64(-0.0));
	assert_eq!(Value::Float64(f64::NAN), Value::Float64(f64::NAN));
	assert_ne!(Value::Int32(1), Value::String("1".into()));
	assert_ne!(Value::Null, Value::Undefined);
}

#[test]
fn equal_values_hash_alike() {
	let mut seen = HashSet::new();
	assert!(seen.insert(Value::Int32(7)));
	assert!(!seen.insert(Value::Float64(7.0)));
	assert!(seen.insert(Value::Float64(-0.0)));
	assert!(!seen.insert(Value::Int32(0)));
	assert!(seen.insert(Value::Ref(ObjectId::new(2))));
	assert!(!seen.insert(Value::Ref(ObjectId::new(2))));
	assert!(seen.insert(Value::Ref(ObjectId::new(3))));
}

#[test]
fn map_keys_by_identity_for_objects() {
	let mut map = MapObject::new();
	map.insert(Value::Ref(ObjectId::new(1)), Value::Int32(1));
	map.insert(Value::Ref(ObjectId::new(1)), Value::Int32(2));
	map.insert(Value::Ref(ObjectId::new(4)), Value::Int32(3));
	assert_eq!(map.len(), 2);
	assert_eq!(map.get(&Value::Ref(ObjectId::new(1))), Some(&Value::Int32(2)));
}

#[test]
fn array_fills_skipped_slots_with_holes() {
	let mut array = ArrayObject::new();
	array.set(3, Value::String("x".into()), 1024);
	assert_eq!(array.len(), 4);
	assert_eq!(array.elements()[..3], [Element::Hole, Element::Hole, Element::Hole]);
	assert!(array.is_hole(0));
	assert!(!array.is_hole(3));
	assert!(!array.is_hole(4), "past the end is not a hole");

	array.set(1, Value::Undefined, 1024);
	assert_eq!(array.get(1), Some(&Value::Undefined));
	assert!(!array.is_hole(1));
}

#[test]
fn far_index_goes_to_sparse_overlay() {
	let mut array = ArrayObject::new();
	array.set(0, Value::Int32(0), 4);
	array.set(1_000_000, Value::Int32(1), 4);
	assert_eq!(array.elements().len(), 1);
	assert_eq!(array.len(), 1_000_001);
	assert_eq!(array.get(1_000_000), Some(&Value::Int32(1)));
	assert!(array.is_hole(500));
}

#[test]
fn sparse_entries_migrate_when_dense_part_reaches_them() {
	let mut array = ArrayObject::new();
	array.set(6, Value::Int32(6), 3);
	assert!(array.elements().is_empty());

	array.set(0, Value::Int32(0), 3);
	array.set(3, Value::Int32(3), 3);
	array.set(5, Value::Int32(5), 3);
	assert!(array.sparse().is_empty());
	assert_eq!(array.elements().len(), 7);
	let assigned: Vec<u32> = array.iter().map(|(index, _)| index).collect();
	assert_eq!(assigned, vec![0, 3, 5, 6]);
}

#[test]
fn dense_write_replaces_earlier_sparse_entry() {
	let mut array = ArrayObject::new();
	array.set(5, Value::String("old".into()), 3);
	array.set(1, Value::Int32(1), 3);
	array.set(3, Value::Int32(3), 3);
	array.set(5, Value::String("new".into()), 3);

	assert_eq!(array.get(5).and_then(Value::as_str), Some("new"));
	assert!(array.sparse().is_empty());
	assert_eq!(array.elements().len(), 6);

	// Holes 0, 2 and 4 use the whole budget, so the next gap spills.
	array.set(7, Value::Int32(7), 3);
	assert_eq!(array.elements().len(), 6);
	assert_eq!(array.sparse().keys().copied().collect::<Vec<_>>(), vec![7]);
}

#[test]
fn heap_mutation_is_shared_by_every_reference() {
	let mut heap = Heap::new();
	let id = heap.alloc(HeapObject::Object(PlainObject::new()));
	let left = Value::Ref(id);
	let right = Value::Ref(id);

	if let Some(HeapObject::Object(object)) = heap.get_mut(left.as_ref_id().expect("ref")) {
		object.insert(PropertyKey::Name("seen".into()), Value::Bool(true));
	}
	let Some(HeapObject::Object(object)) = heap.get(right.as_ref_id().expect("ref")) else {
		panic!("expected object");
	};
	assert_eq!(object.get("seen"), Some(&Value::Bool(true)));
}

#[test]
fn object_keeps_insertion_order() {
	let mut object = PlainObject::new();
	object.insert(PropertyKey::Name("b".into()), Value::Null);
	object.insert(PropertyKey::Index(0), Value::Null);
	object.insert(PropertyKey::Name("a".into()), Value::Null);
	let keys: Vec<String> = object.iter().map(|(key, _)| key.to_string()).collect();
	assert_eq!(keys, vec!["b", "0", "a"]);
}

#[test]
fn date_reads_epoch_seconds() {
	let date = DateObject { time: 86_400.5 };
	let utc = date.utc().expect("representable");
	assert_eq!(utc.to_rfc3339(), "1970-01-02T00:00:00.500+00:00");
	assert_eq!(DateObject { time: f64::NAN }.utc(), None);
	assert_eq!(DateObject { time: 1e300 }.utc(), None);
}

#[test]
fn regexp_flags_render_as_letters() {
	let flags = RegExpFlags(RegExpFlags::IGNORE_CASE | RegExpFlags::GLOBAL | RegExpFlags::UNICODE);
	assert_eq!(flags.to_string(), "giu");
	assert_eq!(RegExpFlags::default().to_string(), "");
}
