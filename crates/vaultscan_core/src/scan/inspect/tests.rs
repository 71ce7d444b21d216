use vaultscan_testkit::StreamBuilder;

use crate::scan::{FindingKind, inspect, looks_like_vault};
use crate::sclone::decode;

fn kinds(bytes: &[u8]) -> Vec<(FindingKind, String)> {
	let decoded = decode(bytes).expect("stream decodes");
	inspect(&decoded).into_iter().map(|finding| (finding.kind, finding.path)).collect()
}

#[test]
fn vault_property_and_nested_object_are_both_reported() {
	let bytes = StreamBuilder::persisted()
		.object()
		.string("vault")
		.object()
		.str_prop("data", "ct")
		.str_prop("iv", "nonce")
		.str_prop("salt", "s1")
		.end()
		.end()
		.finish();

	let decoded = decode(&bytes).expect("stream decodes");
	let findings = inspect(&decoded);
	assert_eq!(findings.len(), 2);
	assert_eq!(findings[0].kind, FindingKind::VaultProperty);
	assert_eq!(findings[0].path, "$");
	assert_eq!(findings[0].payload, r#"{"data":"ct","iv":"nonce","salt":"s1"}"#);
	assert_eq!(findings[1].kind, FindingKind::VaultObject);
	assert_eq!(findings[1].path, "$.vault");
}

#[test]
fn string_vault_property_payload_is_raw() {
	let text = r#"{"data":"ct","iv":"nonce","salt":"s1"}"#;
	let bytes = StreamBuilder::persisted().object().str_prop("vault", text).end().finish();

	let decoded = decode(&bytes).expect("stream decodes");
	let findings = inspect(&decoded);
	assert_eq!(findings.len(), 2);
	assert_eq!(findings[0].kind, FindingKind::VaultProperty);
	assert_eq!(findings[0].payload, text);
	assert_eq!(findings[1].kind, FindingKind::VaultString);
	assert_eq!(findings[1].path, "$.vault");
	assert_eq!(findings[1].payload, text);
}

#[test]
fn strings_inside_arrays_and_maps_are_searched() {
	let bytes = StreamBuilder::persisted()
		.array()
		.int32(0)
		.string("nothing here")
		.int32(1)
		.map()
		.string("k")
		.string_object("{'data': 'x', 'salt': 'y'}")
		.end()
		.end()
		.finish();

	assert_eq!(kinds(&bytes), vec![(FindingKind::VaultString, "$[1][#0].value".to_owned())]);
}

#[test]
fn names_that_are_not_identifiers_are_bracketed() {
	let bytes = StreamBuilder::persisted()
		.object()
		.string("key ring")
		.object()
		.str_prop("data", "ct")
		.str_prop("salt", "s1")
		.end()
		.end()
		.finish();

	assert_eq!(kinds(&bytes), vec![(FindingKind::VaultObject, r#"$["key ring"]"#.to_owned())]);
}

#[test]
fn cycles_terminate_and_shared_objects_report_once() {
	let bytes = StreamBuilder::persisted()
		.object()
		.string("a")
		.object()
		.str_prop("data", "ct")
		.str_prop("salt", "s1")
		.string("self")
		.back_ref(0)
		.end()
		.string("b")
		.back_ref(1)
		.end()
		.finish();

	assert_eq!(kinds(&bytes), vec![(FindingKind::VaultObject, "$.a".to_owned())]);
}

#[test]
fn unquoted_mentions_are_not_vaults() {
	assert!(!looks_like_vault("data and salt"));
	assert!(!looks_like_vault(r#"{"data": 1}"#));
	assert!(looks_like_vault(r#"{"data": 1, 'salt': 2}"#));
}

#[test]
fn primitive_roots_yield_nothing_unless_vault_strings() {
	assert!(kinds(&StreamBuilder::persisted().int32(7).finish()).is_empty());
	let bytes = StreamBuilder::persisted().string(r#"{"data":"","salt":""}"#).finish();
	assert_eq!(kinds(&bytes), vec![(FindingKind::VaultString, "$".to_owned())]);
}
