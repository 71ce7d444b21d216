use vaultscan_testkit::{StoreRow, StreamBuilder, scratch_dir, write_object_store, write_unrelated_store};

use crate::scan::{FindingKind, ScanError, ScanOptions, scan_file, scan_payload};

fn vault_row(salt: &str) -> StoreRow {
	StoreRow::Clone(
		StreamBuilder::persisted()
			.object()
			.string("vault")
			.object()
			.str_prop("data", "ct")
			.str_prop("salt", salt)
			.end()
			.end()
			.finish(),
	)
}

#[test]
fn counts_failures_and_keeps_row_order() {
	let dir = scratch_dir("file-counts-failures");
	let path = dir.join("idb.sqlite");
	write_object_store(
		&path,
		&[
			vault_row("first"),
			StoreRow::Raw(vec![0x05, 0xFF, 0xFF]),
			StoreRow::Null,
			StoreRow::Clone(StreamBuilder::with_scope(1).null().finish()),
			vault_row("second"),
		],
	);

	let report = scan_file(&path, &ScanOptions::default()).expect("scans").expect("has table");
	assert_eq!(report.rows, 5);
	assert_eq!(report.failures, 3);
	let kinds: Vec<FindingKind> = report.findings.iter().map(|finding| finding.kind).collect();
	assert_eq!(
		kinds,
		vec![FindingKind::VaultProperty, FindingKind::VaultObject, FindingKind::VaultProperty, FindingKind::VaultObject]
	);
	assert!(report.findings[0].payload.contains("first"));
	assert!(report.findings[2].payload.contains("second"));
}

#[test]
fn file_without_object_store_is_none() {
	let dir = scratch_dir("file-without-store");
	let path = dir.join("places.sqlite");
	write_unrelated_store(&path);

	assert!(scan_file(&path, &ScanOptions::default()).expect("scans").is_none());
}

#[test]
fn payload_errors_are_typed() {
	let opt = ScanOptions::default();
	assert!(matches!(scan_payload(None, &opt), Err(ScanError::NullPayload)));

	let compressed = snap::raw::Encoder::new().compress_vec(&StreamBuilder::persisted().record(0xFFF1_0000, 0).finish()).expect("compresses");
	assert!(matches!(scan_payload(Some(&compressed), &opt), Err(ScanError::Decode(_))));
}
