#![allow(missing_docs)]

use vaultscan::scan::{FindingKind, ScanError, ScanOptions, discover, scan_file};
use vaultscan_testkit::{StoreRow, StreamBuilder, scratch_dir, write_object_store, write_unrelated_store};

fn vault_object_row() -> StoreRow {
	StoreRow::Clone(
		StreamBuilder::persisted()
			.object()
			.str_prop("data", "ct")
			.str_prop("iv", "nonce")
			.str_prop("salt", "s1")
			.end()
			.finish(),
	)
}

#[test]
fn discovers_and_scans_a_profile_tree() {
	let root = scratch_dir("scan-profile-tree");
	let idb = root.join("storage").join("default").join("moz-extension+++abc").join("idb");
	std::fs::create_dir_all(&idb).expect("profile dirs are created");
	write_object_store(&idb.join("3647222921wleabcEoxlt-eengsairo.sqlite"), &[vault_object_row(), StoreRow::Null]);
	write_unrelated_store(&root.join("places.sqlite"));
	std::fs::write(root.join("prefs.js"), "user_pref();").expect("writes");

	let opt = ScanOptions::default();
	let files = discover(&root, &opt).expect("discovery succeeds");
	assert_eq!(files.len(), 2);
	assert!(files.iter().all(|path| path.extension().is_some_and(|ext| ext == "sqlite")));

	let reports: Vec<_> = files.iter().filter_map(|path| scan_file(path, &opt).expect("file scans")).collect();
	assert_eq!(reports.len(), 1, "only the object store database reports");

	let report = &reports[0];
	assert_eq!(report.rows, 2);
	assert_eq!(report.failures, 1);
	assert_eq!(report.findings.len(), 1);
	assert_eq!(report.findings[0].kind, FindingKind::VaultObject);
	assert_eq!(report.findings[0].path, "$");
}

#[test]
fn custom_table_and_extension_are_honoured() {
	let root = scratch_dir("scan-custom-options");
	write_object_store(&root.join("store.db"), &[vault_object_row()]);

	let opt = ScanOptions {
		extension: "db".to_owned(),
		..ScanOptions::default()
	};
	let files = discover(&root, &opt).expect("discovery succeeds");
	assert_eq!(files, vec![root.join("store.db")]);

	let other_table = ScanOptions {
		table: "missing_table".to_owned(),
		..opt
	};
	assert!(scan_file(&files[0], &other_table).expect("file scans").is_none());
}

#[test]
fn oversized_rows_are_counted_as_failures() {
	let root = scratch_dir("scan-oversized-row");
	let path = root.join("idb.sqlite");
	write_object_store(&path, &[vault_object_row()]);

	let opt = ScanOptions {
		max_decompressed_bytes: 16,
		..ScanOptions::default()
	};
	let report = scan_file(&path, &opt).expect("file scans").expect("has table");
	assert_eq!(report.failures, 1);
	assert!(report.findings.is_empty());
}

#[test]
fn missing_root_is_an_error() {
	let root = scratch_dir("scan-missing-root").join("absent");
	let err = discover(&root, &ScanOptions::default()).expect_err("root is missing");
	assert!(matches!(err, ScanError::NotFound { .. }));
}
