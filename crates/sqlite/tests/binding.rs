// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Binding rows of a real SQLite database.

use std::collections::HashMap;

use rowbind::{ConversionError, Error, Params, Record, Sqlite, SqliteConfig, params};
use rowbind_testing::temp_dir;

#[derive(Record, Debug, Clone, PartialEq)]
struct Pair {
	#[row(column = "c1")]
	c1: i64,
	#[row(column = "c2")]
	c2: String,
}

impl Pair {
	fn new(c1: i64, c2: &str) -> Self {
		Self {
			c1,
			c2: c2.to_string(),
		}
	}
}

#[derive(Record, Debug, PartialEq)]
struct Measurement {
	#[row(column = "id")]
	id: u32,
	#[row(column = "reading")]
	reading: f64,
	#[row(column = "label")]
	label: Option<String>,
	#[row(column = "raw")]
	raw: Vec<u8>,
	#[row(column = "valid")]
	valid: bool,
}

fn seeded() -> Sqlite {
	let db = Sqlite::in_memory().unwrap();
	rowbind::exec(&db, "CREATE TABLE t (c1 INTEGER NOT NULL, c2 TEXT NOT NULL)", ()).unwrap();
	rowbind::exec(&db, "INSERT INTO t (c1, c2) VALUES (?, ?), (?, ?)", params![1, "a", 2, "b"]).unwrap();
	db
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_insert_then_query() {
	let db = seeded();

	let mut pairs: Vec<Pair> = Vec::new();
	rowbind::query(&db, &mut pairs, "SELECT c1, c2 FROM t ORDER BY c1", ()).unwrap();

	assert_eq!(pairs, vec![Pair::new(1, "a"), Pair::new(2, "b")]);
}

#[test]
fn test_cursor_order_is_preserved() {
	let db = seeded();

	let mut pairs: Vec<Pair> = Vec::new();
	rowbind::query(&db, &mut pairs, "SELECT c2, c1 FROM t ORDER BY c1 DESC", ()).unwrap();

	assert_eq!(pairs, vec![Pair::new(2, "b"), Pair::new(1, "a")]);
}

#[test]
fn test_positional_and_named_params() {
	let db = seeded();

	let mut positional: Vec<Pair> = Vec::new();
	rowbind::query(&db, &mut positional, "SELECT c1, c2 FROM t WHERE c1 = ?", params![2]).unwrap();

	let mut named: Vec<Pair> = Vec::new();
	rowbind::query(&db, &mut named, "SELECT c1, c2 FROM t WHERE c2 = :name", params! { name: "b" }).unwrap();

	let mut prefixed: Vec<Pair> = Vec::new();
	rowbind::query(&db, &mut prefixed, "SELECT c1, c2 FROM t WHERE c2 = :name", params! { ":name": "b" }).unwrap();

	assert_eq!(positional, vec![Pair::new(2, "b")]);
	assert_eq!(named, positional);
	assert_eq!(prefixed, positional);
}

#[test]
fn test_unmapped_column_is_discarded() {
	let db = seeded();

	let mut pairs: Vec<Pair> = Vec::new();
	rowbind::query(&db, &mut pairs, "SELECT c1, 'ignored' AS c9 FROM t ORDER BY c1", ()).unwrap();

	assert_eq!(pairs, vec![Pair::new(1, ""), Pair::new(2, "")]);
}

#[test]
fn test_storage_classes() {
	let db = Sqlite::in_memory().unwrap();
	rowbind::exec(&db, "CREATE TABLE m (id INTEGER, reading REAL, label TEXT, raw BLOB, valid INTEGER)", ())
		.unwrap();
	rowbind::exec(
		&db,
		"INSERT INTO m VALUES (?, ?, ?, ?, ?), (?, ?, ?, ?, ?)",
		params![1, 20.5, "kitchen", vec![0xcau8, 0xfe], true, 2, 18, None::<String>, Vec::<u8>::new(), false],
	)
	.unwrap();

	let mut measurements: Vec<Measurement> = Vec::new();
	rowbind::query(&db, &mut measurements, "SELECT id, reading, label, raw, valid FROM m ORDER BY id", ()).unwrap();

	assert_eq!(
		measurements,
		vec![
			Measurement {
				id: 1,
				reading: 20.5,
				label: Some("kitchen".to_string()),
				raw: vec![0xca, 0xfe],
				valid: true,
			},
			Measurement {
				id: 2,
				reading: 18.0,
				label: None,
				raw: Vec::new(),
				valid: false,
			},
		]
	);
}

#[derive(Record, Debug, PartialEq)]
struct Raw {
	#[row(column = "b")]
	b: Vec<u8>,
}

#[derive(Record, Debug)]
struct Label {
	#[row(column = "b")]
	b: String,
}

#[test]
fn test_invalid_utf8_text_keeps_its_bytes() {
	let db = Sqlite::in_memory().unwrap();

	let mut raws: Vec<Raw> = Vec::new();
	rowbind::query(&db, &mut raws, "SELECT CAST(X'FF41' AS TEXT) AS b", ()).unwrap();
	assert_eq!(
		raws,
		vec![Raw {
			b: vec![0xff, 0x41]
		}]
	);

	let mut labels: Vec<Label> = Vec::new();
	let err = rowbind::query(&db, &mut labels, "SELECT CAST(X'FF41' AS TEXT) AS b", ()).unwrap_err();
	match err {
		Error::RowScanFailed {
			row,
			column,
			source,
		} => {
			assert_eq!(row, 0);
			assert_eq!(column.as_deref(), Some("b"));
			assert!(matches!(source.downcast_ref::<ConversionError>(), Some(ConversionError::TypeMismatch { .. })));
		}
		other => panic!("Expected RowScanFailed, got {other:?}"),
	}
	assert!(labels.is_empty());
}

#[test]
fn test_exec_reports_affected_rows() {
	let db = seeded();

	let affected = rowbind::exec(&db, "UPDATE t SET c2 = ?", params!["z"]).unwrap();
	assert_eq!(affected, 2);

	let affected = rowbind::exec(&db, "DELETE FROM t WHERE c1 = ?", params![99]).unwrap();
	assert_eq!(affected, 0);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_malformed_sql() {
	let db = seeded();

	let mut pairs = vec![Pair::new(0, "kept")];
	let err = rowbind::query(&db, &mut pairs, "SELEC c1, c2 FROM t", ()).unwrap_err();

	assert!(matches!(err, Error::QueryExecutionFailed(_)));
	assert_eq!(pairs, vec![Pair::new(0, "kept")]);
}

#[test]
fn test_parameter_count_mismatch() {
	let db = seeded();

	let mut pairs: Vec<Pair> = Vec::new();
	let err = rowbind::query(&db, &mut pairs, "SELECT c1, c2 FROM t WHERE c1 = ?", ()).unwrap_err();
	assert!(matches!(err, Error::QueryExecutionFailed(_)));

	let err = rowbind::query(&db, &mut pairs, "SELECT c1, c2 FROM t WHERE c2 = :name", params! { other: "b" })
		.unwrap_err();
	assert!(matches!(err, Error::QueryExecutionFailed(_)));
}

#[test]
fn test_named_parameter_without_value() {
	let db = seeded();

	let mut pairs: Vec<Pair> = Vec::new();
	let err = rowbind::query(&db, &mut pairs, "SELECT c1, c2 FROM t WHERE c2 = :name", Params::Named(HashMap::new()))
		.unwrap_err();

	assert!(matches!(err, Error::QueryExecutionFailed(_)));
	assert!(pairs.is_empty());
}

#[test]
fn test_duplicate_result_column() {
	let db = seeded();

	let mut pairs: Vec<Pair> = Vec::new();
	let err = rowbind::query(&db, &mut pairs, "SELECT c1, c2, c1 FROM t", ()).unwrap_err();

	match err {
		Error::DuplicateColumn {
			column,
		} => assert_eq!(column, "c1"),
		other => panic!("Expected DuplicateColumn, got {other:?}"),
	}
	assert!(pairs.is_empty());
}

#[test]
fn test_conversion_failure_keeps_earlier_rows() {
	let db = Sqlite::in_memory().unwrap();
	rowbind::exec(&db, "CREATE TABLE t (c1, c2)", ()).unwrap();
	rowbind::exec(&db, "INSERT INTO t VALUES (1, 'a'), ('oops', 'b'), (3, 'c')", ()).unwrap();

	let mut pairs: Vec<Pair> = Vec::new();
	let err = rowbind::query(&db, &mut pairs, "SELECT c1, c2 FROM t ORDER BY rowid", ()).unwrap_err();

	match err {
		Error::RowScanFailed {
			row,
			column,
			source,
		} => {
			assert_eq!(row, 1);
			assert_eq!(column.as_deref(), Some("c1"));
			assert!(matches!(source.downcast_ref::<ConversionError>(), Some(ConversionError::TypeMismatch { .. })));
		}
		other => panic!("Expected RowScanFailed, got {other:?}"),
	}
	assert_eq!(pairs, vec![Pair::new(1, "a")]);
}

// ============================================================================
// Transactions
// ============================================================================

#[test]
fn test_transaction_binds_like_connection() {
	let mut db = seeded();

	let mut from_connection: Vec<Pair> = Vec::new();
	rowbind::query(&db, &mut from_connection, "SELECT c1, c2 FROM t ORDER BY c1", ()).unwrap();

	let tx = db.transaction().unwrap();
	let mut from_transaction: Vec<Pair> = Vec::new();
	rowbind::query(&tx, &mut from_transaction, "SELECT c1, c2 FROM t ORDER BY c1", ()).unwrap();
	tx.commit().unwrap();

	assert_eq!(from_connection, from_transaction);
}

#[test]
fn test_transaction_commit_and_rollback() {
	let mut db = seeded();

	let tx = db.transaction().unwrap();
	rowbind::exec(&tx, "INSERT INTO t VALUES (?, ?)", params![3, "c"]).unwrap();
	tx.rollback().unwrap();

	let tx = db.transaction().unwrap();
	rowbind::exec(&tx, "INSERT INTO t VALUES (?, ?)", params![4, "d"]).unwrap();
	let mut inside: Vec<Pair> = Vec::new();
	rowbind::query(&tx, &mut inside, "SELECT c1, c2 FROM t WHERE c1 > 2", ()).unwrap();
	tx.commit().unwrap();

	let mut after: Vec<Pair> = Vec::new();
	rowbind::query(&db, &mut after, "SELECT c1, c2 FROM t WHERE c1 > 2", ()).unwrap();

	assert_eq!(inside, vec![Pair::new(4, "d")]);
	assert_eq!(after, inside);
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn test_file_database_survives_reconnect() {
	temp_dir(|path| {
		let config = SqliteConfig::new(path.join("pairs.db"));

		{
			let db = Sqlite::open(&config).unwrap();
			rowbind::exec(&db, "CREATE TABLE t (c1 INTEGER, c2 TEXT)", ()).unwrap();
			rowbind::exec(&db, "INSERT INTO t VALUES (?, ?)", params![10, "ten"]).unwrap();
		}

		let db = Sqlite::open(&config).unwrap();
		let mut pairs: Vec<Pair> = Vec::new();
		rowbind::query(&db, &mut pairs, "SELECT c1, c2 FROM t", ()).unwrap();

		assert_eq!(pairs, vec![Pair::new(10, "ten")]);
		Ok(())
	})
	.expect("test failed");
}
