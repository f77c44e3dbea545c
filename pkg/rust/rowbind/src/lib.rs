// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Bind SQL result rows into tagged records.
//!
//! ```ignore
//! use rowbind::{Record, Sqlite, params};
//!
//! #[derive(Record)]
//! struct User {
//! 	#[row(column = "id")]
//! 	id: i64,
//! 	#[row(column = "name")]
//! 	name: String,
//! }
//!
//! let db = Sqlite::in_memory()?;
//! let mut users: Vec<User> = Vec::new();
//! rowbind::query(&db, &mut users, "SELECT id, name FROM users WHERE id > ?", params![10])?;
//! ```
//!
//! Record shapes are validated once per type and cached in the process-wide
//! [`ShapeRegistry::global`]. Use [`Binder`] to work against a registry of
//! your own.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use rowbind_core as core;
pub use rowbind_core::{
	Binder, BoxError, ColumnDescriptor, Cursor, CursorRow, Error, Executor, FieldDescriptor, Record,
	RecordDescriptor, Result, ShapeError, ShapeMapping, ShapeRegistry, Slot,
};
pub use rowbind_derive::Record;
#[cfg(feature = "sqlite")]
pub use rowbind_sqlite as sqlite;
#[cfg(feature = "sqlite")]
pub use rowbind_sqlite::{Sqlite, SqliteConfig, SqliteTransaction};
pub use rowbind_type::{ConversionError, FieldKind, FromValue, IntoValue, Params, Value, ValueKind, params};

/// Runs `sql` through `executor` and appends one `T` per row to
/// `destination`, using the global shape registry.
pub fn query<T, E>(executor: &E, destination: &mut Vec<T>, sql: &str, params: impl Into<Params>) -> Result<()>
where
	T: Record,
	E: Executor + ?Sized,
{
	Binder::new(ShapeRegistry::global()).query(executor, destination, sql, params)
}

/// Runs a statement that returns no rows, yielding the affected row count.
pub fn exec<E>(executor: &E, sql: &str, params: impl Into<Params>) -> Result<u64>
where
	E: Executor + ?Sized,
{
	Binder::new(ShapeRegistry::global()).exec(executor, sql, params)
}
