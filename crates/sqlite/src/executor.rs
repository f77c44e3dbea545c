// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! [`Executor`] implementations over rusqlite connections and transactions.

use rowbind_core::{BoxError, ColumnDescriptor, Cursor, CursorRow, Error, Executor, Params, Result, Value};
use rusqlite::{
	Connection, Rows, Statement, Transaction,
	types::{Value as SqlValue, ValueRef},
};
use tracing::{instrument, trace};

use crate::{SqliteConfig, SqliteError, connect};

/// An owned SQLite connection usable by the binder.
pub struct Sqlite {
	conn: Connection,
}

impl Sqlite {
	pub fn open(config: &SqliteConfig) -> crate::Result<Self> {
		Ok(Self {
			conn: connect(config)?,
		})
	}

	pub fn in_memory() -> crate::Result<Self> {
		Self::open(&SqliteConfig::in_memory())
	}

	pub fn from_connection(conn: Connection) -> Self {
		Self {
			conn,
		}
	}

	pub fn connection(&self) -> &Connection {
		&self.conn
	}

	pub fn into_inner(self) -> Connection {
		self.conn
	}

	/// Starts a deferred transaction. It rolls back when dropped without
	/// [`SqliteTransaction::commit`].
	pub fn transaction(&mut self) -> crate::Result<SqliteTransaction<'_>> {
		let tx = self.conn.transaction().map_err(SqliteError::Transaction)?;
		Ok(SqliteTransaction {
			tx,
		})
	}
}

/// A transaction on a [`Sqlite`] connection, binding exactly like the
/// connection itself.
pub struct SqliteTransaction<'c> {
	tx: Transaction<'c>,
}

impl SqliteTransaction<'_> {
	pub fn commit(self) -> crate::Result<()> {
		self.tx.commit().map_err(SqliteError::Transaction)
	}

	pub fn rollback(self) -> crate::Result<()> {
		self.tx.rollback().map_err(SqliteError::Transaction)
	}
}

impl Executor for Sqlite {
	fn query_scoped(
		&self,
		sql: &str,
		params: &Params,
		scope: &mut dyn FnMut(&mut dyn Cursor) -> Result<()>,
	) -> Result<()> {
		query_scoped(&self.conn, sql, params, scope)
	}

	fn execute(&self, sql: &str, params: &Params) -> Result<u64> {
		execute(&self.conn, sql, params)
	}
}

impl Executor for SqliteTransaction<'_> {
	fn query_scoped(
		&self,
		sql: &str,
		params: &Params,
		scope: &mut dyn FnMut(&mut dyn Cursor) -> Result<()>,
	) -> Result<()> {
		query_scoped(&self.tx, sql, params, scope)
	}

	fn execute(&self, sql: &str, params: &Params) -> Result<u64> {
		execute(&self.tx, sql, params)
	}
}

#[instrument(name = "sqlite::query", level = "trace", skip_all, fields(sql = sql))]
fn query_scoped(
	conn: &Connection,
	sql: &str,
	params: &Params,
	scope: &mut dyn FnMut(&mut dyn Cursor) -> Result<()>,
) -> Result<()> {
	let mut stmt = conn.prepare(sql).map_err(Error::query_execution)?;

	let columns: Vec<ColumnDescriptor> = stmt
		.column_names()
		.into_iter()
		.enumerate()
		.map(|(index, name)| ColumnDescriptor::new(name, index))
		.collect();

	bind_params(&mut stmt, params).map_err(Error::query_execution)?;

	let mut cursor = SqliteCursor {
		current: BufferedRow {
			values: Vec::with_capacity(columns.len()),
		},
		columns,
		rows: stmt.raw_query(),
	};
	scope(&mut cursor)
}

#[instrument(name = "sqlite::execute", level = "trace", skip_all, fields(sql = sql))]
fn execute(conn: &Connection, sql: &str, params: &Params) -> Result<u64> {
	let mut stmt = conn.prepare(sql).map_err(Error::query_execution)?;
	bind_params(&mut stmt, params).map_err(Error::query_execution)?;

	let affected = stmt.raw_execute().map_err(Error::query_execution)?;
	trace!(affected, "statement executed");
	Ok(affected as u64)
}

/// Binds positional parameters by index and named ones by `:name`.
fn bind_params(stmt: &mut Statement<'_>, params: &Params) -> rusqlite::Result<()> {
	let expected = stmt.parameter_count();

	match params {
		Params::None => {
			if expected != 0 {
				return Err(rusqlite::Error::InvalidParameterCount(0, expected));
			}
		}
		Params::Positional(values) => {
			if values.len() != expected {
				return Err(rusqlite::Error::InvalidParameterCount(values.len(), expected));
			}
			for (index, value) in values.iter().enumerate() {
				stmt.raw_bind_parameter(index + 1, to_sql(value))?;
			}
		}
		Params::Named(values) => {
			if values.len() != expected {
				return Err(rusqlite::Error::InvalidParameterCount(values.len(), expected));
			}
			for (name, value) in values {
				let name = parameter_name(name);
				let index = stmt
					.parameter_index(&name)?
					.ok_or_else(|| rusqlite::Error::InvalidParameterName(name.clone()))?;
				stmt.raw_bind_parameter(index, to_sql(value))?;
			}
		}
	}

	Ok(())
}

fn parameter_name(name: &str) -> String {
	if name.starts_with([':', '@', '$']) {
		name.to_string()
	} else {
		format!(":{}", name)
	}
}

fn to_sql(value: &Value) -> SqlValue {
	match value {
		Value::Null => SqlValue::Null,
		Value::Integer(v) => SqlValue::Integer(*v),
		Value::Real(v) => SqlValue::Real(*v),
		Value::Text(v) => SqlValue::Text(v.clone()),
		Value::Blob(v) => SqlValue::Blob(v.clone()),
	}
}

fn from_sql(value: ValueRef<'_>) -> Value {
	match value {
		ValueRef::Null => Value::Null,
		ValueRef::Integer(v) => Value::Integer(v),
		ValueRef::Real(v) => Value::Real(v),
		// text that is not valid UTF-8 keeps its bytes
		ValueRef::Text(v) => match std::str::from_utf8(v) {
			Ok(text) => Value::Text(text.to_string()),
			Err(_) => Value::Blob(v.to_vec()),
		},
		ValueRef::Blob(v) => Value::Blob(v.to_vec()),
	}
}

/// Cursor over a stepping statement. The values of the current row are
/// copied out of the statement when the cursor advances.
struct SqliteCursor<'s> {
	columns: Vec<ColumnDescriptor>,
	rows: Rows<'s>,
	current: BufferedRow,
}

impl Cursor for SqliteCursor<'_> {
	fn columns(&self) -> std::result::Result<Vec<ColumnDescriptor>, BoxError> {
		Ok(self.columns.clone())
	}

	fn next(&mut self) -> std::result::Result<Option<&dyn CursorRow>, BoxError> {
		let Some(row) = self.rows.next()? else {
			return Ok(None);
		};

		self.current.values.clear();
		for index in 0..self.columns.len() {
			self.current.values.push(from_sql(row.get_ref(index)?));
		}

		Ok(Some(&self.current))
	}
}

struct BufferedRow {
	values: Vec<Value>,
}

impl CursorRow for BufferedRow {
	fn value(&self, index: usize) -> std::result::Result<Value, BoxError> {
		self.values.get(index).cloned().ok_or_else(|| format!("column index {} out of range", index).into())
	}
}
