// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The narrow surface the binder needs from a database client.
//!
//! A connection and a transaction implement the same [`Executor`] trait, so
//! the binder has a single code path for both.

use rowbind_type::{Params, Value};

use crate::{BoxError, Result};

/// Name and position of one column returned by a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
	pub name: String,
	pub index: usize,
}

impl ColumnDescriptor {
	pub fn new(name: impl Into<String>, index: usize) -> Self {
		Self {
			name: name.into(),
			index,
		}
	}
}

/// Anything that can run a parameterized query and a statement.
pub trait Executor {
	/// Runs `sql` and hands the open cursor to `scope`.
	///
	/// The cursor only lives for the duration of `scope` and is released when
	/// it returns, whatever the outcome. Failure to run the query itself is
	/// reported as [`Error::QueryExecutionFailed`](crate::Error::QueryExecutionFailed).
	fn query_scoped(
		&self,
		sql: &str,
		params: &Params,
		scope: &mut dyn FnMut(&mut dyn Cursor) -> Result<()>,
	) -> Result<()>;

	/// Runs a statement that returns no rows, yielding the affected row count.
	fn execute(&self, sql: &str, params: &Params) -> Result<u64>;
}

/// Forward-only cursor over the rows of one query.
pub trait Cursor {
	fn columns(&self) -> std::result::Result<Vec<ColumnDescriptor>, BoxError>;

	/// Advances to the next row, `None` once the rows are exhausted.
	fn next(&mut self) -> std::result::Result<Option<&dyn CursorRow>, BoxError>;
}

/// The row a cursor is currently positioned on.
pub trait CursorRow {
	fn value(&self, index: usize) -> std::result::Result<Value, BoxError>;
}

impl<E: Executor + ?Sized> Executor for &E {
	fn query_scoped(
		&self,
		sql: &str,
		params: &Params,
		scope: &mut dyn FnMut(&mut dyn Cursor) -> Result<()>,
	) -> Result<()> {
		(**self).query_scoped(sql, params, scope)
	}

	fn execute(&self, sql: &str, params: &Params) -> Result<u64> {
		(**self).execute(sql, params)
	}
}

impl<E: Executor + ?Sized> Executor for Box<E> {
	fn query_scoped(
		&self,
		sql: &str,
		params: &Params,
		scope: &mut dyn FnMut(&mut dyn Cursor) -> Result<()>,
	) -> Result<()> {
		(**self).query_scoped(sql, params, scope)
	}

	fn execute(&self, sql: &str, params: &Params) -> Result<u64> {
		(**self).execute(sql, params)
	}
}
