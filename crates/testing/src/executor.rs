// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! An in-memory [`Executor`] that replays canned results.
//!
//! Every cursor it hands out is counted while open, and every value read
//! through a cursor is counted, so tests can assert that the binder releases
//! cursors and drains discarded columns.

use std::{
	collections::HashMap,
	sync::atomic::{AtomicUsize, Ordering},
};

use parking_lot::Mutex;
use rowbind_core::{BoxError, ColumnDescriptor, Cursor, CursorRow, Error, Executor, Params, Result, Value};

/// Failure injected by a script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ScriptError(pub String);

impl ScriptError {
	pub fn new(message: impl Into<String>) -> Self {
		Self(message.into())
	}
}

/// Canned outcome of one query.
#[derive(Debug, Clone)]
pub struct ScriptedResult {
	failure: Option<String>,
	columns: std::result::Result<Vec<String>, String>,
	rows: Vec<Vec<Value>>,
	advance_failure: Option<usize>,
	value_failure: Option<(usize, usize)>,
}

impl ScriptedResult {
	pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
		Self {
			failure: None,
			columns: Ok(columns.iter().map(|c| c.as_ref().to_string()).collect()),
			rows: Vec::new(),
			advance_failure: None,
			value_failure: None,
		}
	}

	/// The query itself fails; no cursor is opened.
	pub fn failing(message: impl Into<String>) -> Self {
		Self {
			failure: Some(message.into()),
			..Self::new::<&str>(&[])
		}
	}

	/// A cursor is opened but its column list can not be read.
	pub fn columns_failing(message: impl Into<String>) -> Self {
		Self {
			columns: Err(message.into()),
			..Self::new::<&str>(&[])
		}
	}

	pub fn row(mut self, values: Vec<Value>) -> Self {
		self.rows.push(values);
		self
	}

	pub fn rows(mut self, rows: impl IntoIterator<Item = Vec<Value>>) -> Self {
		self.rows.extend(rows);
		self
	}

	/// Advancing onto row `row` (zero based) fails.
	pub fn fail_advance_at(mut self, row: usize) -> Self {
		self.advance_failure = Some(row);
		self
	}

	/// Reading column `column` of row `row` fails.
	pub fn fail_value_at(mut self, row: usize, column: usize) -> Self {
		self.value_failure = Some((row, column));
		self
	}
}

/// A statement or query the executor has seen.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
	pub sql: String,
	pub params: Params,
}

#[derive(Default)]
pub struct ScriptedExecutor {
	queries: HashMap<String, ScriptedResult>,
	statements: HashMap<String, std::result::Result<u64, String>>,
	recorded: Mutex<Vec<Recorded>>,
	open: AtomicUsize,
	opened: AtomicUsize,
	reads: AtomicUsize,
}

impl ScriptedExecutor {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn on_query(mut self, sql: impl Into<String>, result: ScriptedResult) -> Self {
		self.queries.insert(sql.into(), result);
		self
	}

	pub fn on_execute(mut self, sql: impl Into<String>, affected: u64) -> Self {
		self.statements.insert(sql.into(), Ok(affected));
		self
	}

	pub fn on_execute_failing(mut self, sql: impl Into<String>, message: impl Into<String>) -> Self {
		self.statements.insert(sql.into(), Err(message.into()));
		self
	}

	/// Cursors currently open.
	pub fn open_cursors(&self) -> usize {
		self.open.load(Ordering::SeqCst)
	}

	/// Cursors opened since creation.
	pub fn opened_cursors(&self) -> usize {
		self.opened.load(Ordering::SeqCst)
	}

	/// Values read through any cursor.
	pub fn reads(&self) -> usize {
		self.reads.load(Ordering::SeqCst)
	}

	pub fn recorded(&self) -> Vec<Recorded> {
		self.recorded.lock().clone()
	}

	fn record(&self, sql: &str, params: &Params) {
		self.recorded.lock().push(Recorded {
			sql: sql.to_string(),
			params: params.clone(),
		});
	}
}

impl Executor for ScriptedExecutor {
	fn query_scoped(
		&self,
		sql: &str,
		params: &Params,
		scope: &mut dyn FnMut(&mut dyn Cursor) -> Result<()>,
	) -> Result<()> {
		self.record(sql, params);

		let result = self
			.queries
			.get(sql)
			.ok_or_else(|| Error::query_execution(ScriptError::new(format!("no script for query: {sql}"))))?;

		if let Some(message) = &result.failure {
			return Err(Error::query_execution(ScriptError::new(message.clone())));
		}

		let mut cursor = ScriptedCursor::open(self, result);
		scope(&mut cursor)
	}

	fn execute(&self, sql: &str, params: &Params) -> Result<u64> {
		self.record(sql, params);

		match self.statements.get(sql) {
			Some(Ok(affected)) => Ok(*affected),
			Some(Err(message)) => Err(Error::query_execution(ScriptError::new(message.clone()))),
			None => Err(Error::query_execution(ScriptError::new(format!("no script for statement: {sql}")))),
		}
	}
}

struct ScriptedCursor<'a> {
	executor: &'a ScriptedExecutor,
	result: &'a ScriptedResult,
	next_row: usize,
	current: Option<ScriptedRow<'a>>,
}

impl<'a> ScriptedCursor<'a> {
	fn open(executor: &'a ScriptedExecutor, result: &'a ScriptedResult) -> Self {
		executor.open.fetch_add(1, Ordering::SeqCst);
		executor.opened.fetch_add(1, Ordering::SeqCst);
		Self {
			executor,
			result,
			next_row: 0,
			current: None,
		}
	}
}

impl Drop for ScriptedCursor<'_> {
	fn drop(&mut self) {
		self.executor.open.fetch_sub(1, Ordering::SeqCst);
	}
}

impl Cursor for ScriptedCursor<'_> {
	fn columns(&self) -> std::result::Result<Vec<ColumnDescriptor>, BoxError> {
		match &self.result.columns {
			Ok(names) => {
				Ok(names.iter().enumerate().map(|(index, name)| ColumnDescriptor::new(name.as_str(), index)).collect())
			}
			Err(message) => Err(Box::new(ScriptError::new(message.clone()))),
		}
	}

	fn next(&mut self) -> std::result::Result<Option<&dyn CursorRow>, BoxError> {
		let (executor, result) = (self.executor, self.result);
		let row = self.next_row;
		if result.advance_failure == Some(row) {
			self.current = None;
			return Err(Box::new(ScriptError::new(format!("cursor failed to advance to row {row}"))));
		}

		self.current = result.rows.get(row).map(|values| ScriptedRow {
			reads: &executor.reads,
			row,
			values,
			failing_column: result.value_failure.and_then(|(r, c)| (r == row).then_some(c)),
		});
		self.next_row += 1;

		Ok(self.current.as_ref().map(|row| row as &dyn CursorRow))
	}
}

struct ScriptedRow<'a> {
	reads: &'a AtomicUsize,
	row: usize,
	values: &'a [Value],
	failing_column: Option<usize>,
}

impl CursorRow for ScriptedRow<'_> {
	fn value(&self, index: usize) -> std::result::Result<Value, BoxError> {
		self.reads.fetch_add(1, Ordering::SeqCst);

		if self.failing_column == Some(index) {
			return Err(Box::new(ScriptError::new(format!("column {index} of row {} is unreadable", self.row))));
		}

		self.values
			.get(index)
			.cloned()
			.ok_or_else(|| Box::new(ScriptError::new(format!("row {} has no column {index}", self.row))) as BoxError)
	}
}
