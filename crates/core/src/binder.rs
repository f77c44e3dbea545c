// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Binds result rows into records.

use std::{any::type_name, collections::HashSet};

use rowbind_type::Params;
use tracing::{instrument, trace};

use crate::{ColumnDescriptor, Cursor, Error, Executor, Record, Result, ShapeMapping, ShapeRegistry};

/// Where the value of one result column goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
	/// Field index of the record under construction.
	Field(usize),
	/// The value is read and dropped.
	Discard,
}

/// Runs queries and binds their rows using the shapes of a [`ShapeRegistry`].
#[derive(Clone, Copy)]
pub struct Binder<'r> {
	registry: &'r ShapeRegistry,
}

impl<'r> Binder<'r> {
	pub fn new(registry: &'r ShapeRegistry) -> Self {
		Self {
			registry,
		}
	}

	pub fn registry(&self) -> &'r ShapeRegistry {
		self.registry
	}

	/// Runs `sql` and appends one `T` per result row to `destination`, in
	/// cursor order.
	///
	/// Nothing is appended when the shape, the query or the column check
	/// fails. A failing row stops the iteration; rows appended before it stay
	/// in `destination`.
	#[instrument(name = "binder::query", level = "debug", skip_all, fields(record = type_name::<T>(), sql = sql))]
	pub fn query<T, E>(&self, executor: &E, destination: &mut Vec<T>, sql: &str, params: impl Into<Params>) -> Result<()>
	where
		T: Record,
		E: Executor + ?Sized,
	{
		let shape = self.registry.resolve::<T>()?;
		let params = params.into();

		executor.query_scoped(sql, &params, &mut |cursor: &mut dyn Cursor| bind_rows(&shape, cursor, destination))
	}

	/// Runs a statement that returns no rows.
	#[instrument(name = "binder::exec", level = "debug", skip_all, fields(sql = sql))]
	pub fn exec<E>(&self, executor: &E, sql: &str, params: impl Into<Params>) -> Result<u64>
	where
		E: Executor + ?Sized,
	{
		executor.execute(sql, &params.into())
	}
}

/// Computes the slot of every column, rejecting results that repeat a column
/// name.
pub fn bind_slots(shape: &ShapeMapping, columns: &[ColumnDescriptor]) -> Result<Vec<Slot>> {
	let mut seen = HashSet::with_capacity(columns.len());
	for column in columns {
		if !seen.insert(column.name.as_str()) {
			return Err(Error::DuplicateColumn {
				column: column.name.clone(),
			});
		}
	}

	Ok(columns.iter().map(|column| shape.field(&column.name).map_or(Slot::Discard, Slot::Field)).collect())
}

fn bind_rows<T: Record>(shape: &ShapeMapping, cursor: &mut dyn Cursor, destination: &mut Vec<T>) -> Result<()> {
	let columns = cursor.columns().map_err(Error::ColumnsUnavailable)?;
	let slots = bind_slots(shape, &columns)?;

	let mut row = 0usize;
	loop {
		let current = match cursor.next() {
			Ok(Some(current)) => current,
			Ok(None) => break,
			Err(source) => {
				return Err(Error::RowScanFailed {
					row,
					column: None,
					source,
				});
			}
		};

		let mut record = T::instantiate();
		for (column, slot) in columns.iter().zip(&slots) {
			let value = current.value(column.index).map_err(|source| Error::RowScanFailed {
				row,
				column: Some(column.name.clone()),
				source,
			})?;

			if let Slot::Field(field) = slot {
				record.bind(*field, value).map_err(|err| Error::RowScanFailed {
					row,
					column: Some(column.name.clone()),
					source: Box::new(err),
				})?;
			}
		}

		destination.push(record);
		row += 1;
	}

	trace!(rows = row, "rows bound");
	Ok(())
}

#[cfg(test)]
mod tests {
	use rowbind_type::FieldKind;

	use super::*;
	use crate::{FieldDescriptor, RecordDescriptor};

	fn shape() -> ShapeMapping {
		ShapeMapping::build(&RecordDescriptor::new(
			"Pair",
			vec![
				FieldDescriptor::named(0, "id", FieldKind::Scalar).with_column("c1"),
				FieldDescriptor::named(1, "name", FieldKind::Scalar).with_column("c2"),
			],
		))
		.unwrap()
	}

	fn columns(names: &[&str]) -> Vec<ColumnDescriptor> {
		names.iter().enumerate().map(|(index, name)| ColumnDescriptor::new(*name, index)).collect()
	}

	#[test]
	fn test_slots_follow_column_order() {
		let slots = bind_slots(&shape(), &columns(&["c2", "c9", "c1"])).unwrap();
		assert_eq!(slots, vec![Slot::Field(1), Slot::Discard, Slot::Field(0)]);
	}

	#[test]
	fn test_slots_reject_duplicate_column() {
		let err = bind_slots(&shape(), &columns(&["c1", "c2", "c1"])).unwrap_err();
		match err {
			Error::DuplicateColumn {
				column,
			} => assert_eq!(column, "c1"),
			other => panic!("Expected DuplicateColumn, got {other:?}"),
		}
	}

	#[test]
	fn test_duplicate_unmapped_column_is_rejected() {
		let err = bind_slots(&shape(), &columns(&["c9", "c9"])).unwrap_err();
		assert!(matches!(err, Error::DuplicateColumn { .. }));
	}

	#[test]
	fn test_all_columns_discarded() {
		let slots = bind_slots(&shape(), &columns(&["x", "y"])).unwrap();
		assert_eq!(slots, vec![Slot::Discard, Slot::Discard]);
	}
}
