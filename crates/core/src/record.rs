// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use rowbind_type::{ConversionError, FieldKind, Value};

/// A struct whose instances are filled from result rows.
///
/// Usually derived with `#[derive(Record)]`. The descriptor is only read by
/// the [`ShapeRegistry`](crate::ShapeRegistry), once per type; `instantiate`
/// and `bind` run for every row.
pub trait Record: Sized + 'static {
	/// Describes the fields of the record in declaration order.
	fn descriptor() -> RecordDescriptor;

	/// Allocates a record with every field at its zero value.
	fn instantiate() -> Self;

	/// Stores `value` into the field at `field` (an index into the
	/// descriptor's fields).
	fn bind(&mut self, field: usize, value: Value) -> Result<(), ConversionError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDescriptor {
	pub name: &'static str,
	pub fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
	pub fn new(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
		Self {
			name,
			fields,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
	/// Position of the field within the record.
	pub index: usize,
	/// Identifier of the field; `None` for positional (tuple struct) fields.
	pub name: Option<&'static str>,
	/// External column tag.
	pub column: Option<&'static str>,
	pub kind: FieldKind,
	/// Set for embedded fields whose members would be promoted into the
	/// enclosing record.
	pub embedded: bool,
}

impl FieldDescriptor {
	pub const fn named(index: usize, name: &'static str, kind: FieldKind) -> Self {
		Self {
			index,
			name: Some(name),
			column: None,
			kind,
			embedded: false,
		}
	}

	pub const fn positional(index: usize, kind: FieldKind) -> Self {
		Self {
			index,
			name: None,
			column: None,
			kind,
			embedded: false,
		}
	}

	pub const fn with_column(mut self, column: &'static str) -> Self {
		self.column = Some(column);
		self
	}

	pub const fn embedded(mut self) -> Self {
		self.embedded = true;
		self
	}

	pub fn is_anonymous(&self) -> bool {
		self.name.is_none() || self.embedded
	}

	/// Human readable name used in error messages.
	pub fn label(&self) -> String {
		match self.name {
			Some(name) => name.to_string(),
			None => format!("#{}", self.index),
		}
	}
}
