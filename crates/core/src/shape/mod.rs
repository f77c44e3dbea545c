// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Validated column mapping of a record type.

mod registry;

use std::collections::HashMap;

pub use registry::ShapeRegistry;
use rowbind_type::FieldKind;

use crate::{RecordDescriptor, ShapeError};

/// `column tag -> field index` mapping of one record type.
///
/// Built from a [`RecordDescriptor`] by [`ShapeMapping::build`], which
/// enforces that every field contributes exactly one uniquely tagged column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMapping {
	record: &'static str,
	columns: HashMap<&'static str, usize>,
}

impl ShapeMapping {
	pub fn build(descriptor: &RecordDescriptor) -> Result<Self, ShapeError> {
		let record = descriptor.name;

		if descriptor.fields.is_empty() {
			return Err(ShapeError::EmptyShape {
				record,
			});
		}

		let mut columns = HashMap::with_capacity(descriptor.fields.len());

		for field in &descriptor.fields {
			if field.kind == FieldKind::Structured {
				return Err(ShapeError::NestedStructureNotAllowed {
					record,
					field: field.label(),
				});
			}

			if field.is_anonymous() {
				return Err(ShapeError::AnonymousFieldNotAllowed {
					record,
					field: field.label(),
				});
			}

			let column = match field.column {
				Some(column) if !column.is_empty() => column,
				_ => {
					return Err(ShapeError::MissingColumnTag {
						record,
						field: field.label(),
					});
				}
			};

			if columns.insert(column, field.index).is_some() {
				return Err(ShapeError::DuplicateColumnTag {
					record,
					column: column.to_string(),
				});
			}
		}

		Ok(Self {
			record,
			columns,
		})
	}

	pub fn record(&self) -> &'static str {
		self.record
	}

	/// Field index bound to `column`, if the record declares it.
	pub fn field(&self, column: &str) -> Option<usize> {
		self.columns.get(column).copied()
	}

	pub fn columns(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
		self.columns.iter().map(|(column, field)| (*column, *field))
	}

	pub fn len(&self) -> usize {
		self.columns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::FieldDescriptor;

	fn scalar(index: usize, name: &'static str) -> FieldDescriptor {
		FieldDescriptor::named(index, name, FieldKind::Scalar)
	}

	#[test]
	fn test_build() {
		let descriptor = RecordDescriptor::new(
			"Pair",
			vec![scalar(0, "id").with_column("c1"), scalar(1, "name").with_column("c2")],
		);

		let mapping = ShapeMapping::build(&descriptor).unwrap();

		assert_eq!(mapping.record(), "Pair");
		assert_eq!(mapping.len(), 2);
		assert_eq!(mapping.field("c1"), Some(0));
		assert_eq!(mapping.field("c2"), Some(1));
		assert_eq!(mapping.field("c3"), None);
	}

	#[test]
	fn test_empty_shape() {
		let descriptor = RecordDescriptor::new("Empty", vec![]);
		assert_eq!(
			ShapeMapping::build(&descriptor),
			Err(ShapeError::EmptyShape {
				record: "Empty"
			})
		);
	}

	#[test]
	fn test_nested_structure() {
		let descriptor = RecordDescriptor::new(
			"Outer",
			vec![
				scalar(0, "id").with_column("c1"),
				FieldDescriptor::named(1, "inner", FieldKind::Structured).with_column("c2"),
			],
		);
		assert_eq!(
			ShapeMapping::build(&descriptor),
			Err(ShapeError::NestedStructureNotAllowed {
				record: "Outer",
				field: "inner".to_string()
			})
		);
	}

	#[test]
	fn test_anonymous_field() {
		let descriptor = RecordDescriptor::new(
			"Tuple",
			vec![FieldDescriptor::positional(0, FieldKind::Scalar).with_column("c1")],
		);
		assert_eq!(
			ShapeMapping::build(&descriptor),
			Err(ShapeError::AnonymousFieldNotAllowed {
				record: "Tuple",
				field: "#0".to_string()
			})
		);

		let descriptor =
			RecordDescriptor::new("Embedding", vec![scalar(0, "base").with_column("c1").embedded()]);
		assert_eq!(
			ShapeMapping::build(&descriptor),
			Err(ShapeError::AnonymousFieldNotAllowed {
				record: "Embedding",
				field: "base".to_string()
			})
		);
	}

	#[test]
	fn test_nested_reported_before_anonymous() {
		let descriptor = RecordDescriptor::new(
			"Embedding",
			vec![FieldDescriptor::named(0, "base", FieldKind::Structured).embedded()],
		);
		assert!(matches!(
			ShapeMapping::build(&descriptor),
			Err(ShapeError::NestedStructureNotAllowed { .. })
		));
	}

	#[test]
	fn test_missing_column_tag() {
		let descriptor = RecordDescriptor::new("Untagged", vec![scalar(0, "id").with_column("c1"), scalar(1, "name")]);
		assert_eq!(
			ShapeMapping::build(&descriptor),
			Err(ShapeError::MissingColumnTag {
				record: "Untagged",
				field: "name".to_string()
			})
		);
	}

	#[test]
	fn test_empty_column_tag() {
		let descriptor = RecordDescriptor::new("Blank", vec![scalar(0, "id").with_column("")]);
		assert!(matches!(ShapeMapping::build(&descriptor), Err(ShapeError::MissingColumnTag { .. })));
	}

	#[test]
	fn test_duplicate_column_tag() {
		let descriptor = RecordDescriptor::new(
			"Collision",
			vec![scalar(0, "first").with_column("shared"), scalar(1, "second").with_column("shared")],
		);
		assert_eq!(
			ShapeMapping::build(&descriptor),
			Err(ShapeError::DuplicateColumnTag {
				record: "Collision",
				column: "shared".to_string()
			})
		);
	}
}
