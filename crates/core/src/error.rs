// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::error;

/// Transport for errors raised by executors and cursors.
pub type BoxError = Box<dyn error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

/// A record shape that can not be mapped onto result columns.
///
/// Shape errors are published to every caller waiting on the same record
/// type, hence `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
	#[error("record {record} must declare at least one field")]
	EmptyShape {
		record: &'static str,
	},

	#[error("field {field} of record {record} can not be a nested record")]
	NestedStructureNotAllowed {
		record: &'static str,
		field: String,
	},

	#[error("field {field} of record {record} can not be anonymous")]
	AnonymousFieldNotAllowed {
		record: &'static str,
		field: String,
	},

	#[error("field {field} of record {record} has no column tag")]
	MissingColumnTag {
		record: &'static str,
		field: String,
	},

	#[error("column tag '{column}' is declared more than once in record {record}")]
	DuplicateColumnTag {
		record: &'static str,
		column: String,
	},
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Shape(#[from] ShapeError),

	#[error("column '{column}' appears more than once in the result")]
	DuplicateColumn {
		column: String,
	},

	#[error("query execution failed: {0}")]
	QueryExecutionFailed(#[source] BoxError),

	#[error("result columns unavailable: {0}")]
	ColumnsUnavailable(#[source] BoxError),

	#[error("failed to scan row {row}{}: {source}", column_suffix(.column))]
	RowScanFailed {
		row: usize,
		column: Option<String>,
		#[source]
		source: BoxError,
	},
}

fn column_suffix(column: &Option<String>) -> String {
	match column {
		Some(name) => format!(" column '{}'", name),
		None => String::new(),
	}
}

impl Error {
	pub fn query_execution(err: impl Into<BoxError>) -> Self {
		Error::QueryExecutionFailed(err.into())
	}

	pub fn columns_unavailable(err: impl Into<BoxError>) -> Self {
		Error::ColumnsUnavailable(err.into())
	}

	/// The shape validation failure, if this error is one.
	pub fn as_shape(&self) -> Option<&ShapeError> {
		match self {
			Error::Shape(err) => Some(err),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_row_scan_message() {
		let err = Error::RowScanFailed {
			row: 2,
			column: Some("c1".to_string()),
			source: "boom".into(),
		};
		assert_eq!(err.to_string(), "failed to scan row 2 column 'c1': boom");

		let err = Error::RowScanFailed {
			row: 0,
			column: None,
			source: "eof".into(),
		};
		assert_eq!(err.to_string(), "failed to scan row 0: eof");
	}

	#[test]
	fn test_shape_is_transparent() {
		let err = Error::from(ShapeError::EmptyShape {
			record: "Empty",
		});
		assert_eq!(err.to_string(), "record Empty must declare at least one field");
		assert!(err.as_shape().is_some());
	}
}
