// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::value::ValueKind;

/// Failure to convert a column value into a field type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
	#[error("unexpected NULL for non-optional {target}")]
	UnexpectedNull {
		target: &'static str,
	},

	#[error("cannot convert {found} into {target}")]
	TypeMismatch {
		target: &'static str,
		found: ValueKind,
	},

	#[error("value {value} is out of range for {target}")]
	OutOfRange {
		target: &'static str,
		value: String,
	},

	#[error("{target} is a record and cannot be read from a single column")]
	Structured {
		target: &'static str,
	},
}
