// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

mod from;
mod into;

pub use from::{FieldKind, FromValue};
pub use into::IntoValue;

/// A column value as produced by a cursor or passed as a statement parameter.
///
/// The variants follow the storage classes of SQLite, which is the narrowest
/// common denominator of the executors this crate talks to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Value {
	/// SQL NULL
	#[default]
	Null,
	/// A signed 64-bit integer
	Integer(i64),
	/// An 8-byte floating point
	Real(f64),
	/// UTF-8 text
	Text(String),
	/// A binary large object
	Blob(Vec<u8>),
}

impl Value {
	pub fn null() -> Self {
		Value::Null
	}

	pub fn integer(v: impl Into<i64>) -> Self {
		Value::Integer(v.into())
	}

	pub fn real(v: impl Into<f64>) -> Self {
		Value::Real(v.into())
	}

	pub fn text(v: impl Into<String>) -> Self {
		Value::Text(v.into())
	}

	pub fn blob(v: impl Into<Vec<u8>>) -> Self {
		Value::Blob(v.into())
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	pub fn kind(&self) -> ValueKind {
		match self {
			Value::Null => ValueKind::Null,
			Value::Integer(_) => ValueKind::Integer,
			Value::Real(_) => ValueKind::Real,
			Value::Text(_) => ValueKind::Text,
			Value::Blob(_) => ValueKind::Blob,
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => f.write_str("NULL"),
			Value::Integer(v) => Display::fmt(v, f),
			Value::Real(v) => Display::fmt(v, f),
			Value::Text(v) => Display::fmt(v, f),
			Value::Blob(v) => {
				f.write_str("0x")?;
				for byte in v {
					write!(f, "{:02x}", byte)?;
				}
				Ok(())
			}
		}
	}
}

/// The storage class of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
	Null,
	Integer,
	Real,
	Text,
	Blob,
}

impl Display for ValueKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ValueKind::Null => f.write_str("NULL"),
			ValueKind::Integer => f.write_str("INTEGER"),
			ValueKind::Real => f.write_str("REAL"),
			ValueKind::Text => f.write_str("TEXT"),
			ValueKind::Blob => f.write_str("BLOB"),
		}
	}
}
