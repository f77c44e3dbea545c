// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::any::type_name;

use super::Value;
use crate::ConversionError;

/// Whether a field type holds a single column value or a structured record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
	Scalar,
	Structured,
}

/// Conversion from a column value into a record field type.
///
/// `zero` provides the initial value of the field in a freshly allocated
/// record, before any column is bound into it.
pub trait FromValue: Sized {
	const KIND: FieldKind = FieldKind::Scalar;

	fn from_value(value: Value) -> Result<Self, ConversionError>;

	fn zero() -> Self;
}

fn mismatch<T>(value: &Value) -> ConversionError {
	match value {
		Value::Null => ConversionError::UnexpectedNull {
			target: type_name::<T>(),
		},
		other => ConversionError::TypeMismatch {
			target: type_name::<T>(),
			found: other.kind(),
		},
	}
}

macro_rules! impl_from_value_integer {
	($($t:ty),* $(,)?) => {
		$(
			impl FromValue for $t {
				fn from_value(value: Value) -> Result<Self, ConversionError> {
					match value {
						Value::Integer(v) => <$t>::try_from(v).map_err(|_| ConversionError::OutOfRange {
							target: type_name::<$t>(),
							value: v.to_string(),
						}),
						Value::Text(ref text) => text.trim().parse::<$t>().map_err(|_| mismatch::<$t>(&value)),
						other => Err(mismatch::<$t>(&other)),
					}
				}

				fn zero() -> Self {
					0
				}
			}
		)*
	};
}

impl_from_value_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_from_value_float {
	($($t:ty),* $(,)?) => {
		$(
			impl FromValue for $t {
				fn from_value(value: Value) -> Result<Self, ConversionError> {
					match value {
						Value::Real(v) => Ok(v as $t),
						Value::Integer(v) => Ok(v as $t),
						Value::Text(ref text) => text.trim().parse::<$t>().map_err(|_| mismatch::<$t>(&value)),
						other => Err(mismatch::<$t>(&other)),
					}
				}

				fn zero() -> Self {
					0.0
				}
			}
		)*
	};
}

impl_from_value_float!(f32, f64);

impl FromValue for bool {
	fn from_value(value: Value) -> Result<Self, ConversionError> {
		match value {
			Value::Integer(v) => Ok(v != 0),
			Value::Text(ref text) => match text.trim() {
				"1" | "true" | "TRUE" | "t" => Ok(true),
				"0" | "false" | "FALSE" | "f" => Ok(false),
				_ => Err(mismatch::<bool>(&value)),
			},
			other => Err(mismatch::<bool>(&other)),
		}
	}

	fn zero() -> Self {
		false
	}
}

impl FromValue for String {
	fn from_value(value: Value) -> Result<Self, ConversionError> {
		match value {
			Value::Text(text) => Ok(text),
			Value::Blob(bytes) => String::from_utf8(bytes).map_err(|_| ConversionError::TypeMismatch {
				target: type_name::<String>(),
				found: super::ValueKind::Blob,
			}),
			Value::Integer(v) => Ok(v.to_string()),
			Value::Real(v) => Ok(v.to_string()),
			Value::Null => Err(mismatch::<String>(&Value::Null)),
		}
	}

	fn zero() -> Self {
		String::new()
	}
}

impl FromValue for Vec<u8> {
	fn from_value(value: Value) -> Result<Self, ConversionError> {
		match value {
			Value::Blob(bytes) => Ok(bytes),
			Value::Text(text) => Ok(text.into_bytes()),
			other => Err(mismatch::<Vec<u8>>(&other)),
		}
	}

	fn zero() -> Self {
		Vec::new()
	}
}

impl FromValue for Value {
	fn from_value(value: Value) -> Result<Self, ConversionError> {
		Ok(value)
	}

	fn zero() -> Self {
		Value::Null
	}
}

impl<T: FromValue> FromValue for Option<T> {
	const KIND: FieldKind = T::KIND;

	fn from_value(value: Value) -> Result<Self, ConversionError> {
		match value {
			Value::Null => Ok(None),
			other => T::from_value(other).map(Some),
		}
	}

	fn zero() -> Self {
		None
	}
}
