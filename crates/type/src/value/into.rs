// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::Value;

/// Conversion of native Rust values into statement parameters.
pub trait IntoValue {
	fn into_value(self) -> Value;
}

impl IntoValue for Value {
	fn into_value(self) -> Value {
		self
	}
}

impl IntoValue for &Value {
	fn into_value(self) -> Value {
		self.clone()
	}
}

macro_rules! impl_into_value_integer {
	($($t:ty),* $(,)?) => {
		$(
			impl IntoValue for $t {
				fn into_value(self) -> Value {
					Value::Integer(i64::from(self))
				}
			}
		)*
	};
}

impl_into_value_integer!(i8, i16, i32, i64, u8, u16, u32);

impl IntoValue for bool {
	fn into_value(self) -> Value {
		Value::Integer(i64::from(self))
	}
}

impl IntoValue for f32 {
	fn into_value(self) -> Value {
		Value::Real(f64::from(self))
	}
}

impl IntoValue for f64 {
	fn into_value(self) -> Value {
		Value::Real(self)
	}
}

impl IntoValue for &str {
	fn into_value(self) -> Value {
		Value::Text(self.to_string())
	}
}

impl IntoValue for String {
	fn into_value(self) -> Value {
		Value::Text(self)
	}
}

impl IntoValue for &String {
	fn into_value(self) -> Value {
		Value::Text(self.clone())
	}
}

impl IntoValue for Vec<u8> {
	fn into_value(self) -> Value {
		Value::Blob(self)
	}
}

impl IntoValue for &[u8] {
	fn into_value(self) -> Value {
		Value::Blob(self.to_vec())
	}
}

impl<T: IntoValue> IntoValue for Option<T> {
	fn into_value(self) -> Value {
		match self {
			Some(value) => value.into_value(),
			None => Value::Null,
		}
	}
}
