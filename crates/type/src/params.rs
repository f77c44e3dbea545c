// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Value;

/// Parameters bound to a query or statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Params {
	#[default]
	None,
	Positional(Vec<Value>),
	Named(HashMap<String, Value>),
}

impl Params {
	pub fn get_positional(&self, index: usize) -> Option<&Value> {
		match self {
			Params::Positional(values) => values.get(index),
			_ => None,
		}
	}

	pub fn get_named(&self, name: &str) -> Option<&Value> {
		match self {
			Params::Named(map) => map.get(name),
			_ => None,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Params::None => 0,
			Params::Positional(values) => values.len(),
			Params::Named(map) => map.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn empty() -> Params {
		Params::None
	}
}

impl From<()> for Params {
	fn from(_: ()) -> Self {
		Params::None
	}
}

impl From<Vec<Value>> for Params {
	fn from(values: Vec<Value>) -> Self {
		Params::Positional(values)
	}
}

impl From<HashMap<String, Value>> for Params {
	fn from(map: HashMap<String, Value>) -> Self {
		Params::Named(map)
	}
}

impl<const N: usize> From<[Value; N]> for Params {
	fn from(values: [Value; N]) -> Self {
		Params::Positional(values.to_vec())
	}
}

#[macro_export]
macro_rules! params {
    // Empty params
    () => {
        $crate::Params::None
    };

    // Empty named parameters
    {} => {
        $crate::Params::None
    };

    // Named parameters with mixed keys: params!{ name: value, "key": value }
    { $($key:tt : $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::new();
            $(
                map.insert($crate::params_key!($key), $crate::IntoValue::into_value($value));
            )*
            $crate::Params::Named(map)
        }
    };

    // Empty positional parameters
    [] => {
        $crate::Params::None
    };

    // Positional parameters: params![value1, value2, ...]
    [ $($value:expr),+ $(,)? ] => {
        {
            let values = vec![
                $($crate::IntoValue::into_value($value)),*
            ];
            $crate::Params::Positional(values)
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! params_key {
	($key:ident) => {
		stringify!($key).to_string()
	};
	($key:literal) => {
		$key.to_string()
	};
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_params_macro_positional() {
		let params = params![42, true, "hello"];
		match params {
			Params::Positional(values) => {
				assert_eq!(values.len(), 3);
				assert_eq!(values[0], Value::Integer(42));
				assert_eq!(values[1], Value::Integer(1));
				assert_eq!(values[2], Value::Text("hello".to_string()));
			}
			_ => panic!("Expected positional params"),
		}
	}

	#[test]
	fn test_params_macro_named() {
		let params = params! {
		    c1: 1,
		    "c2": "a",
		};
		match params {
			Params::Named(map) => {
				assert_eq!(map.len(), 2);
				assert_eq!(map.get("c1"), Some(&Value::Integer(1)));
				assert_eq!(map.get("c2"), Some(&Value::Text("a".to_string())));
			}
			_ => panic!("Expected named params"),
		}
	}

	#[test]
	fn test_params_macro_empty() {
		assert_eq!(params!(), Params::None);
		assert_eq!(params! {}, Params::None);
		assert_eq!(params![], Params::None);
		assert!(Params::empty().is_empty());
	}

	#[test]
	fn test_params_with_null() {
		let missing: Option<i64> = None;
		let params = params![missing, Some(3)];
		assert_eq!(params.get_positional(0), Some(&Value::Null));
		assert_eq!(params.get_positional(1), Some(&Value::Integer(3)));
		assert_eq!(params.get_positional(2), None);
		assert_eq!(params.len(), 2);
	}
}
