// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Value model shared by the row binder, the derive macro and the executors.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod error;
mod params;
pub mod value;

pub use error::ConversionError;
pub use params::Params;
pub use value::{FieldKind, FromValue, IntoValue, Value, ValueKind};
