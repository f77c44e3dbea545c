// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shape registry and row binder.
//!
//! A [`Record`] describes its fields once; the [`ShapeRegistry`] validates
//! that description and caches the resulting column mapping per type. The
//! [`Binder`] uses the mapping to turn the rows of any [`Executor`] into
//! freshly allocated records.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod binder;
pub mod error;
pub mod executor;
pub mod record;
pub mod shape;

pub use binder::{Binder, Slot};
pub use error::{BoxError, Error, Result, ShapeError};
pub use executor::{ColumnDescriptor, Cursor, CursorRow, Executor};
pub use record::{FieldDescriptor, Record, RecordDescriptor};
pub use rowbind_type::{ConversionError, FieldKind, FromValue, IntoValue, Params, Value, ValueKind, params};
pub use shape::{ShapeMapping, ShapeRegistry};
