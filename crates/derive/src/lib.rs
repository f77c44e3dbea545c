// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! `#[derive(Record)]`.
//!
//! ```ignore
//! #[derive(Record)]
//! struct User {
//! 	#[row(column = "id")]
//! 	id: i64,
//! 	#[row(column = "name")]
//! 	name: Option<String>,
//! }
//! ```
//!
//! Field attributes:
//! - `#[row(column = "...")]` binds the field to the named result column
//! - `#[row(flatten)]` marks the field as embedded, which record shapes reject

use proc_macro::TokenStream;

#[proc_macro_derive(Record, attributes(row))]
pub fn derive_record(input: TokenStream) -> TokenStream {
	rowbind_macro_impl::derive_record(input.into()).into()
}
