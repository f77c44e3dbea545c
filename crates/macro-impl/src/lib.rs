// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Implementation of the rowbind derive macros.
//!
//! Token streams are parsed and generated with `proc_macro2` only, so the
//! logic can be exercised by ordinary unit tests. Use `rowbind-derive` (or the
//! `rowbind` facade) rather than this crate.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod generate;
pub mod parse;
pub mod record;

use proc_macro2::TokenStream;

/// Derive `Record` against the `rowbind` facade.
pub fn derive_record(input: TokenStream) -> TokenStream {
	derive_record_with_crate(input, "rowbind")
}

/// Derive `Record` with a custom crate path.
///
/// # Arguments
/// * `input` - The derive macro input TokenStream
/// * `crate_path` - Crate re-exporting the rowbind core items (e.g. "rowbind", "rowbind_core")
pub fn derive_record_with_crate(input: TokenStream, crate_path: &str) -> TokenStream {
	match parse::parse_struct_with_crate(input, crate_path) {
		Ok(parsed) => record::expand(parsed),
		Err(err) => err,
	}
}
