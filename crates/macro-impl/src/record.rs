// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Expansion of `#[derive(Record)]`.
//!
//! A derived struct gets two impls:
//! - `Record`, describing its fields and binding column values by field index
//! - `FromValue` with `KIND = Structured`, so a derived struct used as the
//!   field of another record is recognised as a nested structure

use std::collections::HashSet;

use proc_macro2::{TokenStream, TokenTree};

use crate::{
	generate::{
		arrow, automatically_derived, braces, compile_error, crate_item, fat_arrow, global_path, ident, ident_raw,
		literal_str, literal_usize, parens, path_sep, punct, qualified, result_variant,
	},
	parse::{FieldStyle, ParsedField, ParsedStruct},
};

pub fn expand(parsed: ParsedStruct) -> TokenStream {
	if let Some(column) = duplicate_column(&parsed) {
		return compile_error(&format!("column '{}' is declared more than once in {}", column, parsed.name()));
	}

	let mut tokens = record_impl(&parsed);
	tokens.extend(from_value_impl(&parsed));
	tokens.into_iter().collect()
}

fn duplicate_column(parsed: &ParsedStruct) -> Option<&str> {
	let mut seen = HashSet::new();
	parsed.fields.iter().filter_map(|field| field.column.as_deref()).find(|column| !seen.insert(*column))
}

/// `impl ::krate::Record for Name { .. }`
fn record_impl(parsed: &ParsedStruct) -> Vec<TokenTree> {
	let krate = parsed.crate_path.as_str();

	let mut body = Vec::new();
	body.extend(descriptor_fn(parsed));
	body.extend(instantiate_fn(parsed));
	body.extend(bind_fn(parsed));

	let mut tokens: Vec<TokenTree> = automatically_derived().collect();
	tokens.push(ident("impl"));
	tokens.extend(crate_item(krate, "Record"));
	tokens.push(ident("for"));
	tokens.push(ident_raw(&parsed.ident));
	tokens.push(braces(body));
	tokens
}

/// `fn descriptor() -> RecordDescriptor { RecordDescriptor::new("Name", vec![..]) }`
fn descriptor_fn(parsed: &ParsedStruct) -> Vec<TokenTree> {
	let krate = parsed.crate_path.as_str();

	let mut fields = Vec::new();
	for field in &parsed.fields {
		fields.extend(field_descriptor(krate, field));
		fields.push(punct(','));
	}

	let mut vec_macro = global_path(&["std", "vec"]);
	vec_macro.push(punct('!'));
	vec_macro.push(parens(fields));

	let mut call = crate_item(krate, "RecordDescriptor");
	call.extend(path_sep());
	call.push(ident("new"));
	let mut args = vec![literal_str(parsed.name()), punct(',')];
	args.extend(vec_macro);
	call.push(parens(args));

	let mut tokens = vec![ident("fn"), ident("descriptor"), parens([])];
	tokens.extend(arrow());
	tokens.extend(crate_item(krate, "RecordDescriptor"));
	tokens.push(braces(call));
	tokens
}

/// `FieldDescriptor::named(i, "name", <T as FromValue>::KIND).with_column("c")`
fn field_descriptor(krate: &str, field: &ParsedField) -> Vec<TokenTree> {
	let kind = qualified(&field.ty, krate, "FromValue", "KIND");

	let mut tokens = crate_item(krate, "FieldDescriptor");
	tokens.extend(path_sep());

	let mut args = vec![literal_usize(field.index), punct(',')];
	match field.name() {
		Some(name) => {
			tokens.push(ident("named"));
			args.push(literal_str(name));
			args.push(punct(','));
		}
		None => tokens.push(ident("positional")),
	}
	args.extend(kind);
	tokens.push(parens(args));

	if let Some(column) = &field.column {
		tokens.push(punct('.'));
		tokens.push(ident("with_column"));
		tokens.push(parens([literal_str(column)]));
	}

	if field.flatten {
		tokens.push(punct('.'));
		tokens.push(ident("embedded"));
		tokens.push(parens([]));
	}

	tokens
}

/// `fn instantiate() -> Self { Self { a: <A as FromValue>::zero(), .. } }`
fn instantiate_fn(parsed: &ParsedStruct) -> Vec<TokenTree> {
	let krate = parsed.crate_path.as_str();

	let zero = |field: &ParsedField| {
		let mut tokens = qualified(&field.ty, krate, "FromValue", "zero");
		tokens.push(parens([]));
		tokens
	};

	let mut value = vec![ident("Self")];
	match parsed.style {
		FieldStyle::Named => {
			let mut inits = Vec::new();
			for field in &parsed.fields {
				if let Some(name) = &field.ident {
					inits.push(ident_raw(name));
					inits.push(punct(':'));
					inits.extend(zero(field));
					inits.push(punct(','));
				}
			}
			value.push(braces(inits));
		}
		FieldStyle::Tuple => {
			let mut inits = Vec::new();
			for field in &parsed.fields {
				inits.extend(zero(field));
				inits.push(punct(','));
			}
			value.push(parens(inits));
		}
		FieldStyle::Unit => {}
	}

	let mut tokens = vec![ident("fn"), ident("instantiate"), parens([])];
	tokens.extend(arrow());
	tokens.push(ident("Self"));
	tokens.push(braces(value));
	tokens
}

/// `fn bind(&mut self, field: usize, value: Value) -> Result<(), ConversionError>`
fn bind_fn(parsed: &ParsedStruct) -> Vec<TokenTree> {
	let krate = parsed.crate_path.as_str();
	let unused = parsed.fields.is_empty();
	let (field_arg, value_arg) = if unused {
		("_field", "_value")
	} else {
		("field", "value")
	};

	let mut params = vec![punct('&'), ident("mut"), ident("self"), punct(',')];
	params.extend([ident(field_arg), punct(':'), ident("usize"), punct(',')]);
	params.extend([ident(value_arg), punct(':')]);
	params.extend(crate_item(krate, "Value"));

	let mut body = Vec::new();
	if !unused {
		let mut arms = Vec::new();
		for field in &parsed.fields {
			arms.push(literal_usize(field.index));
			arms.extend(fat_arrow());

			let mut assign = vec![ident("self"), punct('.')];
			match &field.ident {
				Some(name) => assign.push(ident_raw(name)),
				None => assign.push(literal_usize(field.index)),
			}
			assign.push(punct('='));
			assign.extend(qualified(&field.ty, krate, "FromValue", "from_value"));
			assign.push(parens([ident("value")]));
			assign.push(punct('?'));
			assign.push(punct(';'));
			arms.push(braces(assign));
		}
		arms.push(ident("_unknown"));
		arms.extend(fat_arrow());
		arms.push(braces([]));

		body.push(ident("match"));
		body.push(ident("field"));
		body.push(braces(arms));
	}
	body.extend(result_variant("Ok"));
	body.push(parens([parens([])]));

	let mut tokens = vec![ident("fn"), ident("bind"), parens(params)];
	tokens.extend(arrow());
	tokens.extend(result_type(krate, vec![parens([])]));
	tokens.push(braces(body));
	tokens
}

/// `impl ::krate::FromValue for Name { .. }` marking the struct as structured.
fn from_value_impl(parsed: &ParsedStruct) -> Vec<TokenTree> {
	let krate = parsed.crate_path.as_str();

	let mut body = vec![ident("const"), ident("KIND"), punct(':')];
	body.extend(crate_item(krate, "FieldKind"));
	body.push(punct('='));
	body.extend(crate_item(krate, "FieldKind"));
	body.extend(path_sep());
	body.push(ident("Structured"));
	body.push(punct(';'));

	// fn from_value(_value: Value) -> Result<Self, ConversionError>
	let mut params = vec![ident("_value"), punct(':')];
	params.extend(crate_item(krate, "Value"));

	let mut error = crate_item(krate, "ConversionError");
	error.extend(path_sep());
	error.push(ident("Structured"));
	error.push(braces([ident("target"), punct(':'), literal_str(parsed.name())]));

	let mut err = result_variant("Err");
	err.push(parens(error));

	body.extend([ident("fn"), ident("from_value"), parens(params)]);
	body.extend(arrow());
	body.extend(result_type(krate, vec![ident("Self")]));
	body.push(braces(err));

	// fn zero() -> Self { <Self as Record>::instantiate() }
	let mut zero = qualified(&[ident("Self")], krate, "Record", "instantiate");
	zero.push(parens([]));

	body.extend([ident("fn"), ident("zero"), parens([])]);
	body.extend(arrow());
	body.push(ident("Self"));
	body.push(braces(zero));

	let mut tokens: Vec<TokenTree> = automatically_derived().collect();
	tokens.push(ident("impl"));
	tokens.extend(crate_item(krate, "FromValue"));
	tokens.push(ident("for"));
	tokens.push(ident_raw(&parsed.ident));
	tokens.push(braces(body));
	tokens
}

/// `::core::result::Result<ok, ::krate::ConversionError>`
fn result_type(krate: &str, ok: Vec<TokenTree>) -> Vec<TokenTree> {
	let mut tokens = global_path(&["core", "result", "Result"]);
	tokens.push(punct('<'));
	tokens.extend(ok);
	tokens.push(punct(','));
	tokens.extend(crate_item(krate, "ConversionError"));
	tokens.push(punct('>'));
	tokens
}
