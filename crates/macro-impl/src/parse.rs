// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Minimal struct parser for derive input.
//!
//! Understands outer attributes, visibility, named, tuple and unit structs,
//! and the `#[row(...)]` field attribute. Anything else is reported with
//! `compile_error!`.

use proc_macro2::{Delimiter, Literal, Spacing, TokenStream, TokenTree};

use crate::generate::compile_error;

pub type ParseResult<T> = Result<T, TokenStream>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStyle {
	Named,
	Tuple,
	Unit,
}

#[derive(Debug)]
pub struct ParsedStruct {
	/// Identifier as written, possibly `r#`-prefixed.
	pub ident: String,
	pub crate_path: String,
	pub style: FieldStyle,
	pub fields: Vec<ParsedField>,
}

impl ParsedStruct {
	pub fn name(&self) -> &str {
		unraw(&self.ident)
	}
}

#[derive(Debug)]
pub struct ParsedField {
	pub index: usize,
	/// `None` for tuple struct fields.
	pub ident: Option<String>,
	pub ty: Vec<TokenTree>,
	/// From `#[row(column = "...")]`.
	pub column: Option<String>,
	/// From `#[row(flatten)]`.
	pub flatten: bool,
}

impl ParsedField {
	pub fn name(&self) -> Option<&str> {
		self.ident.as_deref().map(unraw)
	}
}

fn unraw(ident: &str) -> &str {
	ident.strip_prefix("r#").unwrap_or(ident)
}

pub fn parse_struct_with_crate(input: TokenStream, crate_path: &str) -> ParseResult<ParsedStruct> {
	let tokens: Vec<TokenTree> = input.into_iter().collect();

	let mut pos = skip_attributes(&tokens, 0);
	pos = skip_visibility(&tokens, pos);

	match tokens.get(pos) {
		Some(TokenTree::Ident(keyword)) if keyword == "struct" => {}
		Some(TokenTree::Ident(keyword)) if keyword == "enum" || keyword == "union" => {
			return Err(compile_error(
				"Record can only be derived for structs; query results are bound into a Vec of struct records",
			));
		}
		_ => return Err(compile_error("Record can only be derived for structs")),
	}
	pos += 1;

	let ident = match tokens.get(pos) {
		Some(TokenTree::Ident(ident)) => ident.to_string(),
		_ => return Err(compile_error("expected struct name")),
	};
	pos += 1;

	let (style, fields) = match tokens.get(pos) {
		Some(TokenTree::Punct(p)) if p.as_char() == '<' => {
			return Err(compile_error("Record can not be derived for generic structs"));
		}
		Some(TokenTree::Ident(keyword)) if keyword == "where" => {
			return Err(compile_error("Record can not be derived for generic structs"));
		}
		Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Brace => {
			(FieldStyle::Named, parse_fields(g.stream(), FieldStyle::Named)?)
		}
		Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Parenthesis => {
			(FieldStyle::Tuple, parse_fields(g.stream(), FieldStyle::Tuple)?)
		}
		Some(TokenTree::Punct(p)) if p.as_char() == ';' => (FieldStyle::Unit, Vec::new()),
		_ => return Err(compile_error("expected struct body")),
	};

	Ok(ParsedStruct {
		ident,
		crate_path: crate_path.to_string(),
		style,
		fields,
	})
}

fn attribute_at(tokens: &[TokenTree], pos: usize) -> Option<TokenStream> {
	match (tokens.get(pos), tokens.get(pos + 1)) {
		(Some(TokenTree::Punct(p)), Some(TokenTree::Group(g)))
			if p.as_char() == '#' && g.delimiter() == Delimiter::Bracket =>
		{
			Some(g.stream())
		}
		_ => None,
	}
}

fn skip_attributes(tokens: &[TokenTree], mut pos: usize) -> usize {
	while attribute_at(tokens, pos).is_some() {
		pos += 2;
	}
	pos
}

fn skip_visibility(tokens: &[TokenTree], mut pos: usize) -> usize {
	if let Some(TokenTree::Ident(ident)) = tokens.get(pos) {
		if ident == "pub" {
			pos += 1;
			if let Some(TokenTree::Group(g)) = tokens.get(pos) {
				if g.delimiter() == Delimiter::Parenthesis {
					pos += 1;
				}
			}
		}
	}
	pos
}

/// Splits on commas outside of `<...>`. The `>` of `->` does not close a
/// bracket.
fn split_top_level(tokens: Vec<TokenTree>) -> Vec<Vec<TokenTree>> {
	let mut chunks = Vec::new();
	let mut current = Vec::new();
	let mut depth = 0usize;
	let mut after_dash = false;

	for token in tokens {
		if let TokenTree::Punct(p) = &token {
			let ch = p.as_char();
			match ch {
				'<' => depth += 1,
				'>' if !after_dash => depth = depth.saturating_sub(1),
				',' if depth == 0 => {
					chunks.push(std::mem::take(&mut current));
					after_dash = false;
					continue;
				}
				_ => {}
			}
			after_dash = ch == '-' && p.spacing() == Spacing::Joint;
		} else {
			after_dash = false;
		}
		current.push(token);
	}

	if !current.is_empty() {
		chunks.push(current);
	}
	chunks
}

fn parse_fields(stream: TokenStream, style: FieldStyle) -> ParseResult<Vec<ParsedField>> {
	let mut fields = Vec::new();
	for chunk in split_top_level(stream.into_iter().collect()) {
		if chunk.is_empty() {
			continue;
		}
		let index = fields.len();
		fields.push(parse_field(chunk, index, style)?);
	}
	Ok(fields)
}

fn parse_field(chunk: Vec<TokenTree>, index: usize, style: FieldStyle) -> ParseResult<ParsedField> {
	let mut column = None;
	let mut flatten = false;

	let mut pos = 0;
	while let Some(attribute) = attribute_at(&chunk, pos) {
		parse_row_attribute(attribute, &mut column, &mut flatten)?;
		pos += 2;
	}
	pos = skip_visibility(&chunk, pos);

	let ident = if style == FieldStyle::Named {
		let ident = match chunk.get(pos) {
			Some(TokenTree::Ident(ident)) => ident.to_string(),
			_ => return Err(compile_error("expected field name")),
		};
		match chunk.get(pos + 1) {
			Some(TokenTree::Punct(p)) if p.as_char() == ':' => {}
			_ => return Err(compile_error(&format!("expected `:` after field `{}`", unraw(&ident)))),
		}
		pos += 2;
		Some(ident)
	} else {
		None
	};

	let ty: Vec<TokenTree> = chunk.into_iter().skip(pos).collect();
	if ty.is_empty() {
		return Err(compile_error("expected field type"));
	}

	Ok(ParsedField {
		index,
		ident,
		ty,
		column,
		flatten,
	})
}

/// Reads `row(...)`; other attributes (doc comments, serde, ..) are ignored.
fn parse_row_attribute(attribute: TokenStream, column: &mut Option<String>, flatten: &mut bool) -> ParseResult<()> {
	let tokens: Vec<TokenTree> = attribute.into_iter().collect();

	match tokens.first() {
		Some(TokenTree::Ident(ident)) if ident == "row" => {}
		_ => return Ok(()),
	}

	let args = match tokens.get(1) {
		Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Parenthesis && tokens.len() == 2 => g.stream(),
		_ => return Err(compile_error("expected #[row(column = \"...\")] or #[row(flatten)]")),
	};

	for arg in split_top_level(args.into_iter().collect()) {
		let key = match arg.first() {
			Some(TokenTree::Ident(key)) => key.to_string(),
			_ => return Err(compile_error("expected a row attribute key")),
		};

		match (key.as_str(), &arg[1..]) {
			("flatten", []) => *flatten = true,
			("column", [TokenTree::Punct(eq), TokenTree::Literal(lit)]) if eq.as_char() == '=' => {
				if column.is_some() {
					return Err(compile_error("column is declared more than once on the same field"));
				}
				match string_literal(lit) {
					Some(value) => *column = Some(value),
					None => return Err(compile_error("column must be a plain string literal")),
				}
			}
			("column", _) => return Err(compile_error("expected column = \"...\"")),
			(other, _) => return Err(compile_error(&format!("unknown row attribute `{}`", other))),
		}
	}

	Ok(())
}

/// Contents of a `"..."` or `r#"..."#` literal without escapes.
fn string_literal(lit: &Literal) -> Option<String> {
	let repr = lit.to_string();

	if let Some(raw) = repr.strip_prefix('r') {
		let hashes = raw.len() - raw.trim_start_matches('#').len();
		let inner = raw.get(hashes..raw.len().checked_sub(hashes)?)?;
		return inner.strip_prefix('"')?.strip_suffix('"').map(str::to_string);
	}

	let inner = repr.strip_prefix('"')?.strip_suffix('"')?;
	if inner.contains('\\') {
		return None;
	}
	Some(inner.to_string())
}
