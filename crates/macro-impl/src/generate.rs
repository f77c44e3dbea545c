// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Token builders used by the expansions.

use proc_macro2::{Delimiter, Group, Ident, Literal, Punct, Spacing, Span, TokenStream, TokenTree};

pub fn ident(name: &str) -> TokenTree {
	TokenTree::Ident(Ident::new(name, Span::call_site()))
}

/// Identifier that may be written as `r#keyword`.
pub fn ident_raw(name: &str) -> TokenTree {
	match name.strip_prefix("r#") {
		Some(stripped) => TokenTree::Ident(Ident::new_raw(stripped, Span::call_site())),
		None => ident(name),
	}
}

pub fn punct(ch: char) -> TokenTree {
	TokenTree::Punct(Punct::new(ch, Spacing::Alone))
}

/// First half of a multi-character operator such as `::` or `->`.
pub fn punct_joint(ch: char) -> TokenTree {
	TokenTree::Punct(Punct::new(ch, Spacing::Joint))
}

pub fn literal_str(s: &str) -> TokenTree {
	TokenTree::Literal(Literal::string(s))
}

pub fn literal_usize(n: usize) -> TokenTree {
	TokenTree::Literal(Literal::usize_unsuffixed(n))
}

pub fn group(delimiter: Delimiter, tokens: impl IntoIterator<Item = TokenTree>) -> TokenTree {
	TokenTree::Group(Group::new(delimiter, tokens.into_iter().collect()))
}

pub fn parens(tokens: impl IntoIterator<Item = TokenTree>) -> TokenTree {
	group(Delimiter::Parenthesis, tokens)
}

pub fn braces(tokens: impl IntoIterator<Item = TokenTree>) -> TokenTree {
	group(Delimiter::Brace, tokens)
}

pub fn brackets(tokens: impl IntoIterator<Item = TokenTree>) -> TokenTree {
	group(Delimiter::Bracket, tokens)
}

pub fn path_sep() -> impl Iterator<Item = TokenTree> {
	[punct_joint(':'), punct(':')].into_iter()
}

/// Global path `::first::second::..`.
pub fn global_path(segments: &[&str]) -> Vec<TokenTree> {
	let mut tokens = Vec::with_capacity(segments.len() * 3);
	for segment in segments {
		tokens.extend(path_sep());
		tokens.push(ident(segment));
	}
	tokens
}

/// `::{crate_path}::{item}`, where `crate_path` may itself contain `::`.
pub fn crate_item(crate_path: &str, item: &str) -> Vec<TokenTree> {
	let mut segments: Vec<&str> = crate_path.split("::").filter(|s| !s.is_empty()).collect();
	segments.push(item);
	global_path(&segments)
}

/// `<ty as ::{crate_path}::{trait_name}>::{item}`.
pub fn qualified(ty: &[TokenTree], crate_path: &str, trait_name: &str, item: &str) -> Vec<TokenTree> {
	let mut tokens = vec![punct('<')];
	tokens.extend(ty.iter().cloned());
	tokens.push(ident("as"));
	tokens.extend(crate_item(crate_path, trait_name));
	tokens.push(punct('>'));
	tokens.extend(path_sep());
	tokens.push(ident(item));
	tokens
}

/// `::core::result::Result::{variant}`.
pub fn result_variant(variant: &str) -> Vec<TokenTree> {
	global_path(&["core", "result", "Result", variant])
}

pub fn arrow() -> impl Iterator<Item = TokenTree> {
	[punct_joint('-'), punct('>')].into_iter()
}

pub fn fat_arrow() -> impl Iterator<Item = TokenTree> {
	[punct_joint('='), punct('>')].into_iter()
}

/// `#[automatically_derived]`
pub fn automatically_derived() -> impl Iterator<Item = TokenTree> {
	[punct('#'), brackets([ident("automatically_derived")])].into_iter()
}

/// A `compile_error!("message");` item.
pub fn compile_error(message: &str) -> TokenStream {
	[ident("compile_error"), punct('!'), parens([literal_str(message)]), punct(';')].into_iter().collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn render(tokens: Vec<TokenTree>) -> String {
		tokens.into_iter().collect::<TokenStream>().to_string().replace(' ', "")
	}

	#[test]
	fn test_crate_item() {
		assert_eq!(render(crate_item("rowbind", "Record")), "::rowbind::Record");
		assert_eq!(render(crate_item("rowbind::core", "Value")), "::rowbind::core::Value");
	}

	#[test]
	fn test_qualified() {
		let ty = vec![ident("Option"), punct('<'), ident("String"), punct('>')];
		assert_eq!(render(qualified(&ty, "rowbind", "FromValue", "zero")), "<Option<String>as::rowbind::FromValue>::zero");
	}

	#[test]
	fn test_ident_raw() {
		assert_eq!(ident_raw("r#type").to_string(), "r#type");
		assert_eq!(ident_raw("name").to_string(), "name");
	}
}
