//! Naive class-name extraction
//!
//! The kind of scan a purge tool runs over source text: collect string
//! literal contents and split them on whitespace. Nothing is evaluated, so
//! only classes written out literally are found. Run over transformed text it
//! sees the modifier-prefixed names the assembler would build at runtime.

use crate::transform::{unquote, Token, Transformer};
use logos::Logos;

/// Contents of every non-empty string literal in `text`, in order.
///
/// Unrecognized input (stray quotes, JSX text) is skipped.
pub fn string_literals(text: &str) -> Vec<String> {
    let mut lexer = Token::lexer(text);
    let mut out = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(Token::Str) = result {
            let literal = unquote(lexer.slice());
            if !literal.is_empty() {
                out.push(literal.to_string());
            }
        }
    }

    out
}

/// Class names written literally inside the call sites `transformer` finds
/// in `text`, in source order.
pub fn class_names(text: &str, transformer: &Transformer) -> Vec<String> {
    transformer
        .call_sites(text)
        .into_iter()
        .flat_map(|site| string_literals(&text[site.arguments]))
        .flat_map(|literal| {
            literal
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Transform `source`, then extract the class names of its call sites.
pub fn discover(source: &str, transformer: &Transformer) -> Vec<String> {
    class_names(&transformer.transform(source), transformer)
}
