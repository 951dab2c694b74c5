//! Raw tokenization of call argument text
//!
//! This is where argument text becomes a token stream. Whitespace tokens are
//! dropped: the emitter copies the source between tokens verbatim, so the
//! parser never needs to see them.

use super::tokens::Token;
use logos::Logos;
use std::ops::Range;

/// Tokenize `source`, pairing each token with its byte range.
///
/// Returns the range of the first unrecognized input (e.g. an unterminated
/// string literal) as the error.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Range<usize>)>, Range<usize>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(Token::Whitespace) => {}
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => return Err(lexer.span()),
        }
    }

    Ok(tokens)
}
