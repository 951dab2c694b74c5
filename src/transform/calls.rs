//! Call-site discovery
//!
//! A call site is a callee name at an identifier boundary followed by `(`.
//! The argument range is found with a parenthesis scan that steps over string
//! literals and comments, so nested calls and parentheses inside strings or
//! comments do not cut the arguments short.

use regex::Regex;
use std::ops::Range;

/// A located assembler call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// The whole call, callee through closing parenthesis
    pub span: Range<usize>,
    /// Text between the parentheses
    pub arguments: Range<usize>,
}

/// Build the regex matching `callee(` for any of `callees`.
///
/// Returns `None` when no non-empty callee name is given.
pub fn callee_pattern<S: AsRef<str>>(callees: &[S]) -> Option<Regex> {
    let alternatives: Vec<String> = callees
        .iter()
        .map(|callee| callee.as_ref())
        .filter(|callee| !callee.is_empty())
        .map(regex::escape)
        .collect();
    if alternatives.is_empty() {
        return None;
    }
    Regex::new(&format!(r"\b(?:{})\s*\(", alternatives.join("|"))).ok()
}

/// Find every top-level call site in `source`, in order.
///
/// Calls nested inside another call's arguments are part of the outer call
/// and are not reported separately. A callee whose parenthesis never closes
/// (a mention in a comment, a half-typed call) is skipped and the scan goes
/// on from just after it.
pub fn call_sites(source: &str, pattern: &Regex) -> Vec<CallSite> {
    let mut sites = Vec::new();
    let mut from = 0;

    while let Some(found) = pattern.find_at(source, from) {
        from = found.end();
        if !is_identifier_start(source, found.start()) {
            continue;
        }
        let open = found.end() - 1;
        let Some(close) = matching_paren(source, open) else {
            continue;
        };
        sites.push(CallSite {
            span: found.start()..close + 1,
            arguments: open + 1..close,
        });
        from = close + 1;
    }

    sites
}

// `$` is not a regex word character, so `\b` alone accepts `$classnames(`.
fn is_identifier_start(source: &str, idx: usize) -> bool {
    source[..idx]
        .chars()
        .next_back()
        .map_or(true, |c| !(c.is_alphanumeric() || c == '_' || c == '$'))
}

/// Byte index of the `)` matching the `(` at `open`.
///
/// String literals and comments are skipped over. An unterminated literal or
/// block comment means there is no match.
fn matching_paren(source: &str, open: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut idx = open;

    while idx < bytes.len() {
        match bytes[idx] {
            quote @ (b'"' | b'\'' | b'`') => idx = string_end(bytes, idx, quote)?,
            b'/' if bytes.get(idx + 1) == Some(&b'/') => {
                idx = source[idx..].find('\n').map(|end| idx + end)?;
            }
            b'/' if bytes.get(idx + 1) == Some(&b'*') => {
                idx = source[idx + 2..].find("*/").map(|end| idx + 2 + end + 1)?;
            }
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
        idx += 1;
    }

    None
}

/// Index of the quote closing the literal opened at `start`.
fn string_end(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut idx = start + 1;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' => idx += 2,
            b if b == quote => return Some(idx),
            _ => idx += 1,
        }
    }
    None
}
