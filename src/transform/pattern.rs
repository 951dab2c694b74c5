//! Regex-only rewrite of call arguments
//!
//! This is the flat-text variant of the transform: calls are matched with a
//! single-level `callee([^)]*)` pattern and the arguments are rewritten with
//! three substitutions. It cannot see nesting, so a `)` inside the arguments
//! ends the match early and every `{`/`}` in the arguments is dropped, map or
//! not. The structured transform falls back to [`rewrite_arguments`] when it
//! cannot parse a call.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::emit::prefixed_literal;

static LIST_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(['"]?[\w:-]+['"]?):\s*\[([^\]]*)\]"#).unwrap());
static QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)""#).unwrap());
static STRING_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(['"]?[\w:-]+['"]?):\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")"#).unwrap()
});
static BRACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[{}]").unwrap());

/// Build the single-level call regex for `callees`.
///
/// Group 1 is the callee, group 2 the argument text.
pub fn call_pattern<S: AsRef<str>>(callees: &[S]) -> Option<Regex> {
    let alternatives: Vec<String> = callees
        .iter()
        .map(|callee| callee.as_ref())
        .filter(|callee| !callee.is_empty())
        .map(regex::escape)
        .collect();
    if alternatives.is_empty() {
        return None;
    }
    Regex::new(&format!(r"\b({})\(([^)]*)\)", alternatives.join("|"))).ok()
}

/// Rewrite every call matched by `call` in `source`.
pub fn transform_source(source: &str, call: &Regex) -> String {
    call.replace_all(source, |caps: &Captures| {
        let arguments = super::join_lines(&caps[2]);
        format!("{}({})", &caps[1], rewrite_arguments(&arguments))
    })
    .into_owned()
}

/// Flatten the map entries of one call's (newline-free) argument text.
pub fn rewrite_arguments(arguments: &str) -> String {
    let lists = LIST_ENTRY.replace_all(arguments, |caps: &Captures| {
        let modifier = strip_quotes(&caps[1]);
        QUOTED
            .replace_all(&caps[2], |item: &Captures| {
                prefixed_literal(&modifier, quoted_text(item, 1))
            })
            .into_owned()
    });
    let strings = STRING_ENTRY.replace_all(&lists, |caps: &Captures| {
        prefixed_literal(&strip_quotes(&caps[1]), quoted_text(caps, 2))
    });
    BRACES.replace_all(&strings, "").into_owned()
}

/// Text of whichever quote style matched, from groups `first` and `first + 1`.
fn quoted_text<'t>(caps: &Captures<'t>, first: usize) -> &'t str {
    caps.get(first)
        .or_else(|| caps.get(first + 1))
        .map_or("", |m| m.as_str())
}

fn strip_quotes(key: &str) -> String {
    key.replace(['\'', '"'], "")
}
