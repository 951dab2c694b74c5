//! Source transformer
//!
//! Rewrites assembler calls in raw source text so that every class name the
//! call can produce appears as a plain string literal, modifiers included.
//! Purge tools that only scan for string literals can then see classes that
//! only exist after prefixing at runtime:
//!
//! ```text
//! classnames('a', { hover: 'b', 'xs:focus': ['c', on && 'd'] })
//! classnames('a',  "hover:b", "xs:focus:c", on && "xs:focus:d" )
//! ```
//!
//! Within each call the arguments are first joined onto one line, dropping
//! any comments. Then, for
//! every map literal, `key: 'value'` entries become `"key:value"`, `key: [..]`
//! entries become their items with each string literal prefixed `key:`, and
//! the braces are dropped. Everything else in the source is left alone.
//!
//! # Strategies
//!
//! - [`Strategy::Structured`] (default) tokenizes and parses the arguments, so
//!   nested parentheses and braces inside arguments are handled. Calls whose
//!   arguments cannot be parsed are rewritten with the pattern strategy.
//! - [`Strategy::Pattern`] works on flat text with regexes only and stops a
//!   call at its first `)`.
//!
//! Both are pure text-to-text functions, and running either on its own output
//! changes nothing.

mod ast;
pub mod calls;
mod emit;
mod lexing;
mod parser;
pub mod pattern;
mod tokens;

pub use ast::{Entry, Key, Node, Piece, Span};
pub use lexing::tokenize;
pub use parser::{parse_arguments, ParseError};
pub use tokens::{unquote, Token};

use calls::CallSite;
use emit::Emitter;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Callee the default transformer looks for
pub const DEFAULT_CALLEE: &str = "classnames";

static DEFAULT_TRANSFORMER: Lazy<Transformer> = Lazy::new(Transformer::default);

/// Rewrite every `classnames(...)` call in `source` with the default settings.
pub fn transform(source: &str) -> String {
    DEFAULT_TRANSFORMER.transform(source)
}

/// How call arguments are rewritten
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    Structured,
    Pattern,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "structured" => Ok(Strategy::Structured),
            "pattern" => Ok(Strategy::Pattern),
            other => Err(format!(
                "unknown strategy '{}' (expected 'structured' or 'pattern')",
                other
            )),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Structured => write!(f, "structured"),
            Strategy::Pattern => write!(f, "pattern"),
        }
    }
}

/// A configured source transformer
#[derive(Debug, Clone)]
pub struct Transformer {
    callees: Vec<String>,
    strategy: Strategy,
    call_site: Option<Regex>,
    flat_call: Option<Regex>,
}

impl Transformer {
    /// Transformer for calls to any of `callees`.
    pub fn new<I, S>(callees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let callees: Vec<String> = callees.into_iter().map(Into::into).collect();
        Self {
            call_site: calls::callee_pattern(&callees),
            flat_call: pattern::call_pattern(&callees),
            callees,
            strategy: Strategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn callees(&self) -> &[String] {
        &self.callees
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Rewrite every call site in `source`.
    pub fn transform(&self, source: &str) -> String {
        match self.strategy {
            Strategy::Pattern => match &self.flat_call {
                Some(call) => pattern::transform_source(source, call),
                None => source.to_string(),
            },
            Strategy::Structured => self.transform_structured(source),
        }
    }

    /// Call sites this transformer would rewrite in `source`.
    pub fn call_sites(&self, source: &str) -> Vec<CallSite> {
        match &self.call_site {
            Some(pattern) => calls::call_sites(source, pattern),
            None => Vec::new(),
        }
    }

    fn transform_structured(&self, source: &str) -> String {
        let sites = self.call_sites(source);
        if sites.is_empty() {
            return source.to_string();
        }

        let mut out = String::with_capacity(source.len());
        let mut cursor = 0;
        for site in sites {
            out.push_str(&source[cursor..site.arguments.start]);
            out.push_str(&rewrite_arguments(&source[site.arguments.clone()]));
            cursor = site.arguments.end;
        }
        out.push_str(&source[cursor..]);
        out
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new([DEFAULT_CALLEE])
    }
}

/// Flatten one call's argument text, falling back to the pattern rewrite
/// when it does not parse.
pub fn rewrite_arguments(arguments: &str) -> String {
    let arguments = join_lines(arguments);
    match parse_arguments(&arguments) {
        Ok(nodes) => {
            tracing::debug!(arguments = nodes.len(), "flattening call arguments");
            Emitter::new(&arguments).emit_all(&nodes)
        }
        Err(err) => {
            tracing::debug!(error = %err, "arguments did not parse, using pattern rewrite");
            pattern::rewrite_arguments(&arguments)
        }
    }
}

/// Join argument text onto one line.
///
/// `\n` and `\r` are removed everywhere. Comments outside string literals are
/// removed too, or a `//` comment would swallow the arguments that follow it
/// once the lines are joined. `'` and `"` literals end at a line break.
pub(crate) fn join_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\n' || ch == '\r' {
            if quote != Some('`') {
                quote = None;
            }
            escaped = false;
            continue;
        }
        if let Some(q) = quote {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match (ch, chars.peek()) {
            ('/', Some('/')) => {
                while chars.next_if(|c| *c != '\n').is_some() {}
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            ('"' | '\'' | '`', _) => {
                quote = Some(ch);
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_calls_is_a_no_op() {
        let source = "const x = { hover: 'a' };\nexport default x;\n";
        assert_eq!(transform(source), source);
    }

    #[test]
    fn test_flattens_map_arguments() {
        assert_eq!(
            transform("<div className={classnames('a', {hover: 'border-4'})} />"),
            "<div className={classnames('a', \"hover:border-4\")} />"
        );
    }

    #[test]
    fn test_multiline_call() {
        let source = "classnames(\n  'text-sm',\n  { 'md:dark': ['p-2', 'm-1'] },\n)";
        assert_eq!(
            transform(source),
            "classnames(  'text-sm',   \"md:dark:p-2\", \"md:dark:m-1\" ,)"
        );
    }

    #[test]
    fn test_join_lines_drops_comments() {
        assert_eq!(join_lines("'a',\n  // don't\n  'b'"), "'a',    'b'");
        assert_eq!(join_lines("'a', /* it's\n here */ 'b'"), "'a',  'b'");
        assert_eq!(join_lines("'http://x', \"/*\""), "'http://x', \"/*\"");
        assert_eq!(join_lines("a / b"), "a / b");
    }

    #[test]
    fn test_later_calls_survive_an_unclosed_mention() {
        let source = "// wraps classnames( for buttons\nconst x = classnames({md: 'a'});\n";
        assert_eq!(
            transform(source),
            "// wraps classnames( for buttons\nconst x = classnames(\"md:a\");\n"
        );
    }

    #[test]
    fn test_line_comment_inside_call() {
        let source = "const a = classnames(\n  // don't\n  {md: 'a'}\n);\nconst b = classnames({lg: 'b'});\n";
        assert_eq!(
            transform(source),
            "const a = classnames(    \"md:a\");\nconst b = classnames(\"lg:b\");\n"
        );
    }

    #[test]
    fn test_nested_parens_are_handled() {
        assert_eq!(
            transform("classnames(f(x), {md: 'a'})"),
            "classnames(f(x), \"md:a\")"
        );
    }

    #[test]
    fn test_falls_back_on_unparseable_arguments() {
        assert_eq!(
            transform("classnames({...base, hover: 'a'})"),
            "classnames(...base, \"hover:a\")"
        );
    }

    #[test]
    fn test_pattern_strategy() {
        let transformer = Transformer::default().with_strategy(Strategy::Pattern);
        assert_eq!(
            transformer.transform("classnames(f(x), {md: 'a'})"),
            "classnames(f(x), {md: 'a'})"
        );
        assert_eq!(
            transformer.transform("classnames({md: 'a'})"),
            "classnames(\"md:a\")"
        );
    }

    #[test]
    fn test_custom_callees() {
        let transformer = Transformer::new(["tw", "cx"]);
        assert_eq!(
            transformer.transform("tw({md: 'a'}) + cx({lg: 'b'}) + classnames({sm: 'c'})"),
            "tw(\"md:a\") + cx(\"lg:b\") + classnames({sm: 'c'})"
        );
    }

    #[test]
    fn test_no_callees_is_a_no_op() {
        let transformer = Transformer::new(Vec::<String>::new());
        let source = "classnames({md: 'a'})";
        assert_eq!(transformer.transform(source), source);
        assert_eq!(
            transformer
                .with_strategy(Strategy::Pattern)
                .transform(source),
            source
        );
    }

    #[test]
    fn test_idempotent() {
        let source = "classnames('a', { hover: 'b', 'xs:focus': ['c', on && 'd'] }, e ? 'f' : 'g')";
        let once = transform(source);
        assert_eq!(transform(&once), once);
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("pattern".parse::<Strategy>().unwrap(), Strategy::Pattern);
        assert_eq!(
            "structured".parse::<Strategy>().unwrap(),
            Strategy::Structured
        );
        assert!("regex".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Pattern.to_string(), "pattern");
    }
}
