//! Flattening of parsed arguments back into text
//!
//! The emitter walks the nodes in source order and copies the argument text
//! through, except where a map needs flattening:
//!
//! - `{` and `}` of every map are dropped;
//! - `key: 'value'` becomes `"key:value"`;
//! - `key: [ items ]` becomes the items text with every string literal in it
//!   rewritten to `"key:literal"`.
//!
//! Any other entry (`flag: true`, `key: cond && 'x'`, shorthand) is copied as
//! written, after flattening maps nested inside it.

use super::ast::{Entry, Node, Piece, Span};
use super::tokens::{unquote, Token};

pub(crate) struct Emitter<'s> {
    source: &'s str,
    out: String,
    cursor: usize,
}

impl<'s> Emitter<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            out: String::with_capacity(source.len()),
            cursor: 0,
        }
    }

    pub fn emit_all(mut self, nodes: &[Node]) -> String {
        for node in nodes {
            self.node(node, None);
        }
        self.copy_to(self.source.len());
        self.out
    }

    fn node(&mut self, node: &Node, modifier: Option<&str>) {
        for piece in &node.pieces {
            self.piece(piece, modifier);
        }
    }

    fn piece(&mut self, piece: &Piece, modifier: Option<&str>) {
        match piece {
            Piece::Token(Token::Str, span) => {
                if let Some(modifier) = modifier {
                    let literal = unquote(&self.source[span.clone()]);
                    self.replace(span, &prefixed_literal(modifier, literal));
                }
            }
            Piece::Token(..) => {}
            Piece::List { items, .. } | Piece::Group { items, .. } => {
                for item in items {
                    self.node(item, modifier);
                }
            }
            Piece::Map { span, entries } => {
                self.skip(span.start..span.start + 1);
                for entry in entries {
                    self.entry(entry);
                }
                self.skip(span.end - 1..span.end);
            }
        }
    }

    fn entry(&mut self, entry: &Entry) {
        let Some(value) = &entry.value else {
            return;
        };
        let source = self.source;
        let modifier = unquote(&source[entry.key.span.clone()]);

        if let Some(literal) = value.as_string() {
            let class = unquote(&source[literal.clone()]);
            self.replace(&entry.span, &prefixed_literal(modifier, class));
        } else if let Some((list, items)) = value.as_list() {
            // Everything from the key up to and including `[` goes, as does `]`.
            self.skip(entry.key.span.start..list.start + 1);
            for item in items {
                self.node(item, Some(modifier));
            }
            self.skip(list.end - 1..list.end);
        } else {
            self.node(value, None);
        }
    }

    fn copy_to(&mut self, pos: usize) {
        if pos > self.cursor {
            self.out.push_str(&self.source[self.cursor..pos]);
            self.cursor = pos;
        }
    }

    fn skip(&mut self, span: Span) {
        self.copy_to(span.start);
        self.cursor = self.cursor.max(span.end);
    }

    fn replace(&mut self, span: &Span, text: &str) {
        self.skip(span.clone());
        self.out.push_str(text);
    }
}

/// `"modifier:class"`, with any bare `"` in either part escaped.
pub(crate) fn prefixed_literal(modifier: &str, class: &str) -> String {
    let mut out = String::with_capacity(modifier.len() + class.len() + 3);
    out.push('"');
    push_escaped(&mut out, modifier);
    out.push(':');
    push_escaped(&mut out, class);
    out.push('"');
    out
}

/// Append `text`, escaping each `"` that is not already escaped.
fn push_escaped(out: &mut String, text: &str) {
    let mut escaped = false;
    for ch in text.chars() {
        if ch == '"' && !escaped {
            out.push('\\');
        }
        escaped = ch == '\\' && !escaped;
        out.push(ch);
    }
}
