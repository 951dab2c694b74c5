//! Structured form of call arguments
//!
//! Nodes only record byte ranges into the argument text. The emitter rebuilds
//! output by copying source slices, so anything the parser does not model
//! (operators, identifiers, whitespace) survives untouched.

use super::tokens::Token;
use std::ops::Range;

pub type Span = Range<usize>;

/// One comma-separated element: an argument, a list item or an entry value
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub span: Span,
    pub pieces: Vec<Piece>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Piece {
    Token(Token, Span),
    /// `[ ... ]`
    List { span: Span, items: Vec<Node> },
    /// `( ... )`
    Group { span: Span, items: Vec<Node> },
    /// `{ ... }`
    Map { span: Span, entries: Vec<Entry> },
}

/// `key: value` inside a map; `value` is `None` for shorthand `{ key }`
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub span: Span,
    pub key: Key,
    pub value: Option<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    pub span: Span,
    pub quoted: bool,
}

impl Node {
    /// Span of the literal if this node is exactly one string literal.
    pub fn as_string(&self) -> Option<&Span> {
        match self.pieces.as_slice() {
            [Piece::Token(Token::Str, span)] => Some(span),
            _ => None,
        }
    }

    /// Span and items if this node is exactly one list literal.
    pub fn as_list(&self) -> Option<(&Span, &[Node])> {
        match self.pieces.as_slice() {
            [Piece::List { span, items }] => Some((span, items.as_slice())),
            _ => None,
        }
    }
}

impl Piece {
    pub fn span(&self) -> &Span {
        match self {
            Piece::Token(_, span) => span,
            Piece::List { span, .. } | Piece::Group { span, .. } | Piece::Map { span, .. } => span,
        }
    }
}
