//! Argument list parser
//!
//! Grammar (whitespace already dropped by the lexer):
//!
//! ```text
//! <arguments> = (<node> ("," <node>)* ","?)?
//! <node>      = (<list> | <group> | <map> | <token>)+
//! <list>      = "[" <arguments> "]"
//! <group>     = "(" <arguments> ")"
//! <map>       = "{" (<entry> ("," <entry>)* ","?)? "}"
//! <entry>     = (<word> | <string>) (":" <node>)?
//! <token>     = any token except "," and the delimiters
//! ```
//!
//! A node is deliberately loose: `cond && 'a'` or `a ? 'b' : 'c'` are single
//! nodes made of several token pieces. Computed keys, spreads and unbalanced
//! delimiters are parse errors; callers fall back to the pattern rewrite.

use super::ast::{Entry, Key, Node, Piece};
use super::lexing::tokenize;
use super::tokens::Token;
use chumsky::{prelude::*, Stream};
use std::ops::Range;
use thiserror::Error;

type ParserError = Simple<Token>;

/// Why argument text could not be parsed into nodes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unrecognized input at {}..{}", .span.start, .span.end)]
    Lex { span: Range<usize> },
    #[error("unexpected syntax at {}..{}", .span.start, .span.end)]
    Syntax { span: Range<usize> },
}

/// Parse the argument text of one call into its comma-separated nodes.
pub fn parse_arguments(source: &str) -> Result<Vec<Node>, ParseError> {
    let tokens = tokenize(source).map_err(|span| ParseError::Lex { span })?;
    let end = source.len();
    let stream = Stream::from_iter(end..end, tokens.into_iter());

    arguments().parse(stream).map_err(|errors| ParseError::Syntax {
        span: errors
            .first()
            .map(|error| error.span())
            .unwrap_or(end..end),
    })
}

fn arguments() -> impl Parser<Token, Vec<Node>, Error = ParserError> {
    let node = recursive(|node| {
        let items = node
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing();

        let list = items
            .clone()
            .delimited_by(just(Token::OpenBracket), just(Token::CloseBracket))
            .map_with_span(|items, span| Piece::List { span, items });

        let group = items
            .delimited_by(just(Token::OpenParen), just(Token::CloseParen))
            .map_with_span(|items, span| Piece::Group { span, items });

        let key = filter::<Token, _, ParserError>(|token: &Token| {
            matches!(token, Token::Word | Token::Str)
        })
        .map_with_span(|token, span| Key {
            span,
            quoted: token == Token::Str,
        });

        let entry = key
            .then(just(Token::Colon).ignore_then(node).or_not())
            .map_with_span(|(key, value), span| Entry { span, key, value });

        let map = entry
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .delimited_by(just(Token::OpenBrace), just(Token::CloseBrace))
            .map_with_span(|entries, span| Piece::Map { span, entries });

        let token = filter::<Token, _, ParserError>(|token: &Token| {
            !token.is_open() && !token.is_close() && *token != Token::Comma
        })
        .map_with_span(Piece::Token);

        choice((list, group, map, token))
            .repeated()
            .at_least(1)
            .map_with_span(|pieces, span| Node { span, pieces })
    });

    node.separated_by(just(Token::Comma))
        .allow_trailing()
        .then_ignore(end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text<'a>(source: &'a str, span: &Range<usize>) -> &'a str {
        &source[span.clone()]
    }

    #[test]
    fn test_plain_arguments() {
        let source = "'a', cond && 'b', false";
        let nodes = parse_arguments(source).unwrap();

        assert_eq!(nodes.len(), 3);
        assert_eq!(text(source, nodes[0].as_string().unwrap()), "'a'");
        assert_eq!(nodes[1].pieces.len(), 3);
        assert_eq!(text(source, &nodes[1].span), "cond && 'b'");
        assert_eq!(text(source, &nodes[2].span), "false");
    }

    #[test]
    fn test_map_entries() {
        let source = "{ hover: 'a', 'xs:hover': ['b', false], flex: true, shorthand }";
        let nodes = parse_arguments(source).unwrap();
        assert_eq!(nodes.len(), 1);

        let Piece::Map { entries, .. } = &nodes[0].pieces[0] else {
            panic!("expected a map");
        };
        assert_eq!(entries.len(), 4);

        assert_eq!(text(source, &entries[0].key.span), "hover");
        assert!(!entries[0].key.quoted);
        assert!(entries[0].value.as_ref().unwrap().as_string().is_some());

        assert_eq!(text(source, &entries[1].key.span), "'xs:hover'");
        assert!(entries[1].key.quoted);
        let (_, items) = entries[1].value.as_ref().unwrap().as_list().unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(text(source, &entries[2].span), "flex: true");
        assert!(entries[3].value.is_none());
    }

    #[test]
    fn test_ternary_is_one_node() {
        let source = "active ? 'a' : 'b', 'c'";
        let nodes = parse_arguments(source).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(text(source, &nodes[0].span), "active ? 'a' : 'b'");
    }

    #[test]
    fn test_nested_groups() {
        let source = "fn(a, { b: 'c' }), [1, [2]]";
        let nodes = parse_arguments(source).unwrap();
        assert_eq!(nodes.len(), 2);
        assert!(matches!(nodes[0].pieces[1], Piece::Group { .. }));
        assert_eq!(text(source, nodes[0].pieces[1].span()), "(a, { b: 'c' })");
        assert!(nodes[1].as_list().is_some());
    }

    #[test]
    fn test_empty_and_trailing_comma() {
        assert_eq!(parse_arguments("").unwrap(), vec![]);
        assert_eq!(parse_arguments("'a',").unwrap().len(), 1);
        assert_eq!(parse_arguments("{}").unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_unsupported_syntax() {
        assert!(matches!(
            parse_arguments("{ ...rest }"),
            Err(ParseError::Syntax { .. })
        ));
        assert!(matches!(
            parse_arguments("{ [key]: 'a' }"),
            Err(ParseError::Syntax { .. })
        ));
        assert!(matches!(
            parse_arguments("'a', 'b"),
            Err(ParseError::Lex { .. })
        ));
        assert!(parse_arguments("'a',, 'b'").is_err());
        assert!(parse_arguments("{ a: }").is_err());
    }
}
