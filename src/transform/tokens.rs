//! Token definitions for assembler call arguments
//!
//! The argument text of a call is JS/TS-like source. Only the structure the
//! transformer cares about gets its own token (brackets, separators, string
//! literals); everything else collapses into `Word` or `Punct` and is copied
//! through verbatim.
use logos::Logos;

#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Token {
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,

    // Quoted literal, any of the three JS quote styles. Escapes are kept as-is.
    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    #[regex(r"`([^`\\]|\\.)*`")]
    Str,

    // Identifiers, keywords, numbers and dashed bare keys like `opacity-50`
    #[regex(r"[A-Za-z0-9_$\-]+")]
    Word,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    // Operators and anything else that is not structural
    #[regex(r"[^ \t\r\n\f{}\[\](),:'`A-Za-z0-9_$\x22\-]+")]
    Punct,
}

impl Token {
    /// Opening delimiter of a nested group
    pub fn is_open(&self) -> bool {
        matches!(self, Token::OpenBrace | Token::OpenBracket | Token::OpenParen)
    }

    /// Closing delimiter of a nested group
    pub fn is_close(&self) -> bool {
        matches!(
            self,
            Token::CloseBrace | Token::CloseBracket | Token::CloseParen
        )
    }
}

/// Strip the surrounding quote characters of a `Str` token's text.
pub fn unquote(literal: &str) -> &str {
    let mut chars = literal.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) if open == close && matches!(open, '"' | '\'' | '`') => {
            &literal[1..literal.len() - 1]
        }
        _ => literal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<Token> {
        Token::lexer(source).map(|t| t.unwrap()).collect()
    }

    #[test]
    fn test_structural_tokens() {
        assert_eq!(
            lex_all("{[(,:)]}"),
            vec![
                Token::OpenBrace,
                Token::OpenBracket,
                Token::OpenParen,
                Token::Comma,
                Token::Colon,
                Token::CloseParen,
                Token::CloseBracket,
                Token::CloseBrace,
            ]
        );
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(lex_all(r#"'a' "b:c" `d`"#), {
            use Token::*;
            vec![Str, Whitespace, Str, Whitespace, Str]
        });
        assert_eq!(lex_all(r#""with \" escape""#), vec![Token::Str]);
        assert_eq!(lex_all("'has, comma'"), vec![Token::Str]);
    }

    #[test]
    fn test_words_and_punct() {
        assert_eq!(
            lex_all("opacity-50 && $flag"),
            vec![
                Token::Word,
                Token::Whitespace,
                Token::Punct,
                Token::Whitespace,
                Token::Word
            ]
        );
    }

    #[test]
    fn test_unterminated_string_is_an_error() {
        let results: Vec<_> = Token::lexer("'open").collect();
        assert!(results.iter().any(|r| r.is_err()));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("'a'"), "a");
        assert_eq!(unquote("\"xs:hover\""), "xs:hover");
        assert_eq!(unquote("`b`"), "b");
        assert_eq!(unquote("hover"), "hover");
        assert_eq!(unquote("'"), "'");
    }
}
