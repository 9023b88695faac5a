//! Tokens of the GIB format.
//!
//! A GIB document is line oriented: a `\HS` ... `\HE` block of
//! `\[NAME=value\]` header lines, followed by a `\GS` ... `\GE` block with
//! one game record per line.

use logos::{Lexer, Logos};
use tracing::trace;

use crate::error::{ParseError, ParseErrorKind};
use crate::marker::{LineIndex, Marker};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\x0C]+")]
pub enum TokenKind {
    #[token("\\HS")]
    HeaderStart,
    #[token("\\HE")]
    HeaderEnd,
    #[token("\\GS")]
    GameStart,
    #[token("\\GE")]
    GameEnd,
    #[token("\\[")]
    PropertyOpen,

    /// `=value\]`; runs to the first `\]` on the same line.
    #[token("=", header_value)]
    Value,

    #[token("STO")]
    Sto,
    #[token("INI")]
    Ini,
    #[token("SKI")]
    Ski,

    #[regex(r"-?[0-9]+")]
    Integer,
    #[regex(r"&[0-9]+")]
    Reference,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    #[regex(r"\r?\n")]
    Newline,

    Eof,
}

fn header_value(lex: &mut Lexer<TokenKind>) -> bool {
    let rest = lex.remainder();
    let line = rest.find(['\r', '\n']).map_or(rest, |end| &rest[..end]);

    match line.find("\\]") {
        Some(close) => {
            lex.bump(close + 2);
            true
        }
        None => false,
    }
}

impl TokenKind {
    /// Human readable name used in syntax errors.
    pub fn describe(self) -> &'static str {
        match self {
            Self::HeaderStart => "'\\HS'",
            Self::HeaderEnd => "'\\HE'",
            Self::GameStart => "'\\GS'",
            Self::GameEnd => "'\\GE'",
            Self::PropertyOpen => "'\\['",
            Self::Value => "property value",
            Self::Sto => "'STO'",
            Self::Ini => "'INI'",
            Self::Ski => "'SKI'",
            Self::Integer => "integer",
            Self::Reference => "reference",
            Self::Identifier => "identifier",
            Self::Newline => "end of line",
            Self::Eof => "end of input",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub marker: Marker,
}

/// Splits `source` into tokens. The returned list always ends with
/// [`TokenKind::Eof`].
///
/// The first unrecognized character sequence aborts tokenizing.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let index = LineIndex::build(source);
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let marker = index.marker(source, span.clone());
        let text = lexer.slice();

        match result {
            Ok(kind) => tokens.push(Token { kind, text, marker }),
            Err(()) => {
                return Err(ParseError::new(
                    ParseErrorKind::Lexical,
                    format!("unexpected character(s) '{}'", text.escape_debug()),
                    marker,
                ));
            }
        }
    }

    let end = source.len();
    tokens.push(Token {
        kind: TokenKind::Eof,
        text: "",
        marker: index.marker(source, end..end),
    });

    trace!(count = tokens.len(), "tokenized gib source");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_block_markers() {
        assert_eq!(
            kinds("\\HS\n\\HE\n\\GS\n\\GE"),
            vec![
                TokenKind::HeaderStart,
                TokenKind::Newline,
                TokenKind::HeaderEnd,
                TokenKind::Newline,
                TokenKind::GameStart,
                TokenKind::Newline,
                TokenKind::GameEnd,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_header_property() {
        let tokens = tokenize("\\[GAMEPLACE=Tygem Baduk\\]\r\n").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::PropertyOpen);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].text, "GAMEPLACE");
        assert_eq!(tokens[2].kind, TokenKind::Value);
        assert_eq!(tokens[2].text, "=Tygem Baduk\\]");
        assert_eq!(tokens[3].kind, TokenKind::Newline);
        assert_eq!(tokens[3].text, "\r\n");
    }

    #[test]
    fn test_value_keeps_separators_and_stops_at_first_close() {
        let tokens = tokenize("\\[GAMEDATE=2020- 8- 4-11- 7-47\\]\\[X=1\\]").unwrap();
        assert_eq!(tokens[2].text, "=2020- 8- 4-11- 7-47\\]");
        assert_eq!(tokens[3].kind, TokenKind::PropertyOpen);
    }

    #[test]
    fn test_empty_value() {
        let tokens = tokenize("\\[GAMEPLACE=\\]").unwrap();
        assert_eq!(tokens[2].kind, TokenKind::Value);
        assert_eq!(tokens[2].text, "=\\]");
    }

    #[test]
    fn test_unterminated_value_is_lexical_error() {
        let err = tokenize("\\HS\n\\[GAMEPLACE=Tygem\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Lexical);
        assert_eq!(err.marker.start_line, 2);
        assert_eq!(err.marker.start_column, 12);
    }

    #[test]
    fn test_record_tokens() {
        assert_eq!(
            kinds("STO 0 2 1 15 15\nINI 0 1 2 &4\nSKI 0 7"),
            vec![
                TokenKind::Sto,
                TokenKind::Integer,
                TokenKind::Integer,
                TokenKind::Integer,
                TokenKind::Integer,
                TokenKind::Integer,
                TokenKind::Newline,
                TokenKind::Ini,
                TokenKind::Integer,
                TokenKind::Integer,
                TokenKind::Integer,
                TokenKind::Reference,
                TokenKind::Newline,
                TokenKind::Ski,
                TokenKind::Integer,
                TokenKind::Integer,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let tokens = tokenize("STONE").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_token_markers() {
        let tokens = tokenize("\\GS\nSTO 0 12 1 3 3").unwrap();
        let move_number = tokens[4];
        assert_eq!(move_number.text, "12");
        assert_eq!(move_number.marker, Marker::new(2, 7, 2, 9));
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("\\GS\nSTO 0 1 $ 3 3").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Lexical);
        assert!(err.description.contains('$'));
        assert_eq!(err.marker, Marker::new(2, 9, 2, 10));
    }

    #[test]
    fn test_eof_marker_follows_last_line() {
        let tokens = tokenize("\\GE\n").unwrap();
        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.marker, Marker::new(2, 1, 2, 1));
    }
}
