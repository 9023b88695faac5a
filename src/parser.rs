//! Recursive-descent parser over the token stream.
//!
//! ```text
//! document := NL* header NL* game NL* EOF
//! header   := "\HS" NL (NL | property NL)* "\HE"
//! property := "\[" name VALUE
//! game     := "\GS" NL (NL | record NL)* "\GE"
//! record   := "STO" atom atom atom atom atom
//!           | "SKI" atom atom
//!           | "INI" atom atom atom REFERENCE?
//!           | (INTEGER | REFERENCE)+
//! ```

use tracing::debug;

use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Token, TokenKind};
use crate::marker::Marker;

/// Parse tree of a whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'src> {
    pub header: Vec<HeaderProperty<'src>>,
    pub game: Vec<Record<'src>>,
}

/// `\[NAME=value\]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderProperty<'src> {
    pub name: Token<'src>,
    pub value: Token<'src>,
}

/// One line of the game block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record<'src> {
    /// `STO 0 <move number> <color> <x> <y>`
    Move {
        move_number: Token<'src>,
        color: Token<'src>,
        x: Token<'src>,
        y: Token<'src>,
    },
    /// `SKI 0 <move number>`
    Pass {
        move_number: Token<'src>,
    },
    /// `INI 0 1 <handicap> &4`
    Init {
        keyword: Token<'src>,
        handicap: Token<'src>,
    },
    /// Rows of bare integers and references that carry no game properties.
    Data(Vec<Token<'src>>),
}

pub fn parse_document<'src>(tokens: &[Token<'src>]) -> Result<Document<'src>, ParseError> {
    let mut parser = Parser { tokens, pos: 0 };
    let document = parser.document()?;
    debug!(
        header = document.header.len(),
        records = document.game.len(),
        "parsed gib document"
    );
    Ok(document)
}

struct Parser<'t, 'src> {
    tokens: &'t [Token<'src>],
    pos: usize,
}

impl<'t, 'src> Parser<'t, 'src> {
    fn current(&self) -> Token<'src> {
        // Eof is never consumed, so past the end we keep seeing the last token.
        match self.tokens.get(self.pos).or(self.tokens.last()) {
            Some(token) => *token,
            None => Token {
                kind: TokenKind::Eof,
                text: "",
                marker: Marker::new(1, 1, 1, 1),
            },
        }
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn advance(&mut self) -> Token<'src> {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'src>, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let found = self.current();
        let found_text = match found.kind {
            TokenKind::Newline | TokenKind::Eof | TokenKind::Value => {
                found.kind.describe().to_string()
            }
            _ => format!("'{}'", found.text),
        };

        ParseError::new(
            ParseErrorKind::Syntax,
            format!("expected {expected}, found {found_text}"),
            found.marker,
        )
    }

    fn skip_newlines(&mut self) {
        while self.at(TokenKind::Newline) {
            self.advance();
        }
    }

    fn document(&mut self) -> Result<Document<'src>, ParseError> {
        self.skip_newlines();
        let header = self.header()?;
        self.skip_newlines();
        let game = self.game()?;
        self.skip_newlines();
        self.expect(TokenKind::Eof)?;

        Ok(Document { header, game })
    }

    fn header(&mut self) -> Result<Vec<HeaderProperty<'src>>, ParseError> {
        self.expect(TokenKind::HeaderStart)?;
        self.expect(TokenKind::Newline)?;

        let mut properties = Vec::new();
        loop {
            match self.current().kind {
                TokenKind::Newline => {
                    self.advance();
                }
                TokenKind::HeaderEnd => {
                    self.advance();
                    return Ok(properties);
                }
                TokenKind::PropertyOpen => {
                    properties.push(self.property()?);
                    self.expect(TokenKind::Newline)?;
                }
                _ => return Err(self.unexpected("'\\[' or '\\HE'")),
            }
        }
    }

    fn property(&mut self) -> Result<HeaderProperty<'src>, ParseError> {
        self.expect(TokenKind::PropertyOpen)?;
        let name = match self.current().kind {
            TokenKind::Identifier | TokenKind::Sto | TokenKind::Ini | TokenKind::Ski => {
                self.advance()
            }
            _ => return Err(self.unexpected("property identifier")),
        };
        let value = self.expect(TokenKind::Value)?;

        Ok(HeaderProperty { name, value })
    }

    fn game(&mut self) -> Result<Vec<Record<'src>>, ParseError> {
        self.expect(TokenKind::GameStart)?;
        self.expect(TokenKind::Newline)?;

        let mut records = Vec::new();
        loop {
            match self.current().kind {
                TokenKind::Newline => {
                    self.advance();
                }
                TokenKind::GameEnd => {
                    self.advance();
                    return Ok(records);
                }
                _ => {
                    records.push(self.record()?);
                    self.expect(TokenKind::Newline)?;
                }
            }
        }
    }

    fn record(&mut self) -> Result<Record<'src>, ParseError> {
        match self.current().kind {
            TokenKind::Sto => {
                self.advance();
                self.atom()?;
                let move_number = self.atom()?;
                let color = self.atom()?;
                let x = self.atom()?;
                let y = self.atom()?;
                Ok(Record::Move {
                    move_number,
                    color,
                    x,
                    y,
                })
            }
            TokenKind::Ski => {
                self.advance();
                self.atom()?;
                let move_number = self.atom()?;
                Ok(Record::Pass { move_number })
            }
            TokenKind::Ini => {
                let keyword = self.advance();
                self.atom()?;
                self.atom()?;
                let handicap = self.atom()?;
                if self.at(TokenKind::Reference) {
                    self.advance();
                }
                Ok(Record::Init { keyword, handicap })
            }
            TokenKind::Integer | TokenKind::Reference => {
                let mut fields = Vec::new();
                while matches!(
                    self.current().kind,
                    TokenKind::Integer | TokenKind::Reference
                ) {
                    fields.push(self.advance());
                }
                Ok(Record::Data(fields))
            }
            _ => Err(self.unexpected("'STO', 'SKI', 'INI' or '\\GE'")),
        }
    }

    /// A record field. Identifiers are accepted here and rejected while
    /// decoding, so the error can name the expected value.
    fn atom(&mut self) -> Result<Token<'src>, ParseError> {
        match self.current().kind {
            TokenKind::Integer | TokenKind::Identifier => Ok(self.advance()),
            _ => Err(self.unexpected("integer")),
        }
    }
}
