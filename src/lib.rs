//! Parser for GIB, the game record format of the Tygem Go server.
//!
//! ```text
//! \HS
//! \[GAMEBLACKNAME=black\]
//! \[GAMEINFOMAIN=GRLT:3,GTIME:600-20-3\]
//! \HE
//! \GS
//! INI 0 1 0 &4
//! STO 0 1 1 15 3
//! SKI 0 2
//! \GE
//! ```
//!
//! [`parse`] turns such a document into a [`Gib`]: the raw header map plus
//! the ordered game records, with derived views such as [`Gib::moves`] and
//! [`Gib::game_result`].

mod error;
mod gib;
pub mod json;
mod lexer;
mod marker;
mod parser;
mod reader;
mod timecontrol;
mod types;
mod visitor;

use std::str::FromStr;

use tracing::debug;

pub use error::{Error, ParseError, ParseErrorKind};
pub use gib::{Gib, Header};
pub use marker::Marker;
pub use reader::{
    Compression, CompressionError, parse_path, parse_path_with, parse_reader, parse_reader_with,
};
pub use types::{Color, GameProperty, GameResult, Move, TimeSettings};

/// Parses a GIB document held in memory.
///
/// Lexing, parsing and record decoding stop at the first error, which is
/// returned with the position of the offending text.
pub fn parse(source: &str) -> Result<Gib, ParseError> {
    let tokens = lexer::tokenize(source)?;
    let document = parser::parse_document(&tokens)?;
    let gib = visitor::extract_gib(&document)?;
    debug!(
        header = gib.header().len(),
        properties = gib.game().len(),
        "parsed gib"
    );
    Ok(gib)
}

impl FromStr for Gib {
    type Err = ParseError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        parse(source)
    }
}
