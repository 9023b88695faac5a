use std::num::ParseIntError;
use std::str::FromStr;

use tracing::trace;

use crate::error::{ParseError, ParseErrorKind};
use crate::gib::{Gib, Header};
use crate::lexer::Token;
use crate::parser::{Document, HeaderProperty, Record};
use crate::types::{Color, GameProperty};

/// Walks a parse tree and builds the [`Gib`] it describes.
///
/// Record fields are decoded here; the first value that does not decode
/// aborts the walk.
pub fn extract_gib(document: &Document<'_>) -> Result<Gib, ParseError> {
    let header = extract_header(&document.header);
    let game = extract_game(&document.game)?;
    Ok(Gib::new(header, game))
}

fn extract_header(properties: &[HeaderProperty<'_>]) -> Header {
    properties
        .iter()
        .map(|property| {
            (
                property.name.text.to_string(),
                strip_value(property.value.text).to_string(),
            )
        })
        .collect()
}

/// `=value\]` -> `value`
fn strip_value(text: &str) -> &str {
    let text = text.strip_prefix('=').unwrap_or(text);
    text.strip_suffix("\\]").unwrap_or(text)
}

fn extract_game(records: &[Record<'_>]) -> Result<Vec<GameProperty>, ParseError> {
    let mut game = Vec::with_capacity(records.len());
    let mut handicap_declared = false;

    for record in records {
        let property = match record {
            Record::Move {
                move_number,
                color,
                x,
                y,
                ..
            } => GameProperty::Move {
                move_number: parse_int(move_number)?,
                color: parse_color(color)?,
                x: parse_int(x)?,
                y: parse_int(y)?,
            },
            Record::Init { keyword, handicap } => {
                if handicap_declared {
                    return Err(ParseError::new(
                        ParseErrorKind::Semantic,
                        "handicap declared more than once",
                        keyword.marker,
                    ));
                }
                handicap_declared = true;
                GameProperty::Init {
                    handicap: parse_field(handicap, "a non-negative integer")?,
                }
            }
            Record::Pass { move_number, .. } => GameProperty::Pass {
                move_number: parse_int(move_number)?,
            },
            Record::Data(fields) => {
                trace!(fields = fields.len(), "skipping data record");
                continue;
            }
        };
        game.push(property);
    }

    Ok(game)
}

fn parse_field<T>(token: &Token<'_>, expected: &str) -> Result<T, ParseError>
where
    T: FromStr<Err = ParseIntError>,
{
    token.text.parse().map_err(|err| {
        ParseError::new(
            ParseErrorKind::Semantic,
            format!("expected {expected}, but got '{}'", token.text),
            token.marker,
        )
        .with_cause(err)
    })
}

fn parse_int(token: &Token<'_>) -> Result<i32, ParseError> {
    parse_field(token, "an integer")
}

fn parse_color(token: &Token<'_>) -> Result<Color, ParseError> {
    match parse_int(token)? {
        1 => Ok(Color::Black),
        2 => Ok(Color::White),
        _ => Err(ParseError::new(
            ParseErrorKind::Semantic,
            format!("expected either '1' or '2', but got '{}'", token.text),
            token.marker,
        )),
    }
}
