use std::error::Error as StdError;
use std::io;

use thiserror::Error;

use crate::marker::Marker;

/// The stage of the parse pipeline that rejected the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Characters that do not form any token.
    Lexical,
    /// Tokens that do not fit the document grammar.
    Syntax,
    /// Well-formed records holding values that cannot be decoded.
    Semantic,
}

/// An error that occurred while parsing a GIB document.
///
/// Parsing stops at the first error, so a failed parse yields exactly one of
/// these.
#[derive(Debug, Error)]
#[error(
    "gib parse error, on line {}, column {}: {description}",
    marker.start_line,
    marker.start_column
)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub description: String,
    pub marker: Marker,
    #[source]
    pub cause: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, description: impl Into<String>, marker: Marker) -> Self {
        Self {
            kind,
            description: description.into(),
            marker,
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl StdError + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

/// Errors from the path and reader entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("failed to read gib source: {0}")]
    Io(#[from] io::Error),
}
