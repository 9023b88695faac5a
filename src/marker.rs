use std::fmt;
use std::ops::Range;

/// A position range in a GIB document.
///
/// Lines and columns are 1-based. Columns count characters from the start of
/// the line, and `end_column` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl Marker {
    pub const fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}

/// Byte offsets of every line start, for turning lexer spans into markers.
#[derive(Debug, Clone)]
pub(crate) struct LineIndex {
    offsets: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn build(source: &str) -> Self {
        let mut offsets = vec![0];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(i + 1);
            }
        }
        Self { offsets }
    }

    /// 1-based (line, column) of a byte offset.
    pub(crate) fn line_col(&self, source: &str, offset: usize) -> (u32, u32) {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        let line_start = self.offsets[line_idx];
        let offset = offset.min(source.len());
        let column = source
            .get(line_start..offset)
            .map_or(0, |prefix| prefix.chars().count());

        (to_u32(line_idx + 1), to_u32(column + 1))
    }

    /// Marker covering `span`. Spans ending in a line break stay on the line
    /// they start on.
    pub(crate) fn marker(&self, source: &str, span: Range<usize>) -> Marker {
        let (line, column) = self.line_col(source, span.start);
        let width = source
            .get(span)
            .map_or(0, |text| text.chars().count());

        Marker::new(line, column, line, column.saturating_add(to_u32(width)))
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
