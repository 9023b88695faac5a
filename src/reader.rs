use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::Path;
use std::str::FromStr;

use tracing::debug;
use zstd::stream::read::Decoder as ZstdDecoder;

use crate::error::Error;
use crate::gib::Gib;

const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// How the bytes of a GIB source are encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// Zstandard when the source starts with a zstd frame, plain otherwise.
    #[default]
    Auto,
    Plain,
    Zstd,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid compression value '{0}', supported values: 'auto', 'none', 'plain' or 'zstd'")]
pub struct CompressionError(String);

impl FromStr for Compression {
    type Err = CompressionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim();
        if normalized.eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else if normalized.eq_ignore_ascii_case("none")
            || normalized.eq_ignore_ascii_case("plain")
        {
            Ok(Self::Plain)
        } else if normalized.eq_ignore_ascii_case("zstd") {
            Ok(Self::Zstd)
        } else {
            Err(CompressionError(normalized.to_string()))
        }
    }
}

/// Parses the GIB file at `path`, decompressing zstd files transparently.
pub fn parse_path(path: impl AsRef<Path>) -> Result<Gib, Error> {
    parse_path_with(path, Compression::Auto)
}

pub fn parse_path_with(path: impl AsRef<Path>, compression: Compression) -> Result<Gib, Error> {
    let path = path.as_ref();
    debug!(path = %path.display(), ?compression, "reading gib file");
    let file = File::open(path)?;
    parse_reader_with(file, compression)
}

/// Parses a GIB document from a byte stream, read to its end.
pub fn parse_reader(reader: impl Read) -> Result<Gib, Error> {
    parse_reader_with(reader, Compression::Auto)
}

pub fn parse_reader_with(reader: impl Read, compression: Compression) -> Result<Gib, Error> {
    let source = read_source(reader, compression)?;
    Ok(crate::parse(&source)?)
}

/// Reads the whole source as text. Invalid UTF-8 sequences become U+FFFD;
/// GIB files in the wild are not always UTF-8.
fn read_source(mut reader: impl Read, compression: Compression) -> io::Result<String> {
    // A short first read must not hide the magic, so collect up to four bytes.
    let mut head = Vec::with_capacity(ZSTD_MAGIC.len());
    (&mut reader)
        .take(ZSTD_MAGIC.len() as u64)
        .read_to_end(&mut head)?;

    let compression = match compression {
        Compression::Auto if head == ZSTD_MAGIC => Compression::Zstd,
        Compression::Auto => Compression::Plain,
        other => other,
    };

    let mut stream = BufReader::new(Cursor::new(head).chain(reader));
    let mut bytes = Vec::new();
    match compression {
        Compression::Zstd => {
            ZstdDecoder::with_buffer(stream)?.read_to_end(&mut bytes)?;
        }
        Compression::Plain | Compression::Auto => {
            stream.read_to_end(&mut bytes)?;
        }
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
