//! Text encodings selected by glyph width.

use crate::NumType;
use alloc::borrow::Cow;
use alloc::string::String;

/// The text encodings a glyph descriptor can select.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum TextEncoding {
    Utf8,
    /// Always little-endian, whatever the reader or writer endianness.
    Utf16Le,
}

impl TextEncoding {
    /// Picks the encoding for a glyph descriptor: 1 byte is UTF-8, 2 bytes is UTF-16LE, anything
    /// wider has no encoding.
    pub(crate) fn for_glyph(glyph_type: NumType) -> Option<Self> {
        match glyph_type.byte_size() {
            1 => Some(Self::Utf8),
            2 => Some(Self::Utf16Le),
            size => {
                log::trace!("no text encoding for {size}-byte glyphs ({glyph_type})");
                None
            }
        }
    }

    /// Decodes `bytes`, replacing malformed sequences with U+FFFD.
    ///
    /// For UTF-16LE a trailing odd byte is ignored.
    pub(crate) fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes),
            Self::Utf16Le => {
                let wchars = bytes
                    .chunks_exact(2)
                    .map(|c| u16::from_le_bytes([c[0], c[1]]));
                Cow::Owned(
                    char::decode_utf16(wchars)
                        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                        .collect(),
                )
            }
        }
    }

    /// Number of bytes `s` occupies in this encoding.
    pub(crate) fn encoded_len(self, s: &str) -> usize {
        match self {
            Self::Utf8 => s.len(),
            Self::Utf16Le => s.encode_utf16().count() * 2,
        }
    }
}

/// Strips trailing NUL characters. Interior and leading NULs are kept.
pub(crate) fn trim_nul(s: Cow<'_, str>) -> Cow<'_, str> {
    match s {
        Cow::Borrowed(b) => Cow::Borrowed(b.trim_end_matches('\0')),
        Cow::Owned(mut o) => {
            let len = o.trim_end_matches('\0').len();
            o.truncate(len);
            Cow::Owned(o)
        }
    }
}
