use crate::text::TextEncoding;
use crate::{Endianness, NumType, Number};
use alloc::vec::Vec;
use zerocopy::byteorder::{LE, U16};
use zerocopy::IntoBytes;

pub type Result<T> = core::result::Result<T, WriterError>;

/// Builds a byte buffer by appending values to it.
///
/// Every `write_*` method appends to `buffer` and returns `&mut Self`, so calls chain. Methods
/// that can reject their input return `Result<&mut Self>` instead and leave `buffer` untouched
/// on error. There is no finishing step: `buffer` is complete after every call.
///
/// ```
/// # use rwbuf::{Endianness, NumType, Writer};
/// let mut w = Writer::new();
/// w.write(NumType::U8, 0xab_u8)?
///     .write(NumType::U16, 0xcafe_u16)?
///     .write_bytes_with_len(NumType::U8, b"hi");
/// assert_eq!(w.buffer, [0xab, 0xfe, 0xca, 2, b'h', b'i']);
/// # Ok::<(), rwbuf::WriterError>(())
/// ```
///
/// Multi-byte numbers are encoded using `destination_endianness`, which may be changed between
/// writes. UTF-16 text is always little-endian.
///
/// A `Writer` has no internal synchronization. One writer must not be driven from several threads
/// without external locking.
#[derive(Clone, Default, Debug)]
pub struct Writer {
    /// The output data.
    pub buffer: Vec<u8>,
    /// Byte order of multi-byte numbers in the output. Defaults to little-endian.
    pub destination_endianness: Endianness,
}

impl Writer {
    /// Creates an empty little-endian writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty little-endian writer with room for `len` bytes.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(len),
            destination_endianness: Endianness::Little,
        }
    }

    /// Sets the byte order used for multi-byte numbers.
    pub fn with_destination_endianness(mut self, endianness: Endianness) -> Self {
        self.destination_endianness = endianness;
        self
    }

    /// The bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Extracts the output buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Writes `bytes` to the output.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(bytes);
        self
    }

    /// Encodes `value` as `ty` and appends it.
    ///
    /// Integers wrap into the width of `ty`, so writing `0x1234_u16` as [`NumType::U8`] appends
    /// `0x34`. A float written as an integer type must be finite and integral; otherwise this
    /// returns [`WriterError::NotIntegral`].
    pub fn write(&mut self, ty: NumType, value: impl Into<Number>) -> Result<&mut Self> {
        let wire = ty.pack(value.into(), self.destination_endianness)?;
        Ok(self.write_bytes(&wire))
    }

    /// Writes `bytes` preceded by its length, encoded as `length_type`.
    ///
    /// A length that does not fit `length_type` wraps, the same way [`write`](Self::write) wraps
    /// integers: 256 bytes behind a [`NumType::U8`] prefix are announced as 0.
    pub fn write_bytes_with_len(&mut self, length_type: NumType, bytes: &[u8]) -> &mut Self {
        self.write_length(length_type, bytes.len());
        self.write_bytes(bytes)
    }

    /// Writes `s` as text, without any length or terminator.
    ///
    /// The glyph width of `glyph_type` selects the encoding: 1 byte is UTF-8, 2 bytes is UTF-16
    /// (little-endian, regardless of `destination_endianness`). Wider glyphs fail with
    /// [`WriterError::UnsupportedEncoding`].
    pub fn write_unicode_string(&mut self, glyph_type: NumType, s: &str) -> Result<&mut Self> {
        let encoding = text_encoding(glyph_type)?;
        Ok(self.write_text(encoding, s))
    }

    /// Writes `s` as text preceded by its encoded length in bytes, encoded as `length_type`.
    /// The length wraps as in [`write_bytes_with_len`](Self::write_bytes_with_len).
    pub fn write_unicode_string_with_len(
        &mut self,
        glyph_type: NumType,
        length_type: NumType,
        s: &str,
    ) -> Result<&mut Self> {
        let encoding = text_encoding(glyph_type)?;
        self.write_length(length_type, encoding.encoded_len(s));
        Ok(self.write_text(encoding, s))
    }

    /// Writes a single `u8` value
    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.write_bytes(&[value])
    }

    /// Writes a single `i8` value
    pub fn write_i8(&mut self, value: i8) -> &mut Self {
        self.write_bytes(&value.to_ne_bytes())
    }

    /// Writes a single `u16` value
    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        let bytes = self.destination_endianness.put_u16(value);
        self.write_bytes(&bytes)
    }

    /// Writes a single `u32` value
    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        let bytes = self.destination_endianness.put_u32(value);
        self.write_bytes(&bytes)
    }

    /// Writes a single `i16` value
    pub fn write_i16(&mut self, value: i16) -> &mut Self {
        let bytes = self.destination_endianness.put_i16(value);
        self.write_bytes(&bytes)
    }

    /// Writes a single `i32` value
    pub fn write_i32(&mut self, value: i32) -> &mut Self {
        let bytes = self.destination_endianness.put_i32(value);
        self.write_bytes(&bytes)
    }

    /// Writes an `f32` value, preserving its bit pattern.
    pub fn write_f32(&mut self, value: f32) -> &mut Self {
        let bytes = self.destination_endianness.put_f32(value);
        self.write_bytes(&bytes)
    }

    /// Writes an `f64` value, preserving its bit pattern.
    pub fn write_f64(&mut self, value: f64) -> &mut Self {
        let bytes = self.destination_endianness.put_f64(value);
        self.write_bytes(&bytes)
    }

    fn write_length(&mut self, length_type: NumType, len: usize) -> &mut Self {
        let wire = length_type.pack_length(len, self.destination_endianness);
        self.write_bytes(&wire)
    }

    fn write_text(&mut self, encoding: TextEncoding, s: &str) -> &mut Self {
        match encoding {
            TextEncoding::Utf8 => self.write_bytes(s.as_bytes()),
            TextEncoding::Utf16Le => {
                self.buffer.reserve(encoding.encoded_len(s));
                for c in s.encode_utf16() {
                    self.buffer.extend_from_slice(U16::<LE>::new(c).as_bytes());
                }
                self
            }
        }
    }
}

fn text_encoding(glyph_type: NumType) -> Result<TextEncoding> {
    TextEncoding::for_glyph(glyph_type).ok_or(WriterError::UnsupportedEncoding {
        glyph_size: glyph_type.byte_size(),
    })
}

#[cfg(feature = "std")]
impl std::io::Write for Writer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Error type for the fallible `write_*` functions of `Writer`, and for [`NumType::encode`].
#[derive(Copy, Clone, PartialEq, Debug, thiserror::Error)]
pub enum WriterError {
    /// A text write was given a glyph descriptor wider than 2 bytes.
    #[error("unsupported text encoding: {glyph_size}-byte glyphs (only UTF-8 and UTF-16 are supported)")]
    UnsupportedEncoding {
        /// Width of the rejected glyph descriptor.
        glyph_size: usize,
    },

    /// A float that is not a finite integer was written through an integer descriptor.
    #[error("cannot encode {value} as {ty}: not a finite integer")]
    NotIntegral {
        /// The integer descriptor.
        ty: NumType,
        /// The rejected value.
        value: f64,
    },

    /// [`NumType::encode`] was given a destination too short for the value at that offset.
    #[error("cannot encode at offset {offset}: destination is only {len} bytes long")]
    OutOfBounds {
        /// Requested offset.
        offset: usize,
        /// Length of the destination.
        len: usize,
    },
}
