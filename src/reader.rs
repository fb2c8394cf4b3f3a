use crate::num::take;
use crate::text::{trim_nul, TextEncoding};
use crate::{Endianness, NumType, Number};
use alloc::borrow::Cow;

pub type Result<T> = core::result::Result<T, ReaderError>;

/// Reads values from a slice of bytes, front to back.
///
/// A `Reader` borrows its input and keeps a cursor (`position`) into it. Every successful read
/// advances the cursor by exactly the number of bytes it consumed. A read that would run past the
/// end of the input fails with [`ReaderError::EndOfStream`] and leaves the cursor where it was;
/// this also holds for the composite reads (`*_with_len`), which roll back the length prefix when
/// the payload is missing.
///
/// Multi-byte numbers are decoded using `source_endianness`, which may be changed between reads.
/// UTF-16 text is always little-endian.
///
/// A `Reader` has no internal synchronization. Several readers may share one input slice, but
/// one reader must not be driven from several threads without external locking.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    buffer: &'a [u8],
    position: usize,
    /// Byte order of multi-byte numbers in the input. Defaults to little-endian.
    pub source_endianness: Endianness,
}

impl<'a> Reader<'a> {
    /// Creates a little-endian reader positioned at the start of `buffer`.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
            source_endianness: Endianness::Little,
        }
    }

    /// Sets the byte order used for multi-byte numbers.
    pub fn with_source_endianness(mut self, endianness: Endianness) -> Self {
        self.source_endianness = endianness;
        self
    }

    /// The whole input, including bytes already consumed.
    pub fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    /// Offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Returns `true` if every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Advances the cursor by `length` bytes without looking at them.
    pub fn skip_bytes(&mut self, length: usize) -> Result<&mut Self> {
        self.peek(length)?;
        self.position += length;
        Ok(self)
    }

    /// Reads a slice of bytes whose length is `length`. This function returns a slice reference
    /// to the bytes; it does not copy them.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        let bytes = self.peek(length)?;
        self.position += length;
        Ok(bytes)
    }

    /// Decodes one value of type `ty` at the cursor.
    pub fn read(&mut self, ty: NumType) -> Result<Number> {
        let value = ty.decode(self.buffer, self.position, self.source_endianness)?;
        self.position += ty.byte_size();
        Ok(value)
    }

    /// Reads a slice of bytes preceded by its length, encoded as `length_type`.
    ///
    /// The length is interpreted as described in [`Number::as_length`]. It is not checked
    /// against anything but the remaining input.
    ///
    /// ```
    /// # use rwbuf::{NumType, Reader};
    /// let mut r = Reader::new(&[3, 0, b'a', b'b', b'c', 0xff]);
    /// assert_eq!(r.read_bytes_with_len(NumType::U16), Ok(&b"abc"[..]));
    /// assert_eq!(r.position(), 5);
    /// ```
    pub fn read_bytes_with_len(&mut self, length_type: NumType) -> Result<&'a [u8]> {
        self.atomically(|r| {
            let length = r.read(length_type)?.as_length();
            r.read_bytes(length)
        })
    }

    /// Reads `length` bytes as text.
    ///
    /// The glyph width of `glyph_type` selects the encoding: 1 byte is UTF-8, 2 bytes is UTF-16
    /// (little-endian, regardless of `source_endianness`). Wider glyphs fail with
    /// [`ReaderError::UnsupportedEncoding`] before anything is consumed. Malformed sequences are
    /// replaced with U+FFFD.
    ///
    /// If `null_term` is set, `length` is the maximum size of the string: all `length` bytes are
    /// still consumed, but trailing NUL characters are removed from the result.
    pub fn read_unicode_string(
        &mut self,
        glyph_type: NumType,
        length: usize,
        null_term: bool,
    ) -> Result<Cow<'a, str>> {
        let encoding = TextEncoding::for_glyph(glyph_type).ok_or(
            ReaderError::UnsupportedEncoding {
                glyph_size: glyph_type.byte_size(),
            },
        )?;
        let text = encoding.decode(self.read_bytes(length)?);
        Ok(if null_term { trim_nul(text) } else { text })
    }

    /// Reads text preceded by its length in bytes, encoded as `length_type`. See
    /// [`read_unicode_string`](Self::read_unicode_string) for the meaning of `glyph_type` and
    /// `null_term`.
    pub fn read_unicode_string_with_len(
        &mut self,
        glyph_type: NumType,
        length_type: NumType,
        null_term: bool,
    ) -> Result<Cow<'a, str>> {
        self.atomically(|r| {
            let length = r.read(length_type)?.as_length();
            r.read_unicode_string(glyph_type, length, null_term)
        })
    }

    /// Reads a slice of bytes and returns it as a `bstr::BStr`, without validating it.
    #[cfg(feature = "bstr")]
    pub fn read_bstr(&mut self, length: usize) -> Result<&'a bstr::BStr> {
        Ok(bstr::BStr::new(self.read_bytes(length)?))
    }

    /// Length-prefixed form of [`read_bstr`](Self::read_bstr).
    #[cfg(feature = "bstr")]
    pub fn read_bstr_with_len(&mut self, length_type: NumType) -> Result<&'a bstr::BStr> {
        Ok(bstr::BStr::new(self.read_bytes_with_len(length_type)?))
    }

    fn peek(&self, length: usize) -> Result<&'a [u8]> {
        self.position
            .checked_add(length)
            .and_then(|end| self.buffer.get(self.position..end))
            .ok_or_else(|| {
                log::trace!(
                    "end of stream: need {length} bytes at position {}, {} remaining",
                    self.position,
                    self.remaining()
                );
                ReaderError::EndOfStream
            })
    }

    /// Runs `f`, restoring the cursor if it fails.
    fn atomically<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let start = self.position;
        let result = f(self);
        if result.is_err() {
            self.position = start;
        }
        result
    }

    /// Reads a small array of bytes, with a constant length.
    #[inline(always)]
    pub fn read_cbytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = take(self.buffer, self.position)?;
        self.position += N;
        Ok(bytes)
    }

    /// Reads a single `u8` value.
    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(u8::from_ne_bytes(self.read_cbytes()?))
    }

    /// Reads a `u16` in `source_endianness` byte order.
    #[inline(always)]
    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_cbytes()?;
        Ok(self.source_endianness.get_u16(bytes))
    }

    /// Reads a `u32` in `source_endianness` byte order.
    #[inline(always)]
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_cbytes()?;
        Ok(self.source_endianness.get_u32(bytes))
    }

    /// Reads a single `i8` value.
    #[inline(always)]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_ne_bytes(self.read_cbytes()?))
    }

    /// Reads an `i16` in `source_endianness` byte order.
    #[inline(always)]
    pub fn read_i16(&mut self) -> Result<i16> {
        let bytes = self.read_cbytes()?;
        Ok(self.source_endianness.get_i16(bytes))
    }

    /// Reads an `i32` in `source_endianness` byte order.
    #[inline(always)]
    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.read_cbytes()?;
        Ok(self.source_endianness.get_i32(bytes))
    }

    /// Reads an `f32` in `source_endianness` byte order. The bit pattern is preserved exactly.
    #[inline(always)]
    pub fn read_f32(&mut self) -> Result<f32> {
        let bytes = self.read_cbytes()?;
        Ok(self.source_endianness.get_f32(bytes))
    }

    /// Reads an `f64` in `source_endianness` byte order. The bit pattern is preserved exactly.
    #[inline(always)]
    pub fn read_f64(&mut self) -> Result<f64> {
        let bytes = self.read_cbytes()?;
        Ok(self.source_endianness.get_f64(bytes))
    }
}

/// Error type for `Reader`
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum ReaderError {
    /// A read or skip needed more bytes than remain in the input. The cursor did not move.
    #[error("end of stream")]
    EndOfStream,

    /// A text read was given a glyph descriptor wider than 2 bytes. Nothing was consumed.
    #[error("unsupported text encoding: {glyph_size}-byte glyphs (only UTF-8 and UTF-16 are supported)")]
    UnsupportedEncoding {
        /// Width of the rejected glyph descriptor.
        glyph_size: usize,
    },
}
