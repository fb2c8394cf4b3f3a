use crate::{Endianness, ReaderError, WriterError};
use arrayvec::ArrayVec;
use core::fmt;

/// Encoded form of one value; never longer than the widest descriptor.
pub(crate) type Wire = ArrayVec<u8, 8>;

/// Describes one fixed-width numeric wire encoding.
///
/// The catalog is closed: these eight variants are the only encodings a [`Reader`](crate::Reader)
/// or [`Writer`](crate::Writer) understands. Integers are two's-complement, floats are IEEE-754.
/// Byte order is not part of the descriptor; it comes from the reader or writer using it.
///
/// Descriptors also parameterize length prefixes (`read_bytes_with_len(NumType::U16)`) and glyph
/// widths for text (`NumType::U8` selects UTF-8, `NumType::U16` selects UTF-16LE).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NumType {
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer.
    U16,
    /// Unsigned 32-bit integer.
    U32,
    /// Signed 8-bit integer.
    I8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// IEEE-754 binary32.
    F32,
    /// IEEE-754 binary64.
    F64,
}

impl NumType {
    /// Every descriptor, in catalog order.
    pub const ALL: [NumType; 8] = [
        Self::U8,
        Self::U16,
        Self::U32,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::F32,
        Self::F64,
    ];

    /// Number of bytes one value of this type occupies.
    pub const fn byte_size(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    /// Returns `true` for the signed integer types and both float types.
    pub const fn is_signed(self) -> bool {
        !matches!(self, Self::U8 | Self::U16 | Self::U32)
    }

    /// Returns `true` for [`NumType::F32`] and [`NumType::F64`].
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Short lowercase name, e.g. `"u16"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Decodes one value from `src` starting at `offset`.
    ///
    /// Reads exactly [`byte_size`](Self::byte_size) bytes. If they are not all present, this
    /// returns `Err(ReaderError::EndOfStream)`.
    pub fn decode(
        self,
        src: &[u8],
        offset: usize,
        endianness: Endianness,
    ) -> Result<Number, ReaderError> {
        let e = endianness;
        Ok(match self {
            Self::U8 => Number::U8(u8::from_ne_bytes(take(src, offset)?)),
            Self::U16 => Number::U16(e.get_u16(take(src, offset)?)),
            Self::U32 => Number::U32(e.get_u32(take(src, offset)?)),
            Self::I8 => Number::I8(i8::from_ne_bytes(take(src, offset)?)),
            Self::I16 => Number::I16(e.get_i16(take(src, offset)?)),
            Self::I32 => Number::I32(e.get_i32(take(src, offset)?)),
            Self::F32 => Number::F32(e.get_f32(take(src, offset)?)),
            Self::F64 => Number::F64(e.get_f64(take(src, offset)?)),
        })
    }

    /// Encodes `value` into `dst` starting at `offset`, overwriting exactly
    /// [`byte_size`](Self::byte_size) bytes.
    ///
    /// Integer values outside the range of `self` wrap (two's complement), the same way an `as`
    /// cast does. Floats written to an integer type must be finite and integral, otherwise this
    /// returns `Err(WriterError::NotIntegral)`; integral floats beyond the `i64` range wrap modulo
    /// 2^64 before narrowing. `dst` is left untouched on any error.
    pub fn encode(
        self,
        value: impl Into<Number>,
        dst: &mut [u8],
        offset: usize,
        endianness: Endianness,
    ) -> Result<(), WriterError> {
        let wire = self.pack(value.into(), endianness)?;
        let Some(slot) = offset
            .checked_add(wire.len())
            .and_then(|end| dst.get_mut(offset..end))
        else {
            return Err(WriterError::OutOfBounds {
                offset,
                len: dst.len(),
            });
        };
        slot.copy_from_slice(&wire);
        Ok(())
    }

    pub(crate) fn pack(self, value: Number, endianness: Endianness) -> Result<Wire, WriterError> {
        let e = endianness;
        Ok(match (self, value) {
            // f32 to f32 stays bit-exact, NaN payload included.
            (Self::F32, Number::F32(v)) => wire(e.put_f32(v)),
            (Self::F32, other) => wire(e.put_f32(other.as_f64() as f32)),
            (Self::F64, other) => wire(e.put_f64(other.as_f64())),
            (ty, other) => ty.pack_int(ty.integral(other)?, e),
        })
    }

    /// Encodes a byte count, wrapping it into the width of `self`.
    pub(crate) fn pack_length(self, len: usize, endianness: Endianness) -> Wire {
        self.pack_int(len as i64, endianness)
    }

    fn pack_int(self, v: i64, e: Endianness) -> Wire {
        match self {
            Self::U8 => wire([v as u8]),
            Self::U16 => wire(e.put_u16(v as u16)),
            Self::U32 => wire(e.put_u32(v as u32)),
            Self::I8 => wire((v as i8).to_ne_bytes()),
            Self::I16 => wire(e.put_i16(v as i16)),
            Self::I32 => wire(e.put_i32(v as i32)),
            Self::F32 => wire(e.put_f32(v as f32)),
            Self::F64 => wire(e.put_f64(v as f64)),
        }
    }

    fn integral(self, value: Number) -> Result<i64, WriterError> {
        value.as_i64().ok_or_else(|| {
            let value = value.as_f64();
            log::trace!("refusing to write {} as {}: not a finite integer", value, self);
            WriterError::NotIntegral { ty: self, value }
        })
    }
}

impl fmt::Display for NumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) fn take<const N: usize>(src: &[u8], offset: usize) -> Result<[u8; N], ReaderError> {
    match src.get(offset..).and_then(|rest| rest.first_chunk::<N>()) {
        Some(bytes) => Ok(*bytes),
        None => {
            log::trace!(
                "end of stream: need {} bytes at offset {offset}, buffer holds {}",
                N,
                src.len()
            );
            Err(ReaderError::EndOfStream)
        }
    }
}

fn wire<const N: usize>(bytes: [u8; N]) -> Wire {
    bytes.into_iter().collect()
}

/// A value decoded through a [`NumType`], or about to be encoded through one.
///
/// The variant records which descriptor produced it. When writing, any variant may be passed to
/// any descriptor; see [`NumType::encode`] for the conversion rules.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Number {
    /// See [`NumType::U8`].
    U8(u8),
    /// See [`NumType::U16`].
    U16(u16),
    /// See [`NumType::U32`].
    U32(u32),
    /// See [`NumType::I8`].
    I8(i8),
    /// See [`NumType::I16`].
    I16(i16),
    /// See [`NumType::I32`].
    I32(i32),
    /// See [`NumType::F32`].
    F32(f32),
    /// See [`NumType::F64`].
    F64(f64),
}

impl Number {
    /// The descriptor matching this variant.
    pub const fn num_type(self) -> NumType {
        match self {
            Self::U8(_) => NumType::U8,
            Self::U16(_) => NumType::U16,
            Self::U32(_) => NumType::U32,
            Self::I8(_) => NumType::I8,
            Self::I16(_) => NumType::I16,
            Self::I32(_) => NumType::I32,
            Self::F32(_) => NumType::F32,
            Self::F64(_) => NumType::F64,
        }
    }

    /// Converts to `f64`. Exact for every variant.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::U8(v) => v.into(),
            Self::U16(v) => v.into(),
            Self::U32(v) => v.into(),
            Self::I8(v) => v.into(),
            Self::I16(v) => v.into(),
            Self::I32(v) => v.into(),
            Self::F32(v) => v.into(),
            Self::F64(v) => v,
        }
    }

    /// Converts to `i64`. Returns `None` for floats that are not finite or have a fractional part.
    ///
    /// Integral floats outside the `i64` range wrap modulo 2^64, so `2^63` becomes `i64::MIN`.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Self::U8(v) => Some(v.into()),
            Self::U16(v) => Some(v.into()),
            Self::U32(v) => Some(v.into()),
            Self::I8(v) => Some(v.into()),
            Self::I16(v) => Some(v.into()),
            Self::I32(v) => Some(v.into()),
            Self::F32(v) => float_to_i64(v.into()),
            Self::F64(v) => float_to_i64(v),
        }
    }

    /// Interprets the value as a byte count.
    ///
    /// Signed integers are reinterpreted as unsigned of the same width, so an `i8` of `-1` is 255.
    /// Floats are truncated toward zero; negative values and NaN become 0.
    pub fn as_length(self) -> usize {
        match self {
            Self::U8(v) => v as usize,
            Self::U16(v) => v as usize,
            Self::U32(v) => v as usize,
            Self::I8(v) => v as u8 as usize,
            Self::I16(v) => v as u16 as usize,
            Self::I32(v) => v as u32 as usize,
            Self::F32(v) => v as usize,
            Self::F64(v) => v as usize,
        }
    }
}

fn float_to_i64(v: f64) -> Option<i64> {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

    if !v.is_finite() {
        return None;
    }
    if (-TWO_POW_63..TWO_POW_63).contains(&v) {
        let i = v as i64;
        return (i as f64 == v).then_some(i);
    }

    // |v| >= 2^63 is always integral: mantissa << (exponent - 52), with that shift >= 11.
    let bits = v.to_bits();
    let shift = ((bits >> 52) & 0x7ff) as u32 - 1075;
    let mantissa = (bits & ((1 << 52) - 1)) | (1 << 52);
    let low = if shift >= 64 { 0 } else { mantissa << shift };
    let low = if v.is_sign_negative() {
        low.wrapping_neg()
    } else {
        low
    };
    Some(low as i64)
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8(v) => fmt::Display::fmt(v, f),
            Self::U16(v) => fmt::Display::fmt(v, f),
            Self::U32(v) => fmt::Display::fmt(v, f),
            Self::I8(v) => fmt::Display::fmt(v, f),
            Self::I16(v) => fmt::Display::fmt(v, f),
            Self::I32(v) => fmt::Display::fmt(v, f),
            Self::F32(v) => fmt::Display::fmt(v, f),
            Self::F64(v) => fmt::Display::fmt(v, f),
        }
    }
}

macro_rules! number_conversions {
    ($($prim:ty => $variant:ident,)*) => {
        $(
            impl From<$prim> for Number {
                fn from(value: $prim) -> Self {
                    Self::$variant(value)
                }
            }

            impl TryFrom<Number> for $prim {
                type Error = Number;

                /// Unwraps the matching variant; any other variant is handed back unchanged.
                fn try_from(value: Number) -> Result<Self, Number> {
                    match value {
                        Number::$variant(v) => Ok(v),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

number_conversions! {
    u8 => U8,
    u16 => U16,
    u32 => U32,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    f32 => F32,
    f64 => F64,
}
