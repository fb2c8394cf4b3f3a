use zerocopy::byteorder::{BigEndian, LittleEndian, F32, F64, I16, I32, U16, U32};

/// Byte order of multi-byte values.
///
/// Endianness belongs to a [`Reader`](crate::Reader) or [`Writer`](crate::Writer), not to a
/// [`NumType`](crate::NumType), so the same descriptor can decode either byte order. One-byte
/// types ignore it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Endianness {
    /// Most significant byte first.
    Big = 0,
    /// Least significant byte first.
    #[default]
    Little = 1,
}

impl Endianness {
    /// Returns `true` for [`Endianness::Little`].
    pub const fn is_little(self) -> bool {
        matches!(self, Self::Little)
    }
}

macro_rules! byte_order_codec {
    ($($prim:ty, $wire:ident, $n:literal, $get:ident, $put:ident;)*) => {
        impl Endianness {
            $(
                #[inline(always)]
                pub(crate) fn $get(self, bytes: [u8; $n]) -> $prim {
                    match self {
                        Self::Big => $wire::<BigEndian>::from_bytes(bytes).get(),
                        Self::Little => $wire::<LittleEndian>::from_bytes(bytes).get(),
                    }
                }

                #[inline(always)]
                pub(crate) fn $put(self, value: $prim) -> [u8; $n] {
                    match self {
                        Self::Big => $wire::<BigEndian>::new(value).to_bytes(),
                        Self::Little => $wire::<LittleEndian>::new(value).to_bytes(),
                    }
                }
            )*
        }
    };
}

byte_order_codec! {
    u16, U16, 2, get_u16, put_u16;
    u32, U32, 4, get_u32, put_u32;
    i16, I16, 2, get_i16, put_i16;
    i32, I32, 4, get_i32, put_i32;
    f32, F32, 4, get_f32, put_f32;
    f64, F64, 8, get_f64, put_f64;
}
