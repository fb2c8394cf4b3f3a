//! A cursor-based reader and an append-only writer for in-memory byte buffers.
//!
//! Supports signed and unsigned integers of 8, 16 and 32 bits, floats of 32 and 64 bits, raw and
//! length-prefixed byte slices, and UTF-8 / UTF-16 text. Each [`Reader`] and [`Writer`] carries
//! its own [`Endianness`], so input and output byte order are configured independently.
//!
//! Numbers are read and written through [`NumType`], a closed catalog of the eight supported
//! encodings. The same descriptors choose the width of length prefixes and the glyph width of
//! text.
//!
//! ```
//! use rwbuf::{NumType, Reader, Writer};
//! use std::f64::consts::PI;
//!
//! let mut w = Writer::new();
//! w.write(NumType::U8, 0xab_u8)?
//!     .write(NumType::U16, 0xcafe_u16)?
//!     .write(NumType::U32, 0xdead_beef_u32)?
//!     .write(NumType::I8, -57_i8)?
//!     .write(NumType::F64, PI)?;
//!
//! let mut r = Reader::new(&w.buffer);
//! assert_eq!(r.read_u8()?, 0xab);
//! assert_eq!(r.read_u16()?, 0xcafe);
//! assert_eq!(r.read_u32()?, 0xdead_beef);
//! assert_eq!(r.read_i8()?, -57);
//! assert_eq!(r.read_f64()?, PI);
//! assert_eq!(r.position(), 16);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Features
//! * `std` (default): implements `std::io::Write` for [`Writer`]. Without it the crate only needs
//!   `alloc`.
//! * `bstr` (default): adds `Reader::read_bstr` and `Reader::read_bstr_with_len`.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

extern crate alloc;

mod endian;
mod num;
mod reader;
mod text;
mod writer;


pub use endian::Endianness;
pub use num::{NumType, Number};
pub use reader::{Reader, ReaderError};
pub use writer::{Writer, WriterError};
