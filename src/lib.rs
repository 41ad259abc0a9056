//! A streaming UTF-8 codec that works on caller-provided, fixed-capacity buffers.
//!
//! Bytes are decoded one at a time by a [`Decoder`] which strictly validates its input: leading
//! and continuation bytes are checked, overlong sequences are rejected, and truncated input is
//! detected. The decoding and encoding functions never allocate, never write past the end of the
//! provided buffers, and always report how much of the output is valid, even on failure.
//!
//! ```
//! let mut code_points = [0u32; 4];
//! let n = utf8_fixed::decode_array("a€".as_bytes(), &mut code_points).unwrap();
//! assert_eq!(&code_points[..n], &[0x61, 0x20AC]);
//!
//! let mut bytes = [0u8; 3];
//! let err = utf8_fixed::encode_array(&[0x41, 0x20AC], &mut bytes).unwrap_err();
//! assert_eq!(err.kind, utf8_fixed::ErrorKind::ByteOverflow);
//! assert_eq!(err.written, 1);
//! ```
//!
//! Surrogates and values above `0x10FFFF` (up to `0x1FFFFF`) are accepted in both directions.

#![no_std]

#[cfg(test)]
extern crate std;

mod error;
pub use self::error::*;

mod sentinel;
pub use self::sentinel::*;

mod null;
pub use self::null::*;

mod encode;
pub use self::encode::*;

mod inline;
pub use self::inline::*;

mod decoder;
pub use self::decoder::*;

mod decode;
pub use self::decode::*;

mod iter;
pub use self::iter::*;

mod display;
pub use self::display::*;
