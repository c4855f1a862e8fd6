//! # ordkey codec
//!
//! Order-preserving encoders for individual key columns.
//!
//! Every encoder in this crate maps a typed value to bytes such that
//! comparing the bytes with a plain `memcmp` gives the same answer as
//! comparing the typed values:
//!
//! - Unsigned integers are written big-endian
//! - Signed integers have their sign bit flipped, then are written big-endian
//! - Booleans are a single `0x00` / `0x01` byte
//! - Strings and binaries are written raw when they are the last key column,
//!   otherwise `0x00` is escaped as `0x00 0x01` and the value is terminated
//!   by `0x00 0x00`
//!
//! Encoders are looked up by [`DataType`] through an [`EncoderRegistry`].
//! Decoding copies variable-length payloads into an [`Arena`], so decoded
//! [`Cell`]s borrow from the arena and cannot outlive it.
//!
//! ## Usage
//!
//! ```
//! use bytes::BytesMut;
//! use ordkey_codec::{default_registry, Arena, Cell, DataType, EncoderRegistry};
//!
//! let encoder = default_registry().encoder(DataType::UInt32);
//! let mut buf = BytesMut::new();
//! encoder.encode(Cell::UInt32(5), true, &mut buf);
//! assert_eq!(&buf[..], &[0, 0, 0, 5]);
//!
//! let arena = Arena::new();
//! let mut input = &buf[..];
//! let decoded = encoder.decode(&mut input, true, &arena).unwrap();
//! assert_eq!(decoded, Cell::UInt32(5));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod arena;
mod cell;
mod config;
mod display;
mod encoder;
mod error;
mod registry;

pub use arena::Arena;
pub use cell::{Cell, DataType, OwnedCell};
pub use config::ArenaConfig;
pub use display::{debug_string, escape_binary, from_hex, to_hex};
pub use encoder::{
    BinaryEncoder, BoolEncoder, Int16Encoder, Int32Encoder, Int64Encoder, Int8Encoder,
    KeyEncoder, StringEncoder, UInt16Encoder, UInt32Encoder, UInt64Encoder, UInt8Encoder,
};
pub use error::{AllocError, CodecError, CodecResult};
pub use registry::{default_registry, DefaultEncoders, EncoderRegistry};
