//! Per-type order-preserving key encoders.

use crate::arena::Arena;
use crate::cell::{Cell, DataType};
use crate::error::{CodecError, CodecResult};
use bytes::{BufMut, BytesMut};
use std::borrow::Cow;
use std::fmt;
use std::mem;

/// Escape byte: a `0x00` inside a value is written as `0x00 0x01`.
const ESCAPE: u8 = 0x01;
/// A value that is not the last key column ends with `0x00 0x00`.
const TERMINATOR: u8 = 0x00;

/// Encodes and decodes one column type as order-preserving bytes.
///
/// For any two values `a` and `b` of the encoder's type, the encoded
/// bytes compare the same way `a` and `b` do. When `is_last` is false the
/// encoding must also be self-delimiting, so that the next key column
/// cannot influence the comparison of this one.
pub trait KeyEncoder: Send + Sync + fmt::Debug {
    /// Type handled by this encoder.
    fn data_type(&self) -> DataType;

    /// Appends the encoding of `cell` to `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is not of [`data_type`](KeyEncoder::data_type).
    fn encode(&self, cell: Cell<'_>, is_last: bool, dst: &mut BytesMut);

    /// Decodes one value from the front of `src`, advancing it past the
    /// consumed bytes. Variable-length payloads are copied into `arena`.
    ///
    /// # Errors
    ///
    /// Returns an error if `src` is truncated or malformed, or if the arena
    /// cannot hold the decoded payload.
    fn decode<'a>(&self, src: &mut &[u8], is_last: bool, arena: &'a Arena)
        -> CodecResult<Cell<'a>>;
}

#[cold]
#[track_caller]
fn type_mismatch(expected: DataType, cell: Cell<'_>) -> ! {
    match cell.data_type() {
        Some(actual) => panic!("{expected} key encoder cannot encode a {actual} value"),
        None => panic!("{expected} key encoder cannot encode a null value"),
    }
}

fn take_fixed<const N: usize>(src: &mut &[u8], data_type: DataType) -> CodecResult<[u8; N]> {
    if src.len() < N {
        return Err(CodecError::unexpected_eof(data_type));
    }
    let (head, rest) = src.split_at(N);
    let mut out = [0u8; N];
    out.copy_from_slice(head);
    *src = rest;
    Ok(out)
}

macro_rules! unsigned_encoder {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $variant:ident) => {
        $(#[$doc])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl KeyEncoder for $name {
            fn data_type(&self) -> DataType {
                DataType::$variant
            }

            fn encode(&self, cell: Cell<'_>, _is_last: bool, dst: &mut BytesMut) {
                match cell {
                    Cell::$variant(v) => dst.put_slice(&v.to_be_bytes()),
                    other => type_mismatch(DataType::$variant, other),
                }
            }

            fn decode<'a>(
                &self,
                src: &mut &[u8],
                _is_last: bool,
                _arena: &'a Arena,
            ) -> CodecResult<Cell<'a>> {
                let bytes = take_fixed::<{ mem::size_of::<$ty>() }>(src, DataType::$variant)?;
                Ok(Cell::$variant(<$ty>::from_be_bytes(bytes)))
            }
        }
    };
}

// Flipping the sign bit maps i::MIN..=i::MAX onto 0..=u::MAX in order.
macro_rules! signed_encoder {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $uty:ty, $variant:ident) => {
        $(#[$doc])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl $name {
            const SIGN_BIT: $uty = 1 << (<$uty>::BITS - 1);
        }

        impl KeyEncoder for $name {
            fn data_type(&self) -> DataType {
                DataType::$variant
            }

            #[allow(clippy::cast_sign_loss)]
            fn encode(&self, cell: Cell<'_>, _is_last: bool, dst: &mut BytesMut) {
                match cell {
                    Cell::$variant(v) => {
                        dst.put_slice(&((v as $uty) ^ Self::SIGN_BIT).to_be_bytes())
                    }
                    other => type_mismatch(DataType::$variant, other),
                }
            }

            #[allow(clippy::cast_possible_wrap)]
            fn decode<'a>(
                &self,
                src: &mut &[u8],
                _is_last: bool,
                _arena: &'a Arena,
            ) -> CodecResult<Cell<'a>> {
                let bytes = take_fixed::<{ mem::size_of::<$uty>() }>(src, DataType::$variant)?;
                let bits = <$uty>::from_be_bytes(bytes) ^ Self::SIGN_BIT;
                Ok(Cell::$variant(bits as $ty))
            }
        }
    };
}

unsigned_encoder!(
    /// Big-endian `u8`.
    UInt8Encoder, u8, UInt8
);
unsigned_encoder!(
    /// Big-endian `u16`.
    UInt16Encoder, u16, UInt16
);
unsigned_encoder!(
    /// Big-endian `u32`.
    UInt32Encoder, u32, UInt32
);
unsigned_encoder!(
    /// Big-endian `u64`.
    UInt64Encoder, u64, UInt64
);
signed_encoder!(
    /// Sign-flipped big-endian `i8`.
    Int8Encoder, i8, u8, Int8
);
signed_encoder!(
    /// Sign-flipped big-endian `i16`.
    Int16Encoder, i16, u16, Int16
);
signed_encoder!(
    /// Sign-flipped big-endian `i32`.
    Int32Encoder, i32, u32, Int32
);
signed_encoder!(
    /// Sign-flipped big-endian `i64`.
    Int64Encoder, i64, u64, Int64
);

/// Single byte, `false` before `true`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolEncoder;

impl KeyEncoder for BoolEncoder {
    fn data_type(&self) -> DataType {
        DataType::Bool
    }

    fn encode(&self, cell: Cell<'_>, _is_last: bool, dst: &mut BytesMut) {
        match cell {
            Cell::Bool(v) => dst.put_u8(u8::from(v)),
            other => type_mismatch(DataType::Bool, other),
        }
    }

    fn decode<'a>(
        &self,
        src: &mut &[u8],
        _is_last: bool,
        _arena: &'a Arena,
    ) -> CodecResult<Cell<'a>> {
        let [byte] = take_fixed::<1>(src, DataType::Bool)?;
        match byte {
            0 => Ok(Cell::Bool(false)),
            1 => Ok(Cell::Bool(true)),
            byte => Err(CodecError::InvalidBool { byte }),
        }
    }
}

/// Appends a variable-length payload.
///
/// The last key column is written verbatim: nothing follows it, so a
/// plain byte comparison already orders it correctly. Any earlier column
/// is escaped and terminated so that `"a" < "a\0" < "ab"` holds no matter
/// what the following columns contain.
fn encode_var(data: &[u8], is_last: bool, dst: &mut BytesMut) {
    if is_last {
        dst.put_slice(data);
        return;
    }
    dst.reserve(data.len() + 2);
    for &byte in data {
        if byte == 0x00 {
            dst.put_slice(&[0x00, ESCAPE]);
        } else {
            dst.put_u8(byte);
        }
    }
    dst.put_slice(&[0x00, TERMINATOR]);
}

/// Reads a variable-length payload written by [`encode_var`].
///
/// Borrows from `src` unless the payload contained escaped zeros.
fn decode_var<'s>(
    src: &mut &'s [u8],
    is_last: bool,
    data_type: DataType,
) -> CodecResult<Cow<'s, [u8]>> {
    let input: &'s [u8] = *src;
    if is_last {
        *src = &[];
        return Ok(Cow::Borrowed(input));
    }

    let mut unescaped: Option<Vec<u8>> = None;
    let mut start = 0;
    loop {
        let zero = input[start..]
            .iter()
            .position(|&b| b == 0x00)
            .map(|pos| start + pos)
            .ok_or_else(|| CodecError::unexpected_eof(data_type))?;

        match input.get(zero + 1) {
            Some(&TERMINATOR) => {
                let value = match unescaped {
                    Some(mut buf) => {
                        buf.extend_from_slice(&input[start..zero]);
                        Cow::Owned(buf)
                    }
                    None => Cow::Borrowed(&input[..zero]),
                };
                *src = &input[zero + 2..];
                return Ok(value);
            }
            Some(&ESCAPE) => {
                let buf = unescaped.get_or_insert_with(|| Vec::with_capacity(input.len()));
                buf.extend_from_slice(&input[start..zero]);
                buf.push(0x00);
                start = zero + 2;
            }
            Some(_) => return Err(CodecError::invalid_escape(zero)),
            None => return Err(CodecError::unexpected_eof(data_type)),
        }
    }
}

/// UTF-8 strings, escaped unless last.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringEncoder;

impl KeyEncoder for StringEncoder {
    fn data_type(&self) -> DataType {
        DataType::String
    }

    fn encode(&self, cell: Cell<'_>, is_last: bool, dst: &mut BytesMut) {
        match cell {
            Cell::String(v) => encode_var(v.as_bytes(), is_last, dst),
            other => type_mismatch(DataType::String, other),
        }
    }

    fn decode<'a>(
        &self,
        src: &mut &[u8],
        is_last: bool,
        arena: &'a Arena,
    ) -> CodecResult<Cell<'a>> {
        let bytes = decode_var(src, is_last, DataType::String)?;
        let text = std::str::from_utf8(&bytes).map_err(|_| CodecError::InvalidUtf8)?;
        Ok(Cell::String(arena.try_alloc_str(text)?))
    }
}

/// Raw bytes, escaped unless last.
#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryEncoder;

impl KeyEncoder for BinaryEncoder {
    fn data_type(&self) -> DataType {
        DataType::Binary
    }

    fn encode(&self, cell: Cell<'_>, is_last: bool, dst: &mut BytesMut) {
        match cell {
            Cell::Binary(v) => encode_var(v, is_last, dst),
            other => type_mismatch(DataType::Binary, other),
        }
    }

    fn decode<'a>(
        &self,
        src: &mut &[u8],
        is_last: bool,
        arena: &'a Arena,
    ) -> CodecResult<Cell<'a>> {
        let bytes = decode_var(src, is_last, DataType::Binary)?;
        Ok(Cell::Binary(arena.try_alloc_bytes(&bytes)?))
    }
}
