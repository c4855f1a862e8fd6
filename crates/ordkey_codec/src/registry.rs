//! Type-keyed lookup of key encoders.

use crate::cell::DataType;
use crate::encoder::{
    BinaryEncoder, BoolEncoder, Int16Encoder, Int32Encoder, Int64Encoder, Int8Encoder,
    KeyEncoder, StringEncoder, UInt16Encoder, UInt32Encoder, UInt64Encoder, UInt8Encoder,
};

/// Source of key encoders, keyed by column type.
///
/// Key builders and row decoding take a registry so that callers can swap
/// in their own encoders; [`DefaultEncoders`] covers every [`DataType`].
pub trait EncoderRegistry: Send + Sync {
    /// Returns the encoder for `data_type`.
    fn encoder(&self, data_type: DataType) -> &dyn KeyEncoder;
}

/// The standard encoders.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultEncoders;

impl EncoderRegistry for DefaultEncoders {
    fn encoder(&self, data_type: DataType) -> &dyn KeyEncoder {
        match data_type {
            DataType::Bool => &BoolEncoder,
            DataType::Int8 => &Int8Encoder,
            DataType::Int16 => &Int16Encoder,
            DataType::Int32 => &Int32Encoder,
            DataType::Int64 => &Int64Encoder,
            DataType::UInt8 => &UInt8Encoder,
            DataType::UInt16 => &UInt16Encoder,
            DataType::UInt32 => &UInt32Encoder,
            DataType::UInt64 => &UInt64Encoder,
            DataType::String => &StringEncoder,
            DataType::Binary => &BinaryEncoder,
        }
    }
}

static DEFAULT_ENCODERS: DefaultEncoders = DefaultEncoders;

/// Shared instance of [`DefaultEncoders`].
pub fn default_registry() -> &'static DefaultEncoders {
    &DEFAULT_ENCODERS
}
