//! Column type tags and typed value views.

use crate::display::from_hex;
use crate::error::{CodecError, CodecResult};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Type tag of a column.
///
/// The tag selects the key encoder used for the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataType {
    /// Boolean.
    Bool,
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 8-bit integer.
    UInt8,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Unsigned 64-bit integer.
    UInt64,
    /// UTF-8 string.
    String,
    /// Arbitrary bytes.
    Binary,
}

impl DataType {
    /// Every type tag, in declaration order.
    pub const ALL: [DataType; 11] = [
        DataType::Bool,
        DataType::Int8,
        DataType::Int16,
        DataType::Int32,
        DataType::Int64,
        DataType::UInt8,
        DataType::UInt16,
        DataType::UInt32,
        DataType::UInt64,
        DataType::String,
        DataType::Binary,
    ];

    /// Size of one decoded value in a row slot.
    ///
    /// Variable-length types count as a pointer plus a length.
    pub const fn size(self) -> usize {
        match self {
            DataType::Bool | DataType::Int8 | DataType::UInt8 => 1,
            DataType::Int16 | DataType::UInt16 => 2,
            DataType::Int32 | DataType::UInt32 => 4,
            DataType::Int64 | DataType::UInt64 => 8,
            DataType::String | DataType::Binary => 16,
        }
    }

    /// Returns true for types whose encoding length depends on the value.
    pub const fn is_variable_length(self) -> bool {
        matches!(self, DataType::String | DataType::Binary)
    }

    /// Lowercase type name, as accepted by [`DataType::from_str`].
    pub const fn name(self) -> &'static str {
        match self {
            DataType::Bool => "bool",
            DataType::Int8 => "int8",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::UInt8 => "uint8",
            DataType::UInt16 => "uint16",
            DataType::UInt32 => "uint32",
            DataType::UInt64 => "uint64",
            DataType::String => "string",
            DataType::Binary => "binary",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = CodecError;

    fn from_str(s: &str) -> CodecResult<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        DataType::ALL
            .into_iter()
            .find(|ty| ty.name() == lowered)
            .ok_or_else(|| CodecError::unknown_type(s))
    }
}

/// A typed view of one column value.
///
/// Scalars are held inline. Strings and binaries borrow their payload from
/// storage that must outlive the view: caller memory when a key is built,
/// or an [`Arena`](crate::Arena) when a key is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell<'a> {
    /// SQL-style null. Never valid in a key column.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 8-bit integer.
    Int8(i8),
    /// Signed 16-bit integer.
    Int16(i16),
    /// Signed 32-bit integer.
    Int32(i32),
    /// Signed 64-bit integer.
    Int64(i64),
    /// Unsigned 8-bit integer.
    UInt8(u8),
    /// Unsigned 16-bit integer.
    UInt16(u16),
    /// Unsigned 32-bit integer.
    UInt32(u32),
    /// Unsigned 64-bit integer.
    UInt64(u64),
    /// UTF-8 string.
    String(&'a str),
    /// Arbitrary bytes.
    Binary(&'a [u8]),
}

impl<'a> Cell<'a> {
    /// Type of the value, or `None` for [`Cell::Null`].
    pub const fn data_type(&self) -> Option<DataType> {
        Some(match self {
            Cell::Null => return None,
            Cell::Bool(_) => DataType::Bool,
            Cell::Int8(_) => DataType::Int8,
            Cell::Int16(_) => DataType::Int16,
            Cell::Int32(_) => DataType::Int32,
            Cell::Int64(_) => DataType::Int64,
            Cell::UInt8(_) => DataType::UInt8,
            Cell::UInt16(_) => DataType::UInt16,
            Cell::UInt32(_) => DataType::UInt32,
            Cell::UInt64(_) => DataType::UInt64,
            Cell::String(_) => DataType::String,
            Cell::Binary(_) => DataType::Binary,
        })
    }

    /// Returns true for [`Cell::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Copies the value into an [`OwnedCell`].
    pub fn to_owned_cell(&self) -> OwnedCell {
        match *self {
            Cell::Null => OwnedCell::Null,
            Cell::Bool(v) => OwnedCell::Bool(v),
            Cell::Int8(v) => OwnedCell::Int8(v),
            Cell::Int16(v) => OwnedCell::Int16(v),
            Cell::Int32(v) => OwnedCell::Int32(v),
            Cell::Int64(v) => OwnedCell::Int64(v),
            Cell::UInt8(v) => OwnedCell::UInt8(v),
            Cell::UInt16(v) => OwnedCell::UInt16(v),
            Cell::UInt32(v) => OwnedCell::UInt32(v),
            Cell::UInt64(v) => OwnedCell::UInt64(v),
            Cell::String(v) => OwnedCell::String(v.to_owned()),
            Cell::Binary(v) => OwnedCell::Binary(v.to_vec()),
        }
    }
}

/// Cells of the same type compare by value; cells of different types
/// (including null) are unordered.
impl PartialOrd for Cell<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Cell::Bool(a), Cell::Bool(b)) => a.partial_cmp(b),
            (Cell::Int8(a), Cell::Int8(b)) => a.partial_cmp(b),
            (Cell::Int16(a), Cell::Int16(b)) => a.partial_cmp(b),
            (Cell::Int32(a), Cell::Int32(b)) => a.partial_cmp(b),
            (Cell::Int64(a), Cell::Int64(b)) => a.partial_cmp(b),
            (Cell::UInt8(a), Cell::UInt8(b)) => a.partial_cmp(b),
            (Cell::UInt16(a), Cell::UInt16(b)) => a.partial_cmp(b),
            (Cell::UInt32(a), Cell::UInt32(b)) => a.partial_cmp(b),
            (Cell::UInt64(a), Cell::UInt64(b)) => a.partial_cmp(b),
            (Cell::String(a), Cell::String(b)) => a.partial_cmp(b),
            (Cell::Binary(a), Cell::Binary(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl<'a> From<&'a str> for Cell<'a> {
    fn from(v: &'a str) -> Self {
        Cell::String(v)
    }
}

impl<'a> From<&'a [u8]> for Cell<'a> {
    fn from(v: &'a [u8]) -> Self {
        Cell::Binary(v)
    }
}

macro_rules! cell_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Cell<'_> {
                fn from(v: $ty) -> Self {
                    Cell::$variant(v)
                }
            }
        )*
    };
}

cell_from_scalar!(
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
);

/// An owned column value.
///
/// Used where values have no backing storage to borrow from, such as
/// parsed literals and generated test data. [`OwnedCell::as_cell`] gives
/// the borrowed view the key builder consumes.
///
/// Within one type the derived ordering is the natural value ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OwnedCell {
    /// SQL-style null.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 8-bit integer.
    Int8(i8),
    /// Signed 16-bit integer.
    Int16(i16),
    /// Signed 32-bit integer.
    Int32(i32),
    /// Signed 64-bit integer.
    Int64(i64),
    /// Unsigned 8-bit integer.
    UInt8(u8),
    /// Unsigned 16-bit integer.
    UInt16(u16),
    /// Unsigned 32-bit integer.
    UInt32(u32),
    /// Unsigned 64-bit integer.
    UInt64(u64),
    /// UTF-8 string.
    String(String),
    /// Arbitrary bytes.
    Binary(Vec<u8>),
}

impl OwnedCell {
    /// Borrowed view of this value.
    pub fn as_cell(&self) -> Cell<'_> {
        match self {
            OwnedCell::Null => Cell::Null,
            OwnedCell::Bool(v) => Cell::Bool(*v),
            OwnedCell::Int8(v) => Cell::Int8(*v),
            OwnedCell::Int16(v) => Cell::Int16(*v),
            OwnedCell::Int32(v) => Cell::Int32(*v),
            OwnedCell::Int64(v) => Cell::Int64(*v),
            OwnedCell::UInt8(v) => Cell::UInt8(*v),
            OwnedCell::UInt16(v) => Cell::UInt16(*v),
            OwnedCell::UInt32(v) => Cell::UInt32(*v),
            OwnedCell::UInt64(v) => Cell::UInt64(*v),
            OwnedCell::String(v) => Cell::String(v),
            OwnedCell::Binary(v) => Cell::Binary(v),
        }
    }

    /// Parses a textual literal as a value of `data_type`.
    ///
    /// Binary literals prefixed with `0x` are read as hex, anything else is
    /// taken as its UTF-8 bytes.
    pub fn parse(data_type: DataType, text: &str) -> CodecResult<Self> {
        let invalid = || CodecError::invalid_literal(data_type, text);
        Ok(match data_type {
            DataType::Bool => OwnedCell::Bool(text.parse().map_err(|_| invalid())?),
            DataType::Int8 => OwnedCell::Int8(text.parse().map_err(|_| invalid())?),
            DataType::Int16 => OwnedCell::Int16(text.parse().map_err(|_| invalid())?),
            DataType::Int32 => OwnedCell::Int32(text.parse().map_err(|_| invalid())?),
            DataType::Int64 => OwnedCell::Int64(text.parse().map_err(|_| invalid())?),
            DataType::UInt8 => OwnedCell::UInt8(text.parse().map_err(|_| invalid())?),
            DataType::UInt16 => OwnedCell::UInt16(text.parse().map_err(|_| invalid())?),
            DataType::UInt32 => OwnedCell::UInt32(text.parse().map_err(|_| invalid())?),
            DataType::UInt64 => OwnedCell::UInt64(text.parse().map_err(|_| invalid())?),
            DataType::String => OwnedCell::String(text.to_owned()),
            DataType::Binary => match text.strip_prefix("0x") {
                Some(hex) => OwnedCell::Binary(from_hex(hex).ok_or_else(invalid)?),
                None => OwnedCell::Binary(text.as_bytes().to_vec()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_round_trip() {
        for ty in DataType::ALL {
            assert_eq!(ty.name().parse::<DataType>().unwrap(), ty);
        }
        assert_eq!("UInt32".parse::<DataType>().unwrap(), DataType::UInt32);
    }

    #[test]
    fn unknown_type_name() {
        let err = "float".parse::<DataType>().unwrap_err();
        assert_eq!(err, CodecError::unknown_type("float"));
    }

    #[test]
    fn cell_reports_type() {
        assert_eq!(Cell::from(5u32).data_type(), Some(DataType::UInt32));
        assert_eq!(Cell::from("x").data_type(), Some(DataType::String));
        assert_eq!(Cell::Null.data_type(), None);
        assert!(Cell::Null.is_null());
    }

    #[test]
    fn cells_of_different_types_are_unordered() {
        assert_eq!(Cell::Int32(1).partial_cmp(&Cell::Int64(1)), None);
        assert_eq!(Cell::Null.partial_cmp(&Cell::Null), None);
        assert!(Cell::Int32(-1) < Cell::Int32(1));
        assert!(Cell::String("a") < Cell::String("ab"));
    }

    #[test]
    fn owned_cell_round_trip() {
        let owned = OwnedCell::String("hello".into());
        assert_eq!(owned.as_cell(), Cell::String("hello"));
        assert_eq!(owned.as_cell().to_owned_cell(), owned);
    }

    #[test]
    fn parse_literals() {
        assert_eq!(
            OwnedCell::parse(DataType::Int16, "-12").unwrap(),
            OwnedCell::Int16(-12)
        );
        assert_eq!(
            OwnedCell::parse(DataType::Bool, "true").unwrap(),
            OwnedCell::Bool(true)
        );
        assert_eq!(
            OwnedCell::parse(DataType::Binary, "0x00ff").unwrap(),
            OwnedCell::Binary(vec![0x00, 0xff])
        );
        assert_eq!(
            OwnedCell::parse(DataType::Binary, "ab").unwrap(),
            OwnedCell::Binary(b"ab".to_vec())
        );
    }

    #[test]
    fn parse_rejects_out_of_range() {
        let err = OwnedCell::parse(DataType::UInt8, "256").unwrap_err();
        assert_eq!(err, CodecError::invalid_literal(DataType::UInt8, "256"));
        assert!(OwnedCell::parse(DataType::Binary, "0xabc").is_err());
    }
}
