//! Column catalog that key encoding and decoding are defined against.

use crate::error::{CoreError, CoreResult};
use ordkey_codec::{
    default_registry, escape_binary, Arena, Cell, CodecError, CodecResult, DataType,
    EncoderRegistry,
};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// One column of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnSchema {
    name: String,
    data_type: DataType,
    nullable: bool,
}

impl ColumnSchema {
    /// Creates a non-nullable column.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: false,
        }
    }

    /// Marks the column nullable. Key columns may not be nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Whether the column accepts nulls.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Formats a value of this column for display.
    pub fn stringify(&self, cell: &Cell<'_>) -> String {
        match *cell {
            Cell::Null => "NULL".to_string(),
            Cell::Bool(v) => v.to_string(),
            Cell::Int8(v) => v.to_string(),
            Cell::Int16(v) => v.to_string(),
            Cell::Int32(v) => v.to_string(),
            Cell::Int64(v) => v.to_string(),
            Cell::UInt8(v) => v.to_string(),
            Cell::UInt16(v) => v.to_string(),
            Cell::UInt32(v) => v.to_string(),
            Cell::UInt64(v) => v.to_string(),
            Cell::String(v) => format!("\"{}\"", v.escape_debug()),
            Cell::Binary(v) => escape_binary(v),
        }
    }
}

impl fmt::Display for ColumnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.data_type)?;
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Parses `name:type`, with a trailing `?` for a nullable column.
impl FromStr for ColumnSchema {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let (name, ty) = s
            .split_once(':')
            .ok_or_else(|| CoreError::invalid_schema(format!("expected name:type, got {s:?}")))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::invalid_schema(format!("empty column name in {s:?}")));
        }
        let (ty, nullable) = match ty.trim().strip_suffix('?') {
            Some(ty) => (ty, true),
            None => (ty, false),
        };
        let column = ColumnSchema::new(name, ty.parse::<DataType>()?);
        Ok(if nullable { column.nullable() } else { column })
    }
}

/// An ordered set of columns, the first `num_key_columns` of which form the
/// primary sort key.
///
/// Two schemas are the same when their columns (names, types, nullability)
/// and key column count are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<ColumnSchema>,
    num_key_columns: usize,
    key_byte_size: usize,
}

impl Schema {
    /// Creates a schema whose first `num_key_columns` columns are the key.
    ///
    /// # Errors
    ///
    /// Fails if there are no key columns, more key columns than columns, a
    /// nullable key column, or duplicate column names.
    pub fn new(columns: Vec<ColumnSchema>, num_key_columns: usize) -> CoreResult<Self> {
        if num_key_columns == 0 {
            return Err(CoreError::invalid_schema("at least one key column is required"));
        }
        if num_key_columns > columns.len() {
            return Err(CoreError::invalid_schema(format!(
                "{num_key_columns} key columns requested but only {} columns defined",
                columns.len()
            )));
        }
        if let Some(column) = columns[..num_key_columns].iter().find(|c| c.is_nullable()) {
            return Err(CoreError::invalid_schema(format!(
                "key column {} cannot be nullable",
                column.name()
            )));
        }
        let mut seen = HashSet::with_capacity(columns.len());
        if let Some(column) = columns.iter().find(|c| !seen.insert(c.name())) {
            return Err(CoreError::invalid_schema(format!(
                "duplicate column name {}",
                column.name()
            )));
        }

        let key_byte_size = columns[..num_key_columns]
            .iter()
            .map(|c| c.data_type().size())
            .sum();
        Ok(Self {
            columns,
            num_key_columns,
            key_byte_size,
        })
    }

    /// Parses a comma-separated list of `name:type[?]` columns. When
    /// `num_key_columns` is `None` every column is a key column.
    ///
    /// ```
    /// use ordkey_core::Schema;
    ///
    /// let schema = Schema::parse("host:string,ts:int64,value:uint32?", Some(2)).unwrap();
    /// assert_eq!(schema.num_columns(), 3);
    /// assert_eq!(schema.num_key_columns(), 2);
    /// ```
    pub fn parse(spec: &str, num_key_columns: Option<usize>) -> CoreResult<Self> {
        let columns = spec
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<CoreResult<Vec<ColumnSchema>>>()?;
        let num_key_columns = num_key_columns.unwrap_or(columns.len());
        Self::new(columns, num_key_columns)
    }

    /// All columns, key columns first.
    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    /// Column at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    pub fn column(&self, idx: usize) -> &ColumnSchema {
        &self.columns[idx]
    }

    /// Looks up a column index by name.
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Total number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of leading columns that form the key.
    pub fn num_key_columns(&self) -> usize {
        self.num_key_columns
    }

    /// Whether column `idx` is part of the key.
    pub fn is_key_column(&self, idx: usize) -> bool {
        idx < self.num_key_columns
    }

    /// Slot of key column `idx` within a decoded key row.
    pub fn column_offset(&self, idx: usize) -> usize {
        debug_assert!(idx < self.num_key_columns);
        idx
    }

    /// Combined decoded size of the key columns, used to presize key
    /// buffers.
    pub fn key_byte_size(&self) -> usize {
        self.key_byte_size
    }

    /// Decodes every key column of `encoded` into `dst`, using the default
    /// encoders.
    ///
    /// See [`Schema::decode_row_key_with`].
    pub fn decode_row_key<'a>(
        &self,
        encoded: &[u8],
        dst: &mut [Cell<'a>],
        arena: &'a Arena,
    ) -> CodecResult<()> {
        self.decode_row_key_with(default_registry(), encoded, dst, arena)
    }

    /// Decodes every key column of `encoded` into
    /// `dst[self.column_offset(i)]`, copying variable-length values into
    /// `arena`.
    ///
    /// # Errors
    ///
    /// Fails if a column is malformed, the arena is exhausted, or bytes are
    /// left over after the last key column.
    ///
    /// # Panics
    ///
    /// Panics if `dst` has fewer than [`num_key_columns`](Self::num_key_columns)
    /// slots.
    pub fn decode_row_key_with<'a>(
        &self,
        registry: &dyn EncoderRegistry,
        encoded: &[u8],
        dst: &mut [Cell<'a>],
        arena: &'a Arena,
    ) -> CodecResult<()> {
        assert!(
            dst.len() >= self.num_key_columns,
            "key row has {} slots but the schema has {} key columns",
            dst.len(),
            self.num_key_columns
        );

        let mut remaining = encoded;
        for (idx, column) in self.columns[..self.num_key_columns].iter().enumerate() {
            let is_last = idx + 1 == self.num_key_columns;
            let encoder = registry.encoder(column.data_type());
            dst[self.column_offset(idx)] = encoder.decode(&mut remaining, is_last, arena)?;
        }
        if !remaining.is_empty() {
            return Err(CodecError::TrailingBytes {
                remaining: remaining.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (idx, column) in self.columns.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{column}")?;
        }
        write!(f, ") key({})", self.num_key_columns)
    }
}
