//! Encoded composite keys.

use crate::builder::EncodedKeyBuilder;
use crate::error::{CoreError, CoreResult};
use crate::schema::Schema;
use bytes::Bytes;
use ordkey_codec::{debug_string, default_registry, Arena, Cell, EncoderRegistry};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::{debug, error, trace};

/// Rendering of a range with neither bound.
pub const INVALID_RANGE: &str = "invalid key range";

/// A composite key: the sortable encoded bytes plus the typed values they
/// were built from.
///
/// Keys compare, hash and test equal by their encoded bytes alone, which
/// order the same way the typed tuples do.
///
/// The typed values borrow from storage with lifetime `'a`: the caller's
/// own values when the key came from an [`EncodedKeyBuilder`], or the
/// [`Arena`] passed to [`EncodedKey::decode_from`].
///
/// A key may hold fewer values than `num_key_columns`; such a prefix key
/// matches every full key that starts with those values.
///
/// # Example
///
/// ```
/// use ordkey_core::{EncodedKeyBuilder, Schema};
/// use ordkey_codec::Cell;
///
/// let schema = Schema::parse("id:uint32", None).unwrap();
/// let mut builder = EncodedKeyBuilder::new(&schema);
/// builder.add_column_key(Cell::UInt32(5));
/// let key = builder.build_encoded_key().unwrap();
/// assert_eq!(key.as_bytes(), &[0, 0, 0, 5]);
///
/// let next = key.successor(&schema).unwrap();
/// assert_eq!(next.as_bytes(), &[0, 0, 0, 6]);
/// ```
#[derive(Clone)]
pub struct EncodedKey<'a> {
    encoded: Bytes,
    column_values: Vec<Cell<'a>>,
    num_key_columns: usize,
}

impl<'a> EncodedKey<'a> {
    pub(crate) fn new(encoded: Bytes, column_values: Vec<Cell<'a>>, num_key_columns: usize) -> Self {
        debug_assert!(
            column_values.len() <= num_key_columns,
            "{} values for {num_key_columns} key columns",
            column_values.len()
        );
        Self {
            encoded,
            column_values,
            num_key_columns,
        }
    }

    /// Decodes `encoded` against `schema` using the default encoders.
    ///
    /// See [`EncodedKey::decode_from_with`].
    pub fn decode_from(schema: &Schema, arena: &'a Arena, encoded: &[u8]) -> CoreResult<Self> {
        Self::decode_from_with(schema, default_registry(), arena, encoded)
    }

    /// Decodes `encoded` against `schema`.
    ///
    /// The typed values are decoded into a scratch row allocated from
    /// `arena` and borrow from it. The key keeps a private copy of
    /// `encoded`, so the caller's buffer may be reused immediately.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OutOfMemory`] if the arena cannot supply the
    /// scratch row, and [`CoreError::Codec`] if the bytes are malformed.
    pub fn decode_from_with(
        schema: &Schema,
        registry: &dyn EncoderRegistry,
        arena: &'a Arena,
        encoded: &[u8],
    ) -> CoreResult<Self> {
        trace!(len = encoded.len(), "decoding encoded key");
        let num_key_columns = schema.num_key_columns();
        let row = arena.try_alloc_row(num_key_columns)?;

        if let Err(err) = schema.decode_row_key_with(registry, encoded, row, arena) {
            debug!(error = %err, key = %debug_string(encoded), "failed to decode encoded key");
            return Err(err.into());
        }

        let column_values = (0..num_key_columns)
            .map(|idx| row[schema.column_offset(idx)])
            .collect();
        Ok(Self::new(
            Bytes::copy_from_slice(encoded),
            column_values,
            num_key_columns,
        ))
    }

    /// Computes the successor of this key using the default encoders.
    ///
    /// See [`EncodedKey::successor_with`].
    pub fn successor(&self, schema: &Schema) -> CoreResult<EncodedKey<'a>> {
        self.successor_with(schema, default_registry())
    }

    /// Re-encodes this key's values through a fresh builder and returns the
    /// smallest key, no longer than that encoding (or one byte when it is
    /// empty), that sorts after it.
    ///
    /// The result carries the same typed values as `self`; only the encoded
    /// bytes differ.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoSuccessor`] when the encoding is non-empty and
    /// every byte of it is `0xff`. An empty encoding (a lone empty string or
    /// binary value) is followed by `0x00`.
    ///
    /// # Panics
    ///
    /// Panics if the key was built against a schema with a different number
    /// of key columns.
    pub fn successor_with(
        &self,
        schema: &Schema,
        registry: &dyn EncoderRegistry,
    ) -> CoreResult<EncodedKey<'a>> {
        assert_eq!(
            self.num_key_columns,
            schema.num_key_columns(),
            "key was built for a different number of key columns"
        );
        let mut builder = EncodedKeyBuilder::with_registry(schema, registry);
        for &cell in &self.column_values {
            builder.add_column_key(cell);
        }
        match builder.finish_successor() {
            Some(successor) => {
                trace!(
                    key = %debug_string(&self.encoded),
                    successor = %debug_string(&successor.encoded),
                    "computed key successor"
                );
                Ok(successor)
            }
            None => {
                debug!(key = %debug_string(&self.encoded), "no successor exists");
                Err(CoreError::NoSuccessor)
            }
        }
    }

    /// Formats the key's values with the schema's column formatters.
    ///
    /// A single-column key renders as the bare value. Wider keys render as
    /// `(v0,v1,...)`, with `*` for each column the key does not cover.
    pub fn stringify(&self, schema: &Schema) -> String {
        if self.num_key_columns == 1 {
            return match self.column_values.first() {
                Some(cell) => schema.column(0).stringify(cell),
                None => "*".to_string(),
            };
        }

        let mut out = String::from("(");
        for idx in 0..self.num_key_columns {
            if idx > 0 {
                out.push(',');
            }
            match self.column_values.get(idx) {
                Some(cell) => out.push_str(&schema.column(idx).stringify(cell)),
                None => out.push('*'),
            }
        }
        out.push(')');
        out
    }

    /// Describes a key range for diagnostics.
    ///
    /// ```
    /// use ordkey_core::{EncodedKey, INVALID_RANGE};
    ///
    /// assert_eq!(EncodedKey::describe_range(None, None), INVALID_RANGE);
    /// ```
    pub fn describe_range(lower: Option<&EncodedKey<'_>>, upper: Option<&EncodedKey<'_>>) -> String {
        match (lower, upper) {
            (Some(lower), Some(upper)) => format!(
                "encoded key BETWEEN {} AND {}",
                debug_string(&lower.encoded),
                debug_string(&upper.encoded)
            ),
            (Some(lower), None) => format!("encoded key >= {}", debug_string(&lower.encoded)),
            (None, Some(upper)) => format!("encoded key <= {}", debug_string(&upper.encoded)),
            (None, None) => {
                error!("asked to describe a key range with no bounds");
                INVALID_RANGE.to_string()
            }
        }
    }

    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.encoded
    }

    /// A shared handle to the encoded bytes.
    pub fn to_bytes(&self) -> Bytes {
        self.encoded.clone()
    }

    /// Length of the encoding.
    pub fn len(&self) -> usize {
        self.encoded.len()
    }

    /// Whether the encoding is empty.
    pub fn is_empty(&self) -> bool {
        self.encoded.is_empty()
    }

    /// The typed values, one per encoded key column.
    pub fn column_values(&self) -> &[Cell<'a>] {
        &self.column_values
    }

    /// Key column count of the schema the key was built against.
    pub fn num_key_columns(&self) -> usize {
        self.num_key_columns
    }

    /// Whether the key covers fewer columns than the schema's key.
    pub fn is_partial(&self) -> bool {
        self.column_values.len() < self.num_key_columns
    }
}

impl AsRef<[u8]> for EncodedKey<'_> {
    fn as_ref(&self) -> &[u8] {
        &self.encoded
    }
}

impl PartialEq for EncodedKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.encoded == other.encoded
    }
}

impl Eq for EncodedKey<'_> {}

impl PartialOrd for EncodedKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EncodedKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.encoded.cmp(&other.encoded)
    }
}

impl Hash for EncodedKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.encoded.hash(state);
    }
}

impl fmt::Debug for EncodedKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedKey")
            .field("encoded", &debug_string(&self.encoded))
            .field("column_values", &self.column_values)
            .field("num_key_columns", &self.num_key_columns)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnSchema;
    use ordkey_codec::{ArenaConfig, CodecError, DataType};

    fn schema(spec: &str) -> Schema {
        Schema::parse(spec, None).unwrap()
    }

    fn build<'a>(schema: &Schema, cells: &[Cell<'a>]) -> EncodedKey<'a> {
        let mut builder = EncodedKeyBuilder::new(schema);
        for &cell in cells {
            builder.add_column_key(cell);
        }
        builder.build_encoded_key().unwrap()
    }

    #[test]
    fn uint32_example() {
        let schema = schema("id:uint32");
        let key = build(&schema, &[Cell::UInt32(5)]);
        assert_eq!(key.as_bytes(), &[0, 0, 0, 5]);

        let next = key.successor(&schema).unwrap();
        assert_eq!(next, build(&schema, &[Cell::UInt32(6)]));

        let arena = Arena::new();
        let decoded = EncodedKey::decode_from(&schema, &arena, key.as_bytes()).unwrap();
        assert_eq!(decoded.column_values(), &[Cell::UInt32(5)]);
        assert_eq!(decoded, key);
    }

    #[test]
    fn all_max_bytes_have_no_successor() {
        let schema = schema("a:uint8,b:uint8");
        let key = build(&schema, &[Cell::UInt8(0xff), Cell::UInt8(0xff)]);
        let err = key.successor(&schema).unwrap_err();
        assert!(err.is_no_successor());
    }

    #[test]
    fn empty_string_key_has_successor() {
        let schema = schema("s:string");
        let key = build(&schema, &[Cell::String("")]);
        assert!(key.is_empty());

        let next = key.successor(&schema).unwrap();
        assert_eq!(next.as_bytes(), &[0x00]);
        assert!(next > key);
        assert_eq!(next.column_values(), &[Cell::String("")]);
        // The smallest non-empty string is the successor itself.
        assert_eq!(next, build(&schema, &[Cell::String("\0")]));
        assert!(next < build(&schema, &[Cell::String("a")]));
    }

    #[test]
    fn successor_truncates_and_keeps_values() {
        let schema = schema("a:uint8,b:uint8");
        let key = build(&schema, &[Cell::UInt8(3), Cell::UInt8(0xff)]);
        let next = key.successor(&schema).unwrap();
        assert_eq!(next.as_bytes(), &[4]);
        assert_eq!(next.column_values(), key.column_values());
        assert!(next > key);
    }

    #[test]
    fn decode_copies_input() {
        let schema = schema("name:string,id:int32");
        let arena = Arena::new();
        let encoded = build(&schema, &[Cell::String("bob"), Cell::Int32(-2)]).to_bytes();

        let mut scratch = encoded.to_vec();
        let key = EncodedKey::decode_from(&schema, &arena, &scratch).unwrap();
        scratch.fill(0);

        assert_eq!(key.as_bytes(), &encoded[..]);
        assert_eq!(key.column_values(), &[Cell::String("bob"), Cell::Int32(-2)]);
        assert_eq!(key.num_key_columns(), 2);
        assert!(!key.is_partial());
    }

    #[test]
    fn decode_propagates_codec_errors() {
        let schema = schema("id:uint32");
        let arena = Arena::new();
        let err = EncodedKey::decode_from(&schema, &arena, &[0, 1]).unwrap_err();
        assert_eq!(err, CoreError::Codec(CodecError::unexpected_eof(DataType::UInt32)));
    }

    #[test]
    fn decode_reports_out_of_memory() {
        let schema = schema("id:uint32");
        let arena = Arena::with_config(&ArenaConfig::new().initial_capacity(0).allocation_limit(0));
        let err = EncodedKey::decode_from(&schema, &arena, &[0, 0, 0, 1]).unwrap_err();
        assert!(matches!(err, CoreError::OutOfMemory(_)));
        assert!(err.is_out_of_memory());
    }

    #[test]
    fn stringify_single_and_composite() {
        let single = schema("id:int64");
        assert_eq!(build(&single, &[Cell::Int64(-9)]).stringify(&single), "-9");

        let composite = schema("host:string,port:uint16");
        let key = build(&composite, &[Cell::String("db1"), Cell::UInt16(5432)]);
        assert_eq!(key.stringify(&composite), "(\"db1\",5432)");
    }

    #[test]
    fn stringify_prefix_uses_wildcards() {
        let schema = Schema::new(
            vec![
                ColumnSchema::new("a", DataType::Int8),
                ColumnSchema::new("b", DataType::String),
                ColumnSchema::new("c", DataType::Bool),
            ],
            3,
        )
        .unwrap();
        let prefix = build(&schema, &[Cell::Int8(1)]);
        assert!(prefix.is_partial());
        assert_eq!(prefix.stringify(&schema), "(1,*,*)");
    }

    #[test]
    fn describe_range_forms() {
        let schema = schema("id:uint32");
        let lower = build(&schema, &[Cell::UInt32(1)]);
        let upper = build(&schema, &[Cell::UInt32(0x41)]);
        assert_eq!(
            EncodedKey::describe_range(Some(&lower), Some(&upper)),
            "encoded key BETWEEN \\x00\\x00\\x00\\x01 AND \\x00\\x00\\x00A"
        );
        assert_eq!(
            EncodedKey::describe_range(Some(&lower), None),
            "encoded key >= \\x00\\x00\\x00\\x01"
        );
        assert_eq!(
            EncodedKey::describe_range(None, Some(&upper)),
            "encoded key <= \\x00\\x00\\x00A"
        );
        assert_eq!(EncodedKey::describe_range(None, None), INVALID_RANGE);
    }

    #[test]
    fn ordering_follows_bytes() {
        let schema = schema("a:string,b:int32");
        let mut keys = vec![
            build(&schema, &[Cell::String("b"), Cell::Int32(0)]),
            build(&schema, &[Cell::String("a"), Cell::Int32(5)]),
            build(&schema, &[Cell::String("a"), Cell::Int32(-5)]),
            build(&schema, &[Cell::String(""), Cell::Int32(100)]),
        ];
        keys.sort();
        let rendered: Vec<_> = keys.iter().map(|k| k.stringify(&schema)).collect();
        assert_eq!(
            rendered,
            vec!["(\"\",100)", "(\"a\",-5)", "(\"a\",5)", "(\"b\",0)"]
        );
    }

    #[test]
    #[should_panic(expected = "different number of key columns")]
    fn successor_with_foreign_schema_panics() {
        let narrow = schema("a:uint8");
        let wide = schema("a:uint8,b:uint8");
        let key = build(&narrow, &[Cell::UInt8(1)]);
        let _ = key.successor(&wide);
    }
}
