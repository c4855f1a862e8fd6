//! Incremental construction of encoded keys.

use crate::key::EncodedKey;
use crate::schema::Schema;
use crate::successor::advance_to_successor;
use bytes::BytesMut;
use ordkey_codec::{default_registry, Cell, EncoderRegistry};
use std::fmt;
use std::ptr;

/// Assembles an [`EncodedKey`] one key column at a time.
///
/// Columns must be added in schema order. Building hands the encoded
/// buffer over to the new key and rewinds the builder, so one builder can
/// be refilled for many keys while keeping its spare capacity.
///
/// A builder is private scratch state: it is `Send` but not meant to be
/// shared, and it does no internal locking.
///
/// # Panics
///
/// Adding more values than the schema has key columns, adding a null, or
/// adding a value whose type differs from the column's are programming
/// errors and panic.
#[derive(Clone)]
pub struct EncodedKeyBuilder<'s, 'a> {
    schema: &'s Schema,
    registry: &'s dyn EncoderRegistry,
    buffer: BytesMut,
    column_values: Vec<Cell<'a>>,
    next_column: usize,
}

impl<'s, 'a> EncodedKeyBuilder<'s, 'a> {
    /// Creates a builder that uses the default encoders.
    pub fn new(schema: &'s Schema) -> Self {
        Self::with_registry(schema, default_registry())
    }

    /// Creates a builder that looks encoders up in `registry`.
    pub fn with_registry(schema: &'s Schema, registry: &'s dyn EncoderRegistry) -> Self {
        Self {
            schema,
            registry,
            buffer: BytesMut::with_capacity(schema.key_byte_size()),
            column_values: Vec::with_capacity(schema.num_key_columns()),
            next_column: 0,
        }
    }

    /// Discards everything added so far.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.column_values.clear();
        self.next_column = 0;
        self.buffer.reserve(self.schema.key_byte_size());
    }

    /// Encodes `cell` as the next key column.
    ///
    /// The final key column is encoded without length delimiting; every
    /// earlier column is encoded so that its end is unambiguous.
    pub fn add_column_key(&mut self, cell: Cell<'a>) {
        let num_key_columns = self.schema.num_key_columns();
        assert!(
            self.next_column < num_key_columns,
            "all {num_key_columns} key columns have already been added"
        );
        let column = self.schema.column(self.next_column);
        assert!(
            !cell.is_null(),
            "key column {} cannot hold a null value",
            column.name()
        );
        assert_eq!(
            cell.data_type(),
            Some(column.data_type()),
            "value type does not match key column {}",
            column.name()
        );

        let is_last = self.next_column + 1 == num_key_columns;
        self.registry
            .encoder(column.data_type())
            .encode(cell, is_last, &mut self.buffer);
        self.column_values.push(cell);
        self.next_column += 1;
    }

    /// Moves the encoded buffer and values into a new key.
    ///
    /// Returns `None` if no column has been added.
    pub fn build_encoded_key(&mut self) -> Option<EncodedKey<'a>> {
        if self.next_column == 0 {
            return None;
        }
        let encoded = self.buffer.split().freeze();
        let column_values = std::mem::take(&mut self.column_values);
        self.next_column = 0;
        Some(EncodedKey::new(
            encoded,
            column_values,
            self.schema.num_key_columns(),
        ))
    }

    /// Turns the buffer into its successor, then builds a key from it.
    ///
    /// Returns `None`, leaving the builder untouched, when no column has
    /// been added or the buffer has no successor (every byte is `0xff`).
    pub fn build_successor_encoded_key(&mut self) -> Option<EncodedKey<'a>> {
        if self.next_column == 0 || !advance_to_successor(&mut self.buffer) {
            return None;
        }
        self.build_encoded_key()
    }

    /// Consumes the builder and returns its key.
    pub fn finish(mut self) -> Option<EncodedKey<'a>> {
        self.build_encoded_key()
    }

    /// Consumes the builder and returns the successor of its key.
    pub fn finish_successor(mut self) -> Option<EncodedKey<'a>> {
        self.build_successor_encoded_key()
    }

    /// Makes this builder a copy of `other`, reusing this builder's buffer.
    ///
    /// # Panics
    ///
    /// Panics if the two builders were created for different schemas.
    pub fn assign_copy(&mut self, other: &EncodedKeyBuilder<'_, 'a>) {
        assert!(
            ptr::eq(self.schema, other.schema) || self.schema == other.schema,
            "cannot copy a key builder for schema {} into one for schema {}",
            other.schema,
            self.schema
        );
        self.buffer.clear();
        self.buffer.extend_from_slice(&other.buffer);
        self.column_values.clear();
        self.column_values.extend_from_slice(&other.column_values);
        self.next_column = other.next_column;
    }

    /// The schema keys are built against.
    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Number of key columns added since the last build or reset.
    pub fn num_columns_added(&self) -> usize {
        self.next_column
    }

    /// Whether no key column has been added since the last build or reset.
    pub fn is_empty(&self) -> bool {
        self.next_column == 0
    }

    /// The bytes encoded so far.
    pub fn encoded(&self) -> &[u8] {
        &self.buffer
    }
}

impl fmt::Debug for EncodedKeyBuilder<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedKeyBuilder")
            .field("schema", &self.schema.to_string())
            .field("encoded_len", &self.buffer.len())
            .field("column_values", &self.column_values)
            .field("next_column", &self.next_column)
            .finish_non_exhaustive()
    }
}
