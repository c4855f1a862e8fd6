//! Helpers shared by tests and tools.

use ordkey_codec::OwnedCell;
use ordkey_core::{EncodedKey, EncodedKeyBuilder, Schema};

/// Builds a key from owned values, one per leading key column.
///
/// # Panics
///
/// Panics if `values` is empty or does not fit the schema.
pub fn build_key<'a>(schema: &Schema, values: &'a [OwnedCell]) -> EncodedKey<'a> {
    let mut builder = EncodedKeyBuilder::new(schema);
    for value in values {
        builder.add_column_key(value.as_cell());
    }
    builder
        .finish()
        .expect("at least one key value is required")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_prefix_keys() {
        let schema = Schema::parse("a:uint8,b:bool", None).unwrap();
        let values = vec![OwnedCell::UInt8(7)];
        let key = build_key(&schema, &values);
        assert!(key.is_partial());
        assert_eq!(key.as_bytes(), &[7]);
    }
}
