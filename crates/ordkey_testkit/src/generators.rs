//! Property-based test generators using proptest.
//!
//! Values are drawn from small alphabets that are dense in `0x00` and
//! `0xff`, the bytes where escaping and successor carries happen.

use ordkey_codec::{DataType, OwnedCell};
use ordkey_core::{ColumnSchema, Schema};
use proptest::prelude::*;

/// Strategy for key column types.
pub fn data_type_strategy() -> impl Strategy<Value = DataType> {
    prop::sample::select(DataType::ALL.to_vec())
}

fn edge_byte() -> impl Strategy<Value = u8> {
    prop_oneof![Just(0x00u8), Just(0x01), Just(0xfe), Just(0xff), any::<u8>()]
}

/// Strategy for a value of `data_type`.
pub fn cell_strategy(data_type: DataType) -> BoxedStrategy<OwnedCell> {
    match data_type {
        DataType::Bool => any::<bool>().prop_map(OwnedCell::Bool).boxed(),
        DataType::Int8 => any::<i8>().prop_map(OwnedCell::Int8).boxed(),
        DataType::Int16 => any::<i16>().prop_map(OwnedCell::Int16).boxed(),
        DataType::Int32 => any::<i32>().prop_map(OwnedCell::Int32).boxed(),
        DataType::Int64 => any::<i64>().prop_map(OwnedCell::Int64).boxed(),
        DataType::UInt8 => edge_byte().prop_map(OwnedCell::UInt8).boxed(),
        DataType::UInt16 => any::<u16>().prop_map(OwnedCell::UInt16).boxed(),
        DataType::UInt32 => any::<u32>().prop_map(OwnedCell::UInt32).boxed(),
        DataType::UInt64 => prop_oneof![Just(u64::MAX), any::<u64>()]
            .prop_map(OwnedCell::UInt64)
            .boxed(),
        DataType::String => prop::collection::vec(
            prop::sample::select(vec!['\0', '\u{1}', 'a', 'b', '\u{7f}', 'é']),
            0..6,
        )
        .prop_map(|chars| OwnedCell::String(chars.into_iter().collect()))
        .boxed(),
        DataType::Binary => prop::collection::vec(edge_byte(), 0..6)
            .prop_map(OwnedCell::Binary)
            .boxed(),
    }
}

/// Strategy for schemas with one to four key columns and up to two
/// nullable value columns.
pub fn schema_strategy() -> impl Strategy<Value = Schema> {
    (
        prop::collection::vec(data_type_strategy(), 1..=4),
        prop::collection::vec(data_type_strategy(), 0..=2),
    )
        .prop_map(|(key_types, value_types)| {
            let num_key_columns = key_types.len();
            let keys = key_types
                .into_iter()
                .enumerate()
                .map(|(i, ty)| ColumnSchema::new(format!("k{i}"), ty));
            let values = value_types
                .into_iter()
                .enumerate()
                .map(|(i, ty)| ColumnSchema::new(format!("v{i}"), ty).nullable());
            Schema::new(keys.chain(values).collect(), num_key_columns)
                .expect("generated schema is valid")
        })
}

/// Strategy for a full key tuple of `schema`.
pub fn key_tuple_strategy(schema: &Schema) -> BoxedStrategy<Vec<OwnedCell>> {
    schema.columns()[..schema.num_key_columns()]
        .iter()
        .map(|column| cell_strategy(column.data_type()))
        .collect::<Vec<_>>()
        .boxed()
}

/// Strategy for a schema together with one key tuple.
pub fn schema_and_tuple_strategy() -> impl Strategy<Value = (Schema, Vec<OwnedCell>)> {
    schema_strategy().prop_flat_map(|schema| {
        let tuple = key_tuple_strategy(&schema);
        (Just(schema), tuple)
    })
}

/// Strategy for a schema together with two key tuples.
pub fn schema_and_tuple_pair_strategy(
) -> impl Strategy<Value = (Schema, Vec<OwnedCell>, Vec<OwnedCell>)> {
    schema_strategy().prop_flat_map(|schema| {
        let left = key_tuple_strategy(&schema);
        let right = key_tuple_strategy(&schema);
        (Just(schema), left, right)
    })
}
