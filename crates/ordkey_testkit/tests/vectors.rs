//! Checks the shared key vectors against the encoder.

use ordkey_codec::{from_hex, to_hex, Arena, OwnedCell};
use ordkey_core::{EncodedKey, Schema};
use ordkey_testkit::prelude::*;

fn vector_values(schema: &Schema, vector: &KeyVector) -> Vec<OwnedCell> {
    assert_eq!(vector.values.len(), schema.num_key_columns(), "{}", vector.id);
    vector
        .values
        .iter()
        .enumerate()
        .map(|(idx, text)| OwnedCell::parse(schema.column(idx).data_type(), text).unwrap())
        .collect()
}

#[test]
fn encoded_bytes_match_vectors() {
    for vector in key_vectors() {
        let schema = Schema::parse(&vector.schema, None).unwrap();
        let values = vector_values(&schema, &vector);
        let key = build_key(&schema, &values);
        assert_eq!(to_hex(key.as_bytes()), vector.expected_hex, "{}", vector.id);
    }
}

#[test]
fn successors_match_vectors() {
    for vector in key_vectors() {
        let schema = Schema::parse(&vector.schema, None).unwrap();
        let values = vector_values(&schema, &vector);
        let key = build_key(&schema, &values);
        match (key.successor(&schema), &vector.successor_hex) {
            (Ok(next), Some(expected)) => {
                assert_eq!(&to_hex(next.as_bytes()), expected, "{}", vector.id)
            }
            (Err(err), None) => assert!(err.is_no_successor(), "{}", vector.id),
            (got, expected) => panic!("{}: got {got:?}, expected {expected:?}", vector.id),
        }
    }
}

#[test]
fn vectors_decode_to_their_values() {
    for vector in key_vectors() {
        let schema = Schema::parse(&vector.schema, None).unwrap();
        let expected = vector_values(&schema, &vector);
        let encoded = from_hex(&vector.expected_hex).unwrap();

        let arena = Arena::new();
        let key = EncodedKey::decode_from(&schema, &arena, &encoded).unwrap();
        let decoded: Vec<OwnedCell> = key
            .column_values()
            .iter()
            .map(|cell| cell.to_owned_cell())
            .collect();
        assert_eq!(decoded, expected, "{}", vector.id);
    }
}
