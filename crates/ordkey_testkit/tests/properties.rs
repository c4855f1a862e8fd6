//! Property tests for key encoding, decoding and successors.

use ordkey_codec::{Arena, OwnedCell};
use ordkey_core::{successor_bytes, EncodedKey, EncodedKeyBuilder};
use ordkey_testkit::prelude::*;
use proptest::prelude::*;

fn decoded_values(key: &EncodedKey<'_>) -> Vec<OwnedCell> {
    key.column_values().iter().map(|c| c.to_owned_cell()).collect()
}

proptest! {
    #[test]
    fn byte_order_matches_tuple_order((schema, left, right) in schema_and_tuple_pair_strategy()) {
        let left_key = build_key(&schema, &left);
        let right_key = build_key(&schema, &right);
        prop_assert_eq!(left_key.as_bytes().cmp(right_key.as_bytes()), left.cmp(&right));
    }

    #[test]
    fn decode_inverts_encode((schema, tuple) in schema_and_tuple_strategy()) {
        let key = build_key(&schema, &tuple);
        let arena = Arena::new();
        let decoded = EncodedKey::decode_from(&schema, &arena, key.as_bytes()).unwrap();
        prop_assert_eq!(decoded_values(&decoded), tuple.clone());
        prop_assert_eq!(decoded.as_bytes(), key.as_bytes());
    }

    #[test]
    fn successor_is_strictly_greater((schema, tuple) in schema_and_tuple_strategy()) {
        let key = build_key(&schema, &tuple);
        match key.successor(&schema) {
            Ok(next) => {
                prop_assert!(next > key);
                prop_assert!(next.len() <= key.len().max(1));
                prop_assert_eq!(Some(next.as_bytes().to_vec()), successor_bytes(key.as_bytes()));
                prop_assert_eq!(next.column_values(), key.column_values());
            }
            Err(err) => {
                prop_assert!(err.is_no_successor());
                prop_assert!(!key.is_empty());
                prop_assert!(key.as_bytes().iter().all(|&b| b == 0xff));
            }
        }
    }

    #[test]
    fn nothing_short_fits_between_key_and_successor(
        (schema, left, right) in schema_and_tuple_pair_strategy()
    ) {
        let key = build_key(&schema, &left);
        let other = build_key(&schema, &right);
        if let Ok(next) = key.successor(&schema) {
            if other > key && other.len() <= key.len() {
                prop_assert!(other >= next);
            }
        }
    }

    #[test]
    fn reset_replay_is_byte_identical((schema, tuple) in schema_and_tuple_strategy()) {
        let mut builder = EncodedKeyBuilder::new(&schema);
        for value in &tuple {
            builder.add_column_key(value.as_cell());
        }
        let first = builder.build_encoded_key().unwrap();

        builder.add_column_key(tuple[0].as_cell());
        builder.reset();
        for value in &tuple {
            builder.add_column_key(value.as_cell());
        }
        let second = builder.build_encoded_key().unwrap();
        prop_assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn prefix_keys_render_wildcards(
        (schema, tuple) in schema_and_tuple_strategy(),
        cut in 1usize..=4,
    ) {
        let total = schema.num_key_columns();
        let present = cut.min(total);
        let key = build_key(&schema, &tuple[..present]);
        prop_assert_eq!(key.is_partial(), present < total);

        let rendered = key.stringify(&schema);
        if total > 1 {
            let tail = format!("{})", ",*".repeat(total - present));
            prop_assert!(rendered.starts_with('('));
            prop_assert!(rendered.ends_with(&tail), "{} should end with {}", rendered, tail);
        }
    }

    #[test]
    fn prefix_sorts_before_its_extensions((schema, tuple) in schema_and_tuple_strategy()) {
        prop_assume!(schema.num_key_columns() > 1);
        let full = build_key(&schema, &tuple);
        let prefix = build_key(&schema, &tuple[..1]);
        // Trailing columns may encode to nothing (an empty last string).
        prop_assert!(prefix <= full);
        prop_assert!(full.as_bytes().starts_with(prefix.as_bytes()));
    }
}
