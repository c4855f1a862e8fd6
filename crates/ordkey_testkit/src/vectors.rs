//! Cross-language key encoding vectors.
//!
//! Other bindings of the key format check themselves against the same
//! vectors, so the expected bytes here must never change.

use serde::{Deserialize, Serialize};

/// A key encoding test vector that can be shared across languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Key columns as `name:type`, comma separated.
    pub schema: String,
    /// One literal per key column (binary literals are `0x`-prefixed hex).
    pub values: Vec<String>,
    /// Expected encoded key (hex).
    pub expected_hex: String,
    /// Expected successor (hex), or `None` when there is no successor.
    pub successor_hex: Option<String>,
}

impl KeyVector {
    fn new(
        id: &str,
        description: &str,
        schema: &str,
        values: &[&str],
        expected_hex: &str,
        successor_hex: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            schema: schema.into(),
            values: values.iter().map(|v| (*v).to_string()).collect(),
            expected_hex: expected_hex.into(),
            successor_hex: successor_hex.map(Into::into),
        }
    }
}

/// Key encoding vectors.
pub fn key_vectors() -> Vec<KeyVector> {
    vec![
        KeyVector::new(
            "uint32_single",
            "single uint32 key column is big-endian",
            "id:uint32",
            &["5"],
            "00000005",
            Some("00000006"),
        ),
        KeyVector::new(
            "uint8_pair_all_max",
            "two maximal uint8 columns have no successor",
            "a:uint8,b:uint8",
            &["255", "255"],
            "ffff",
            None,
        ),
        KeyVector::new(
            "int32_minus_one",
            "signed integers flip the sign bit; successor truncates trailing 0xff",
            "n:int32",
            &["-1"],
            "7fffffff",
            Some("80"),
        ),
        KeyVector::new(
            "int8_min",
            "smallest int8 encodes as 0x00",
            "n:int8",
            &["-128"],
            "00",
            Some("01"),
        ),
        KeyVector::new(
            "string_then_int64",
            "inner string column is terminated by 0x00 0x00",
            "name:string,id:int64",
            &["ab", "1"],
            "616200008000000000000001",
            Some("616200008000000000000002"),
        ),
        KeyVector::new(
            "binary_last_raw",
            "last binary column is written verbatim",
            "payload:binary",
            &["0x00ff"],
            "00ff",
            Some("01"),
        ),
        KeyVector::new(
            "binary_inner_escaped",
            "inner binary column escapes 0x00 as 0x00 0x01",
            "payload:binary,flag:bool",
            &["0x0001", "false"],
            "000101000000",
            Some("000101000001"),
        ),
        KeyVector::new(
            "bool_then_empty_string",
            "empty last string column adds no bytes",
            "flag:bool,name:string",
            &["true", ""],
            "01",
            Some("02"),
        ),
        KeyVector::new(
            "empty_string_single",
            "a lone empty string encodes to nothing and is followed by 0x00",
            "s:string",
            &[""],
            "",
            Some("00"),
        ),
    ]
}

/// Serializes the vectors as pretty-printed JSON.
pub fn key_vectors_json() -> String {
    serde_json::to_string_pretty(&key_vectors()).expect("vectors serialize")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn vector_ids_are_unique() {
        let vectors = key_vectors();
        let ids: HashSet<_> = vectors.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids.len(), vectors.len());
    }

    #[test]
    fn vectors_survive_json() {
        let parsed: Vec<KeyVector> = serde_json::from_str(&key_vectors_json()).unwrap();
        assert_eq!(parsed, key_vectors());
    }
}
