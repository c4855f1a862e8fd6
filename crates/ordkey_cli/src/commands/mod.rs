//! CLI command implementations.

pub mod decode;
pub mod encode;
pub mod range;
pub mod successor;

use ordkey_codec::{from_hex, Arena, ArenaConfig, CodecError, OwnedCell};
use ordkey_core::{CoreError, EncodedKey, EncodedKeyBuilder, Schema};
use thiserror::Error;

/// Errors in command-line input.
#[derive(Error, Debug)]
pub enum InputError {
    /// No `--schema` was given.
    #[error("--schema is required for this command")]
    MissingSchema,

    /// The schema did not parse or validate.
    #[error("invalid schema: {0}")]
    Schema(#[from] CoreError),

    /// A value literal did not parse for its column.
    #[error("invalid value: {0}")]
    Literal(#[from] CodecError),

    /// More values than key columns.
    #[error("{given} values given but the schema has {key_columns} key columns")]
    TooManyValues {
        /// Number of values given.
        given: usize,
        /// Number of key columns.
        key_columns: usize,
    },

    /// A hex argument was malformed.
    #[error("invalid hex: {text:?}")]
    InvalidHex {
        /// The offending argument.
        text: String,
    },
}

/// Options shared by every key command.
#[derive(Debug, Clone, Default)]
pub struct KeyOptions {
    /// Schema text, `name:type[?],...`.
    pub schema: Option<String>,
    /// Number of leading key columns.
    pub key_columns: Option<usize>,
    /// Arena allocation cap in bytes.
    pub arena_limit: Option<usize>,
}

impl KeyOptions {
    /// Parses the schema argument.
    pub fn schema(&self) -> Result<Schema, InputError> {
        let spec = self.schema.as_deref().ok_or(InputError::MissingSchema)?;
        Ok(Schema::parse(spec, self.key_columns)?)
    }

    /// Creates the decode arena, honouring `--arena-limit`.
    pub fn arena(&self) -> Arena {
        let config = match self.arena_limit {
            Some(limit) => ArenaConfig::new().initial_capacity(0).allocation_limit(limit),
            None => ArenaConfig::default(),
        };
        Arena::with_config(&config)
    }
}

/// Parses one literal per leading key column of `schema`.
pub fn parse_values(schema: &Schema, values: &[String]) -> Result<Vec<OwnedCell>, InputError> {
    if values.len() > schema.num_key_columns() {
        return Err(InputError::TooManyValues {
            given: values.len(),
            key_columns: schema.num_key_columns(),
        });
    }
    let cells = values
        .iter()
        .enumerate()
        .map(|(idx, text)| OwnedCell::parse(schema.column(idx).data_type(), text))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(cells)
}

/// Builds a (possibly prefix) key from parsed values. Returns `None` for
/// an empty tuple.
pub fn build_key<'a>(schema: &Schema, cells: &'a [OwnedCell]) -> Option<EncodedKey<'a>> {
    let mut builder = EncodedKeyBuilder::new(schema);
    for cell in cells {
        builder.add_column_key(cell.as_cell());
    }
    builder.finish()
}

/// Decodes a hex argument into a key of `schema`.
pub fn decode_key<'a>(
    schema: &Schema,
    arena: &'a Arena,
    hex: &str,
) -> Result<EncodedKey<'a>, Box<dyn std::error::Error>> {
    let bytes = parse_hex(hex)?;
    Ok(EncodedKey::decode_from(schema, arena, &bytes)?)
}

/// Parses hex with an optional `0x` prefix.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, InputError> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    from_hex(digits).ok_or_else(|| InputError::InvalidHex {
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_arguments() {
        assert_eq!(parse_hex("0x00ff").unwrap(), vec![0x00, 0xff]);
        assert_eq!(parse_hex("7F").unwrap(), vec![0x7f]);
        assert_eq!(parse_hex("").unwrap(), Vec::<u8>::new());
        assert!(matches!(parse_hex("abc"), Err(InputError::InvalidHex { .. })));
        assert!(matches!(parse_hex("é0"), Err(InputError::InvalidHex { .. })));
    }

    #[test]
    fn values_follow_column_types() {
        let schema = Schema::parse("a:int32,b:binary", None).unwrap();
        let cells = parse_values(&schema, &["-1".into(), "0x00ff".into()]).unwrap();
        assert_eq!(cells, vec![OwnedCell::Int32(-1), OwnedCell::Binary(vec![0x00, 0xff])]);

        let too_many = parse_values(&schema, &["1".into(), "x".into(), "y".into()]);
        assert!(matches!(too_many, Err(InputError::TooManyValues { given: 3, .. })));
        assert!(matches!(
            parse_values(&schema, &["one".into()]),
            Err(InputError::Literal(_))
        ));
        assert!(build_key(&schema, &[]).is_none());
    }

    #[test]
    fn schema_is_required() {
        let options = KeyOptions::default();
        assert!(matches!(options.schema(), Err(InputError::MissingSchema)));

        let options = KeyOptions {
            schema: Some("a:int8,b:string,c:uint32?".into()),
            key_columns: Some(2),
            ..KeyOptions::default()
        };
        let schema = options.schema().unwrap();
        assert_eq!(schema.num_key_columns(), 2);
        assert_eq!(schema.num_columns(), 3);
    }

    #[test]
    fn arena_limit_is_enforced() {
        let options = KeyOptions {
            schema: Some("name:string".into()),
            arena_limit: Some(0),
            ..KeyOptions::default()
        };
        let schema = options.schema().unwrap();
        let arena = options.arena();
        assert!(decode_key(&schema, &arena, "6162").is_err());
    }
}
