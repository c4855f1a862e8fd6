//! Decode command implementation.

use super::{decode_key, KeyOptions};
use ordkey_codec::to_hex;
use serde::Serialize;

/// Decoded key output.
#[derive(Debug, Serialize)]
pub struct DecodeResult {
    /// Encoded key as hex.
    pub hex: String,
    /// Stringified tuple.
    pub key: String,
    /// Key columns in order.
    pub columns: Vec<ColumnValue>,
    /// Arena bytes used while decoding.
    pub arena_bytes: usize,
}

/// A single decoded key column.
#[derive(Debug, Serialize)]
pub struct ColumnValue {
    /// Column name.
    pub name: String,
    /// Column type name.
    pub data_type: String,
    /// Stringified value.
    pub value: String,
}

/// Runs the decode command.
pub fn run(options: &KeyOptions, hex: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let schema = options.schema()?;
    let arena = options.arena();
    let key = decode_key(&schema, &arena, hex)?;

    let columns = key
        .column_values()
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let column = schema.column(idx);
            ColumnValue {
                name: column.name().to_string(),
                data_type: column.data_type().to_string(),
                value: column.stringify(cell),
            }
        })
        .collect();

    let result = DecodeResult {
        hex: to_hex(key.as_bytes()),
        key: key.stringify(&schema),
        columns,
        arena_bytes: arena.allocated_bytes(),
    };

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

fn print_text_output(result: &DecodeResult) {
    println!("Key: {}", result.key);
    println!();
    println!("Columns:");
    for column in &result.columns {
        println!("  {} ({}) = {}", column.name, column.data_type, column.value);
    }
}
