//! Encode command implementation.

use super::{build_key, parse_values, KeyOptions};
use ordkey_codec::{debug_string, to_hex};
use serde::Serialize;
use tracing::debug;

/// Encoded key output.
#[derive(Debug, Serialize)]
pub struct EncodeResult {
    /// Schema the key was built for.
    pub schema: String,
    /// Encoded key as hex.
    pub hex: String,
    /// Encoded key in debug-string form.
    pub debug: String,
    /// Stringified tuple.
    pub key: String,
    /// Encoded length in bytes.
    pub len: usize,
    /// Whether only a prefix of the key columns was given.
    pub partial: bool,
}

/// Runs the encode command.
pub fn run(
    options: &KeyOptions,
    values: &[String],
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = options.schema()?;
    let cells = parse_values(&schema, values)?;
    let key = build_key(&schema, &cells).ok_or("at least one value is required")?;
    debug!(columns = cells.len(), "built key tuple");

    let result = EncodeResult {
        schema: schema.to_string(),
        hex: to_hex(key.as_bytes()),
        debug: debug_string(key.as_bytes()),
        key: key.stringify(&schema),
        len: key.len(),
        partial: key.is_partial(),
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

fn print_text_output(result: &EncodeResult) {
    println!("Schema:  {}", result.schema);
    println!("Key:     {}", result.key);
    println!("Hex:     {}", result.hex);
    println!("Debug:   {}", result.debug);
    println!("Length:  {} bytes", result.len);
    if result.partial {
        println!("(prefix key)");
    }
}
