//! Successor command implementation.

use super::{decode_key, KeyOptions};
use ordkey_codec::{debug_string, to_hex};
use serde::Serialize;

/// Successor output.
#[derive(Debug, Serialize)]
pub struct SuccessorResult {
    /// Input key as hex.
    pub key_hex: String,
    /// Successor as hex, absent when none exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub successor_hex: Option<String>,
    /// Successor in debug-string form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub successor_debug: Option<String>,
}

/// Runs the successor command.
///
/// A key without successor is reported, not treated as a failure.
pub fn run(options: &KeyOptions, hex: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let schema = options.schema()?;
    let arena = options.arena();
    let key = decode_key(&schema, &arena, hex)?;

    let successor = match key.successor(&schema) {
        Ok(next) => Some(next),
        Err(err) if err.is_no_successor() => None,
        Err(err) => return Err(err.into()),
    };

    let result = SuccessorResult {
        key_hex: to_hex(key.as_bytes()),
        successor_hex: successor.as_ref().map(|next| to_hex(next.as_bytes())),
        successor_debug: successor.as_ref().map(|next| debug_string(next.as_bytes())),
    };

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => match (&result.successor_hex, &result.successor_debug) {
            (Some(hex), Some(debug)) => println!("{hex} ({debug})"),
            _ => println!("no successor"),
        },
    }

    Ok(())
}
