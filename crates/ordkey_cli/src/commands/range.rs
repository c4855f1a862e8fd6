//! Range command implementation.

use super::{build_key, parse_values, KeyOptions};
use ordkey_core::{EncodedKey, Schema};
use serde::Serialize;

/// Rendering of an exclusive lower bound that no key sorts after.
pub const EMPTY_RANGE: &str = "empty key range";

/// Range description output.
#[derive(Debug, Serialize)]
pub struct RangeResult {
    /// Human-readable range predicate.
    pub description: String,
}

/// Runs the range command.
///
/// Bounds are value tuples, possibly covering only leading key columns.
/// With `exclusive_lower` the lower bound is replaced by its successor.
pub fn run(
    options: &KeyOptions,
    lower: &[String],
    upper: &[String],
    exclusive_lower: bool,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = options.schema()?;
    let result = RangeResult {
        description: describe(&schema, lower, upper, exclusive_lower)?,
    };

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            println!("{}", result.description);
        }
    }

    Ok(())
}

fn describe(
    schema: &Schema,
    lower: &[String],
    upper: &[String],
    exclusive_lower: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let lower_cells = parse_values(schema, lower)?;
    let upper_cells = parse_values(schema, upper)?;

    let mut lower_key = build_key(schema, &lower_cells);
    if exclusive_lower {
        if let Some(key) = lower_key.take() {
            match key.successor(schema) {
                Ok(next) => lower_key = Some(next),
                Err(err) if err.is_no_successor() => return Ok(EMPTY_RANGE.to_string()),
                Err(err) => return Err(err.into()),
            }
        }
    }
    let upper_key = build_key(schema, &upper_cells);

    Ok(EncodedKey::describe_range(
        lower_key.as_ref(),
        upper_key.as_ref(),
    ))
}
