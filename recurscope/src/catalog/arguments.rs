//! Argument-string parsing.
//!
//! Arguments are written the way they would appear between the parentheses
//! of a call: `5`, `2, 10`, `[1, 2, 3], 7`. The string is wrapped in brackets
//! and read as a JSON array.

use serde_json::Value as Json;

use crate::domain::{ArgumentError, Value};

/// Parse a comma-separated argument list
///
/// # Errors
/// [`ArgumentError::Syntax`] for text that is not a JSON list body,
/// [`ArgumentError::Unsupported`] for objects.
pub fn parse_arguments(input: &str) -> Result<Vec<Value>, ArgumentError> {
    let items: Vec<Json> = serde_json::from_str(&format!("[{input}]"))?;
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| from_json(item).ok_or(ArgumentError::Unsupported { index }))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn from_json(json: Json) -> Option<Value> {
    Some(match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64()?),
        },
        Json::String(s) => Value::Text(s),
        Json::Array(items) => Value::List(items.into_iter().map(from_json).collect::<Option<_>>()?),
        Json::Object(_) => return None,
    })
}
