//! Conversion between plain JSON and Firestore's typed value encoding.
//!
//! Firestore documents carry every value wrapped in a type tag:
//! `{"stringValue": "x"}`, `{"integerValue": "42"}`, `{"arrayValue": {"values": [...]}}`
//! and so on. Integers travel as strings.

use serde_json::{json, Map, Number, Value};

/// Wraps a JSON value in Firestore's value encoding.
pub fn to_firestore_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else if let Some(u) = n.as_u64() {
                json!({ "integerValue": u.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            if items.is_empty() {
                json!({ "arrayValue": {} })
            } else {
                let values: Vec<Value> = items.iter().map(to_firestore_value).collect();
                json!({ "arrayValue": { "values": values } })
            }
        }
        Value::Object(map) => json!({ "mapValue": { "fields": to_fields(map) } }),
    }
}

/// Encodes every entry of a JSON object as a Firestore field.
pub fn to_fields(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| (key.clone(), to_firestore_value(value)))
        .collect()
}

/// Unwraps a Firestore-encoded value back into plain JSON.
pub fn from_firestore_value(value: &Value) -> Result<Value, String> {
    let tagged = value
        .as_object()
        .ok_or_else(|| format!("expected a typed value, got {}", value))?;

    let (tag, inner) = tagged
        .iter()
        .next()
        .ok_or_else(|| "empty typed value".to_string())?;

    match tag.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| format!("booleanValue is not a bool: {}", inner)),
        "integerValue" => parse_integer(inner),
        "doubleValue" => inner
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| format!("doubleValue is not a number: {}", inner)),
        "stringValue" | "timestampValue" | "referenceValue" => inner
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| format!("{} is not a string: {}", tag, inner)),
        "arrayValue" => {
            let values: &[Value] = match inner.get("values") {
                Some(Value::Array(values)) => values.as_slice(),
                Some(other) => return Err(format!("arrayValue.values is not a list: {}", other)),
                None => &[],
            };
            values
                .iter()
                .map(from_firestore_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        "mapValue" => match inner.get("fields") {
            Some(Value::Object(fields)) => from_fields(fields),
            Some(other) => Err(format!("mapValue.fields is not an object: {}", other)),
            None => Ok(Value::Object(Map::new())),
        },
        other => Err(format!("unsupported Firestore value type {}", other)),
    }
}

/// Decodes a document's `fields` object into a plain JSON object.
pub fn from_fields(fields: &Map<String, Value>) -> Result<Value, String> {
    let mut out = Map::with_capacity(fields.len());
    for (key, value) in fields {
        let decoded = from_firestore_value(value).map_err(|e| format!("{}: {}", key, e))?;
        out.insert(key.clone(), decoded);
    }
    Ok(Value::Object(out))
}

fn parse_integer(inner: &Value) -> Result<Value, String> {
    match inner {
        Value::String(s) => s
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| format!("integerValue {:?}: {}", s, e)),
        // the emulator sometimes sends integers unquoted
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(Value::Number(n.clone())),
        other => Err(format!("integerValue is not an integer: {}", other)),
    }
}
