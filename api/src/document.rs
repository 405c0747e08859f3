//! Failure-tolerant access into loosely typed JSON documents.
//!
//! ESPN's summary feed varies from sport to sport and game to game. Every
//! accessor here answers with an empty/zero value instead of an error when a
//! key is missing or holds the wrong kind of value.

use serde_json::{Number, Value};

/// Walk `path` through nested objects. `None` as soon as a key is missing or
/// an intermediate value is not an object.
pub fn get<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(doc, |node, key| node.as_object()?.get(*key))
}

/// String leaf at `path`, or `""`.
pub fn get_string(doc: &Value, path: &[&str]) -> String {
    get(doc, path)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

/// String or numeric leaf at `path` rendered as text, or `""`.
pub fn get_text(doc: &Value, path: &[&str]) -> String {
    match get(doc, path) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number_text(n),
        _ => String::new(),
    }
}

pub fn get_number(doc: &Value, path: &[&str]) -> Option<f64> {
    match get(doc, path)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Boolean leaf at `path`; anything else is `false`.
pub fn get_bool(doc: &Value, path: &[&str]) -> bool {
    get(doc, path).and_then(Value::as_bool).unwrap_or(false)
}

/// Array at `path`, or an empty slice.
pub fn get_array<'a>(doc: &'a Value, path: &[&str]) -> &'a [Value] {
    get(doc, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// First element of the array at `path`.
pub fn first<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    get_array(doc, path).first()
}

/// Optional top-level section. Present only when the key exists and is not null.
pub fn section<'a>(doc: &'a Value, key: &str) -> Option<&'a Value> {
    doc.get(key).filter(|v| !v.is_null())
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        Some(f) => f.to_string(),
        None => String::new(),
    }
}
