//! Loosely-typed input values and the casting rules applied before storage.
//!
//! Request bodies are accepted as raw JSON per field; the schema type of the
//! stored document decides how each raw value is coerced. Values that cannot
//! be coerced produce a cast failure, reported as a validation error by the
//! document being built.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A field exactly as it arrived in the request body (`None` when absent).
pub type RawField = Option<Value>;

/// A numeric document field.
///
/// Integral values serialize as JSON integers (`2023`, not `2023.0`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Numeric(f64);

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Numeric {
    /// Returns `None` for NaN and infinities.
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    fn as_exact_integer(self) -> Option<i64> {
        (self.0.fract() == 0.0 && self.0.abs() <= MAX_SAFE_INTEGER).then_some(self.0 as i64)
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Self(value as f64)
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_exact_integer() {
            Some(i) => serializer.serialize_i64(i),
            None => serializer.serialize_f64(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Numeric::new(raw).ok_or_else(|| serde::de::Error::custom("non-finite number"))
    }
}

/// Cast a raw value to text.
///
/// Strings pass through, numbers and booleans use their textual form,
/// `null` means absent. Arrays and objects fail.
pub fn cast_text(path: &str, raw: &RawField) -> Result<Option<String>, String> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(number_text(n))),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(cast_failure("string", path, other)),
    }
}

/// Cast a raw value to a number.
///
/// Numbers pass through, numeric strings are parsed (an empty string means
/// absent, a whitespace-only one is `0`), booleans become `1`/`0`, `null`
/// means absent. Non-finite results and everything else fail.
pub fn cast_number(path: &str, raw: &RawField) -> Result<Option<Numeric>, String> {
    let value = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(v) => v,
    };

    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) if s.is_empty() => return Ok(None),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .and_then(Numeric::new)
        .map(Some)
        .ok_or_else(|| cast_failure("Number", path, value))
}

/// Integral floats print without a fraction (`2.0` becomes `"2"`).
fn number_text(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(i) = n.as_f64().and_then(Numeric::new).and_then(Numeric::as_exact_integer) {
            return i.to_string();
        }
    }
    n.to_string()
}

fn cast_failure(target: &str, path: &str, value: &Value) -> String {
    let shown = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    format!(
        "Cast to {target} failed for value \"{shown}\" (type {}) at path \"{path}\"",
        json_kind(value)
    )
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}
