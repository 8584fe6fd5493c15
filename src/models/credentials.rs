use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::user::normalize_email;

/// Body of the register and login endpoints.
///
/// Fields are untyped on the wire: each is coerced into a string so that
/// `{"password": 123456}` behaves like `{"password": "123456"}`. Falsy values
/// (`null`, `false`, `0`, `""`) become empty. Arrays are joined with commas
/// and objects become `[object Object]`, as the browser client would see them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialsPayload {
    #[serde(default, deserialize_with = "coerce_string")]
    pub email: String,
    #[serde(default, deserialize_with = "coerce_string")]
    pub password: String,
}

impl CredentialsPayload {
    /// Parses a raw request body. Anything that is not a JSON object is
    /// treated as an empty payload and fails validation downstream.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(object @ Value::Object(_)) => serde_json::from_value(object).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Email trimmed and lowercased, password untouched.
    pub fn normalized(self) -> Self {
        Self {
            email: normalize_email(&self.email),
            password: self.password,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

fn coerce_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if is_falsy(&value) {
        return Ok(String::new());
    }
    Ok(stringify(&value))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) | Value::Bool(true) => false,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => stringify(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Integral floats print without a fractional part (`1e3` is `1000`).
fn format_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => (f as i128).to_string(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
