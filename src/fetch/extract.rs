//! Field extraction from JSON response bodies

use super::ParseError;
use serde_json::Value;

/// Expected string value of a status field (e.g. `result == "success"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGuard {
    /// Dotted path to the field
    pub path: String,
    /// Required value
    pub expected: String,
}

impl FieldGuard {
    pub fn new(path: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
        }
    }
}

/// Walk a dotted path (`rates.EGP`) through a JSON value
fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(root, |value, segment| match value {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// Parse a body and pull the numeric field at `path`
///
/// Accepts JSON numbers and numeric strings (`"3743.50"`).
pub fn extract_number(
    body: &str,
    path: &str,
    guard: Option<&FieldGuard>,
) -> Result<f64, ParseError> {
    let root: Value =
        serde_json::from_str(body).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    if let Some(guard) = guard {
        check_guard(&root, guard)?;
    }

    let field = lookup(&root, path).ok_or_else(|| ParseError::MissingField {
        path: path.to_string(),
    })?;

    let not_numeric = || ParseError::NotNumeric {
        path: path.to_string(),
        found: field.to_string(),
    };

    match field {
        Value::Number(n) => n.as_f64().ok_or_else(not_numeric),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| not_numeric()),
        _ => Err(not_numeric()),
    }
}

fn check_guard(root: &Value, guard: &FieldGuard) -> Result<(), ParseError> {
    match lookup(root, &guard.path) {
        Some(Value::String(s)) if *s == guard.expected => Ok(()),
        Some(other) => Err(ParseError::GuardMismatch {
            path: guard.path.clone(),
            expected: guard.expected.clone(),
            found: other.to_string(),
        }),
        None => Err(ParseError::MissingField {
            path: guard.path.clone(),
        }),
    }
}
