//! Conversion of raw environment strings into typed values.
//!
//! Precedence, evaluated on the trimmed value:
//!
//! 1. Text wrapped in `{}` or `[]` is decoded as a JSON object or array,
//!    whatever the schema says.
//! 2. A known [`ResolvedKind`] selects a strict parser; failure aborts the
//!    read.
//! 3. Otherwise the value is sniffed: integer, then boolean, then the raw
//!    string.

use serde_json::{Map, Number, Value};

use crate::error::{EnvError, EnvResult};
use crate::schema::ResolvedKind;

/// Coerce `raw` according to `kind`.
///
/// `key` identifies the entry in error messages.
///
/// # Errors
///
/// Returns [`EnvError::StructuredDecode`] when a bracketed value is not valid
/// JSON and [`EnvError::TypeCoercion`] when a known kind cannot parse it.
///
/// # Examples
///
/// ```rust
/// use ortho_env::coerce::coerce;
/// use ortho_env::schema::ResolvedKind;
/// use serde_json::json;
///
/// assert_eq!(coerce("COUNT", "42", ResolvedKind::Unknown)?, json!(42));
/// assert_eq!(coerce("COUNT", "42", ResolvedKind::String)?, json!("42"));
/// assert_eq!(coerce("FOO", r#"{"x":1}"#, ResolvedKind::Bool)?, json!({"x": 1}));
/// assert!(coerce("FLAG", "maybe", ResolvedKind::Bool).is_err());
/// # Ok::<_, ortho_env::EnvError>(())
/// ```
pub fn coerce(key: &str, raw: &str, kind: ResolvedKind) -> EnvResult<Value> {
    let trimmed = raw.trim();
    if let Some(structured) = decode_structured(key, trimmed) {
        return structured;
    }
    if kind.is_known() {
        return coerce_strict(key, raw, trimmed, kind);
    }
    Ok(sniff(raw, trimmed))
}

fn decode_structured(key: &str, trimmed: &str) -> Option<EnvResult<Value>> {
    let decoded = if is_wrapped(trimmed, '{', '}') {
        serde_json::from_str::<Map<String, Value>>(trimmed).map(Value::Object)
    } else if is_wrapped(trimmed, '[', ']') {
        serde_json::from_str::<Vec<Value>>(trimmed).map(Value::Array)
    } else {
        return None;
    };
    Some(decoded.map_err(|source| EnvError::StructuredDecode {
        key: key.to_owned(),
        source,
    }))
}

fn is_wrapped(value: &str, open: char, close: char) -> bool {
    value.starts_with(open) && value.ends_with(close)
}

fn coerce_strict(key: &str, raw: &str, trimmed: &str, kind: ResolvedKind) -> EnvResult<Value> {
    let parsed = match kind {
        ResolvedKind::Bool => parse_bool(trimmed).map(Value::Bool),
        ResolvedKind::SmallInt => trimmed.parse::<isize>().ok().map(Value::from),
        ResolvedKind::Int64 => trimmed.parse::<i64>().ok().map(Value::from),
        ResolvedKind::Float => trimmed
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        ResolvedKind::String | ResolvedKind::Unknown => Some(Value::String(raw.to_owned())),
    };
    parsed.ok_or_else(|| EnvError::TypeCoercion {
        key: key.to_owned(),
        value: raw.to_owned(),
        kind,
    })
}

fn sniff(raw: &str, trimmed: &str) -> Value {
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::from(int);
    }
    parse_bool(trimmed).map_or_else(|| Value::String(raw.to_owned()), Value::Bool)
}

/// Parse the accepted spellings of a boolean.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false
/// counterparts `0`, `f`, `F`, `FALSE`, `false`, `False`.
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
