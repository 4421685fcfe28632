use serde::{Deserialize, Serialize};
use std::fmt;

/// Dynamic value carried from an event into a destination column.
///
/// Covers everything a string header or a JSON body field can produce;
/// nested arrays and objects are carried through verbatim as `Json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Boolean(bool),
    Json(serde_json::Value),
    Null,
}

impl Value {
    /// Maps a deserialized JSON value onto the closest `Value` variant.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            nested => Value::Json(nested),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::Int(v) => Some(v.to_string()),
            Value::Uint(v) => Some(v.to_string()),
            Value::Float(v) => Some(v.to_string()),
            Value::String(v) => Some(v.clone()),
            Value::Boolean(v) => Some(v.to_string()),
            Value::Json(v) => v.as_str().map(|s| s.to_string()),
            Value::Null => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Uint(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Json(v) => {
                let json_str = v.to_string().replace('\'', "''");
                write!(f, "'{json_str}'")
            }
            Value::Null => write!(f, "NULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_maps_scalars() {
        assert_eq!(Value::from_json(json!(null)), Value::Null);
        assert_eq!(Value::from_json(json!(true)), Value::Boolean(true));
        assert_eq!(Value::from_json(json!(42)), Value::Int(42));
        assert_eq!(Value::from_json(json!(-7)), Value::Int(-7));
        assert_eq!(Value::from_json(json!(u64::MAX)), Value::Uint(u64::MAX));
        assert_eq!(Value::from_json(json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from_json(json!("a")), Value::String("a".into()));
    }

    #[test]
    fn from_json_keeps_nested_values_as_json() {
        let nested = json!({"k": [1, 2]});
        assert_eq!(Value::from_json(nested.clone()), Value::Json(nested));
    }

    #[test]
    fn display_quotes_strings_for_inline_sql() {
        assert_eq!(Value::String("o'brien".into()).to_string(), "'o''brien'");
        assert_eq!(Value::Null.to_string(), "NULL");
    }

    #[test]
    fn as_string_stringifies_scalars() {
        assert_eq!(Value::Int(5).as_string(), Some("5".to_string()));
        assert_eq!(Value::Boolean(true).as_string(), Some("true".to_string()));
        assert_eq!(Value::String("x".into()).as_string(), Some("x".to_string()));
        assert_eq!(Value::Null.as_string(), None);
        assert!(Value::Null.is_null());
    }
}
