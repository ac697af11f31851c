//! Typed variable values
//!
//! A bound value is never assumed to be text already; its textual form is
//! produced by the formatter configured on the replacer.

use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// A value bound to a variable name.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// Plain text. May itself contain placeholders.
    Text(String),
    /// A calendar date.
    Date(NaiveDate),
    /// A UTC timestamp.
    DateTime(DateTime<Utc>),
}

impl Value {
    /// Returns true for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns a short name for the kind of value, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
        }
    }

    /// Converts a JSON scalar into a value.
    ///
    /// Returns `None` for arrays and objects. Numbers that are neither an
    /// `i64` nor a float (large unsigned integers) are kept exactly as text.
    #[must_use]
    pub fn from_json_scalar(json: &serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Null => Some(Self::Null),
            serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
            serde_json::Value::Number(n) => Some(if let Some(i) = n.as_i64() {
                Self::Integer(i)
            } else if n.is_f64() {
                n.as_f64().map_or_else(|| Self::Text(n.to_string()), Self::Float)
            } else {
                Self::Text(n.to_string())
            }),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::DateTime(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_scalars() {
        assert_eq!(Value::from("Al").to_string(), "Al");
        assert_eq!(Value::from(12).to_string(), "12");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_display_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 26).unwrap();
        assert_eq!(Value::from(date).to_string(), "2024-01-26");

        let timestamp = Utc.with_ymd_and_hms(2024, 1, 26, 12, 0, 0).unwrap();
        assert_eq!(Value::from(timestamp).to_string(), "2024-01-26T12:00:00Z");
    }

    #[test]
    fn test_option_maps_none_to_null() {
        let missing: Option<&str> = None;
        assert_eq!(Value::from(missing), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
    }

    #[test]
    fn test_from_json_scalar() {
        assert_eq!(
            Value::from_json_scalar(&serde_json::json!(42)),
            Some(Value::Integer(42))
        );
        assert_eq!(
            Value::from_json_scalar(&serde_json::json!(2.5)),
            Some(Value::Float(2.5))
        );
        assert_eq!(
            Value::from_json_scalar(&serde_json::json!("text")),
            Some(Value::Text("text".to_string()))
        );
        assert_eq!(
            Value::from_json_scalar(&serde_json::json!(null)),
            Some(Value::Null)
        );
        assert_eq!(Value::from_json_scalar(&serde_json::json!([1, 2])), None);
        assert_eq!(Value::from_json_scalar(&serde_json::json!({"a": 1})), None);
    }

    #[test]
    fn test_large_unsigned_kept_exact() {
        let json: serde_json::Value = serde_json::from_str("18446744073709551615").unwrap();
        let value = Value::from_json_scalar(&json).unwrap();
        assert_eq!(value, Value::Text("18446744073709551615".to_string()));
        assert_eq!(value.to_string(), "18446744073709551615");

        let json: serde_json::Value = serde_json::from_str("-9223372036854775808").unwrap();
        assert_eq!(Value::from_json_scalar(&json), Some(Value::Integer(i64::MIN)));
    }

    #[test]
    fn test_kind() {
        assert_eq!(Value::from(3).kind(), "integer");
        assert_eq!(Value::from("x").kind(), "text");
    }
}
