//! Runtime value model for statement generation.
//!
//! [`Value`] is the exchange type between records, the statement builders and
//! the driver [`Executor`](crate::Executor): record fields are read into
//! `Value`s, the policy engine classifies them, and bound parameters are
//! handed to the driver as a `Value` slice.

use chrono::{DateTime, NaiveDateTime, Utc};

/// A runtime SQL value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Timestamp(DateTime<Utc>),
    Json(serde_json::Value),
    /// A set-valued argument; expands to a parenthesized group when
    /// substituted at a value placeholder. Never bound directly.
    List(Vec<Value>),
}

impl Value {
    /// Returns true if the value equals the zero value of its kind.
    ///
    /// Mirrors deep zero-equality: an absent optional (`Null`), `false`,
    /// numeric zero, empty text/bytes, the epoch timestamp, JSON null and an
    /// empty list are all zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Int(n) => *n == 0,
            Value::Float(f) => *f == 0.0,
            Value::Text(s) => s.is_empty(),
            Value::Bytes(b) => b.is_empty(),
            Value::Timestamp(t) => *t == DateTime::<Utc>::UNIX_EPOCH,
            Value::Json(j) => j.is_null(),
            Value::List(items) => items.is_empty(),
        }
    }

    /// Returns true if the value can be bound directly as a single driver
    /// parameter without further transformation.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::List(_))
    }

    /// Serialize any [`serde::Serialize`] type into a JSON column value.
    pub fn json<T: serde::Serialize>(value: &T) -> serde_json::Result<Self> {
        Ok(Value::Json(serde_json::to_value(value)?))
    }

    /// Kind name for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Timestamp(_) => "timestamp",
            Value::Json(_) => "json",
            Value::List(_) => "list",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(v as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, isize, u16, u32);

impl From<u64> for Value {
    /// Lossy above `i64::MAX`; keys and counters fit in practice.
    fn from(v: u64) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    /// Lossy above `i64::MAX`; keys and counters fit in practice.
    fn from(v: usize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v.and_utc())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_detection() {
        assert!(Value::Null.is_zero());
        assert!(Value::Int(0).is_zero());
        assert!(Value::Text(String::new()).is_zero());
        assert!(Value::Bool(false).is_zero());
        assert!(Value::Float(0.0).is_zero());
        assert!(Value::Timestamp(DateTime::UNIX_EPOCH).is_zero());

        assert!(!Value::Int(7).is_zero());
        assert!(!Value::Text("x".into()).is_zero());
        assert!(!Value::Bool(true).is_zero());
    }

    #[test]
    fn option_collapses_to_null() {
        let none: Option<i64> = None;
        assert_eq!(Value::from(none), Value::Null);
        assert_eq!(Value::from(Some(3i64)), Value::Int(3));
    }

    #[test]
    fn json_helper_serializes() {
        #[derive(serde::Serialize)]
        struct Meta {
            a: i32,
        }
        let v = Value::json(&Meta { a: 1 }).unwrap();
        assert_eq!(v.kind(), "json");
        assert!(!v.is_zero());
    }

    #[test]
    fn list_is_not_scalar() {
        assert!(!Value::from(vec![1i64, 2]).is_scalar());
        assert!(Value::Int(1).is_scalar());
        // Byte payloads stay scalar blobs, not lists.
        assert!(Value::from(vec![1u8, 2]).is_scalar());
    }
}
