//! Value classification for statement building.
//!
//! Given a runtime value and its column's mapping policy, decides whether the
//! value is inlined as a SQL literal or bound as a driver parameter.

use crate::error::{SqlError, SqlResult};
use crate::schema::FieldInfo;
use crate::value::Value;

/// Outcome of classifying one value against its column policy.
#[derive(Debug, PartialEq)]
pub enum Rendered {
    /// SQL text inlined directly into the statement.
    Literal(&'static str),
    /// Value bound out-of-band as a parameter.
    Param(Value),
}

/// Classify a value for INSERT/UPDATE emission.
///
/// A zero value renders as the literal `null` when the column allows NULL,
/// and as the column's empty literal otherwise. A zero optional on a column
/// that forbids NULL has no meaningful scalar substitute and is an error.
/// Non-zero values are always bound as parameters.
pub fn classify(value: Value, field: &FieldInfo) -> SqlResult<Rendered> {
    if value.is_zero() {
        if field.allows_null() {
            return Ok(Rendered::Literal("null"));
        }
        if field.is_pointer {
            return Err(SqlError::ForbiddenNull {
                column: field.column.to_string(),
            });
        }
        return Ok(Rendered::Literal(field.empty_literal));
    }
    Ok(Rendered::Param(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(is_pointer: bool, null: bool, not_null: bool) -> FieldInfo {
        FieldInfo {
            name: "f",
            column: "f",
            index: 0,
            omit_empty: false,
            primary_key: false,
            null,
            not_null,
            is_pointer,
            empty_literal: if is_pointer && !not_null { "null" } else { "''" },
        }
    }

    #[test]
    fn zero_on_nullable_column_is_null_literal() {
        let f = field(true, false, false);
        assert_eq!(classify(Value::Null, &f).unwrap(), Rendered::Literal("null"));

        let f = field(false, true, false);
        assert_eq!(
            classify(Value::Text(String::new()), &f).unwrap(),
            Rendered::Literal("null")
        );
    }

    #[test]
    fn zero_on_plain_column_falls_back_to_empty_literal() {
        let f = field(false, false, false);
        assert_eq!(
            classify(Value::Text(String::new()), &f).unwrap(),
            Rendered::Literal("''")
        );
    }

    #[test]
    fn zero_notnull_pointer_is_an_error() {
        let f = field(true, false, true);
        let err = classify(Value::Null, &f).unwrap_err();
        assert!(matches!(err, SqlError::ForbiddenNull { .. }));
    }

    #[test]
    fn notnull_pointer_never_renders_null() {
        // Even a zero value on a notnull pointer must not classify as the
        // literal null.
        let f = field(true, false, true);
        assert_ne!(classify(Value::Null, &f).ok(), Some(Rendered::Literal("null")));
    }

    #[test]
    fn non_zero_values_bind_as_parameters() {
        let f = field(false, false, false);
        assert_eq!(
            classify(Value::Int(7), &f).unwrap(),
            Rendered::Param(Value::Int(7))
        );
    }
}
