//! Placeholder substitution for hand-written SQL templates.
//!
//! A template carries two sigils, configured on the [`Dialect`]: the key
//! sigil splices the next argument into the SQL text as an escaped
//! identifier, the value sigil binds the next argument as a driver parameter.
//! Doubling a sigil emits the character itself and consumes no argument.
//! List arguments expand into a parenthesized, comma-joined placeholder group
//! with one parameter per element.

use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::value::Value;

impl Dialect {
    /// Rewrite `template`, consuming `args` left-to-right per sigil.
    ///
    /// Returns the final SQL text and the reduced, renumbered parameter
    /// list. Arguments left over once the template is exhausted are appended
    /// verbatim to the parameter list, so callers can mix templated and
    /// trailing bind arguments. Running out of arguments mid-template is an
    /// error.
    pub fn substitute(&self, template: &str, args: Vec<Value>) -> SqlResult<(String, Vec<Value>)> {
        let supplied = args.len();
        let mut arg_iter = args.into_iter();
        let mut consumed = 0usize;

        let mut out = String::with_capacity(template.len());
        let mut params: Vec<Value> = Vec::new();

        // Scan code points, not bytes; sigils may sit next to multi-byte text.
        let mut chars = template.chars().peekable();

        while let Some(curr) = chars.next() {
            if curr != self.key_sigil && curr != self.value_sigil {
                out.push(curr);
                continue;
            }

            // A doubled sigil is an escaped literal occurrence.
            if chars.peek() == Some(&curr) {
                chars.next();
                out.push(curr);
                continue;
            }

            let Some(arg) = arg_iter.next() else {
                return Err(SqlError::MissingArgument {
                    expected: consumed + 1,
                    supplied,
                });
            };
            consumed += 1;

            if curr == self.key_sigil {
                match arg {
                    Value::Text(name) => out.push_str(&self.quote_ident(&name)),
                    other => {
                        return Err(SqlError::KeyPlaceholder {
                            ordinal: consumed,
                            found: other.kind(),
                        });
                    }
                }
                continue;
            }

            match arg {
                Value::List(items) => {
                    if items.is_empty() {
                        return Err(SqlError::EmptyList { ordinal: consumed });
                    }
                    out.push('(');
                    for (i, item) in items.into_iter().enumerate() {
                        if i > 0 {
                            out.push(',');
                        }
                        // A zero optional element has already collapsed to
                        // Null and binds as SQL NULL; everything else binds
                        // unchanged.
                        params.push(item);
                        self.push_placeholder(&mut out, params.len());
                    }
                    out.push(')');
                }
                scalar => {
                    params.push(scalar);
                    self.push_placeholder(&mut out, params.len());
                }
            }
        }

        // Trailing unconsumed arguments become ordinary bind parameters.
        params.extend(arg_iter);

        Ok((out, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::PlaceholderStyle;

    fn positional() -> Dialect {
        Dialect::new('@', '?', PlaceholderStyle::Positional)
    }

    fn numbered() -> Dialect {
        Dialect::new('@', '?', PlaceholderStyle::Numbered)
    }

    #[test]
    fn scalar_substitution_positional() {
        let (sql, params) = positional()
            .substitute("SELECT * FROM t WHERE id = ?", vec![5i64.into()])
            .unwrap();
        assert_eq!(sql, "SELECT * FROM t WHERE id = ?");
        assert_eq!(params, vec![Value::Int(5)]);
    }

    #[test]
    fn scalar_substitution_numbered() {
        let (sql, params) = numbered()
            .substitute("a = ? AND b = ?", vec![1i64.into(), 2i64.into()])
            .unwrap();
        assert_eq!(sql, "a = $1 AND b = $2");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn list_expands_to_group() {
        let (sql, params) = positional()
            .substitute(
                "SELECT * FROM t WHERE id = ?",
                vec![vec![1i64, 2, 3].into()],
            )
            .unwrap();
        assert_eq!(sql, "SELECT * FROM t WHERE id = (?,?,?)");
        assert_eq!(params, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn list_expansion_renumbers() {
        let (sql, params) = numbered()
            .substitute(
                "a = ? AND b IN ? AND c = ?",
                vec![9i64.into(), vec![1i64, 2].into(), 3i64.into()],
            )
            .unwrap();
        assert_eq!(sql, "a = $1 AND b IN ($2,$3) AND c = $4");
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn empty_list_is_an_error() {
        let err = positional()
            .substitute("id IN ?", vec![Value::List(vec![])])
            .unwrap_err();
        assert!(matches!(err, SqlError::EmptyList { ordinal: 1 }));
    }

    #[test]
    fn list_null_elements_bind_as_parameters() {
        let items: Vec<Option<i64>> = vec![Some(1), None];
        let (sql, params) = positional()
            .substitute("x IN ?", vec![items.into()])
            .unwrap();
        assert_eq!(sql, "x IN (?,?)");
        assert_eq!(params, vec![Value::Int(1), Value::Null]);
    }

    #[test]
    fn key_sigil_splices_escaped_identifier() {
        let (sql, params) = positional()
            .substitute("SELECT * FROM @ WHERE id = ?", vec!["orders".into(), 7i64.into()])
            .unwrap();
        assert_eq!(sql, "SELECT * FROM \"orders\" WHERE id = ?");
        assert_eq!(params, vec![Value::Int(7)]);
    }

    #[test]
    fn key_sigil_rejects_non_text() {
        let err = positional()
            .substitute("SELECT * FROM @", vec![5i64.into()])
            .unwrap_err();
        match err {
            SqlError::KeyPlaceholder { ordinal, found } => {
                assert_eq!(ordinal, 1);
                assert_eq!(found, "int");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn doubled_sigils_emit_literals() {
        let (sql, params) = positional()
            .substitute("SELECT '??' FROM t WHERE a @@ b", vec![])
            .unwrap();
        assert_eq!(sql, "SELECT '?' FROM t WHERE a @ b");
        assert!(params.is_empty());
    }

    #[test]
    fn missing_argument_reports_ordinal_and_count() {
        let err = positional()
            .substitute("a = ? AND b = ?", vec![1i64.into()])
            .unwrap_err();
        match err {
            SqlError::MissingArgument { expected, supplied } => {
                assert_eq!(expected, 2);
                assert_eq!(supplied, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn trailing_arguments_pass_through_in_order() {
        let (sql, params) = positional()
            .substitute("id = ?", vec![1i64.into(), "x".into(), true.into()])
            .unwrap();
        assert_eq!(sql, "id = ?");
        assert_eq!(
            params,
            vec![Value::Int(1), Value::Text("x".into()), Value::Bool(true)]
        );
    }

    #[test]
    fn multibyte_text_is_preserved() {
        let (sql, params) = numbered()
            .substitute("名前 = ? -- コメント", vec!["太郎".into()])
            .unwrap();
        assert_eq!(sql, "名前 = $1 -- コメント");
        assert_eq!(params, vec![Value::Text("太郎".into())]);
    }

    #[test]
    fn numbered_indices_are_strictly_increasing() {
        let (sql, _) = numbered()
            .substitute(
                "? ? ? ?",
                vec![1i64.into(), 2i64.into(), 3i64.into(), 4i64.into()],
            )
            .unwrap();
        assert_eq!(sql, "$1 $2 $3 $4");
    }

    #[test]
    fn custom_sigils() {
        let dialect = Dialect::new('%', '#', PlaceholderStyle::Positional);
        let (sql, params) = dialect
            .substitute("SELECT * FROM % WHERE id = #", vec!["t".into(), 5i64.into()])
            .unwrap();
        assert_eq!(sql, "SELECT * FROM \"t\" WHERE id = ?");
        assert_eq!(params, vec![Value::Int(5)]);
    }
}
