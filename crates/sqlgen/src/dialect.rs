//! Per-database dialect configuration.
//!
//! A [`Dialect`] carries the two template sigils and the placeholder style
//! used when rendering bound parameters. Statement builders and the template
//! engine are generic over it, so the same record metadata drives Postgres
//! (`$1, $2, …`) and SQLite/MySQL (`?`) output.

use std::fmt::Write;

/// How bound-parameter marks are rendered in generated SQL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// Bare marks with no index: `?`
    Positional,
    /// 1-based indexed marks: `$1`, `$2`, …
    Numbered,
}

/// Sigil and placeholder configuration for one database dialect.
#[derive(Clone, Debug)]
pub struct Dialect {
    /// Template sigil that splices the next argument as an escaped identifier.
    pub key_sigil: char,
    /// Template sigil that binds the next argument as a parameter.
    pub value_sigil: char,
    /// Rendering of bound-parameter marks.
    pub placeholders: PlaceholderStyle,
}

impl Dialect {
    /// Create a dialect with custom sigils.
    ///
    /// # Panics
    ///
    /// Panics if both sigils are the same character; the template scanner
    /// could not tell them apart. This is a configuration error.
    pub fn new(key_sigil: char, value_sigil: char, placeholders: PlaceholderStyle) -> Self {
        assert!(
            key_sigil != value_sigil,
            "Dialect: key sigil and value sigil must differ, both are '{key_sigil}'"
        );
        Self {
            key_sigil,
            value_sigil,
            placeholders,
        }
    }

    /// PostgreSQL: numbered `$n` placeholders.
    pub fn postgres() -> Self {
        Self::new('@', '?', PlaceholderStyle::Numbered)
    }

    /// SQLite: positional `?` placeholders.
    pub fn sqlite() -> Self {
        Self::new('@', '?', PlaceholderStyle::Positional)
    }

    /// MySQL: positional `?` placeholders.
    pub fn mysql() -> Self {
        Self::new('@', '?', PlaceholderStyle::Positional)
    }

    /// Escape a SQL identifier (table or column name).
    ///
    /// The name is wrapped in double quotes with embedded quotes doubled,
    /// so arbitrary caller-supplied names cannot break out of identifier
    /// position.
    ///
    /// # Panics
    ///
    /// Panics on an embedded NUL character, which no identifier may carry.
    pub fn quote_ident(&self, name: &str) -> String {
        assert!(
            !name.contains('\0'),
            "quote_ident: identifier cannot contain NUL"
        );
        let mut out = String::with_capacity(name.len() + 2);
        out.push('"');
        for ch in name.chars() {
            if ch == '"' {
                out.push('"');
            }
            out.push(ch);
        }
        out.push('"');
        out
    }

    /// Append one placeholder mark for the `nth` (1-based) bound parameter.
    pub(crate) fn push_placeholder(&self, out: &mut String, nth: usize) {
        match self.placeholders {
            PlaceholderStyle::Positional => out.push('?'),
            PlaceholderStyle::Numbered => {
                let _ = write!(out, "${nth}");
            }
        }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::postgres()
    }
}
