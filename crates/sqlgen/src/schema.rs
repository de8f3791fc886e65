//! Record metadata extraction.
//!
//! A record type declares its column mappings as field tags of the form
//! `"<column>[,<modifier>]*"` with modifiers `pk`, `omitempty`, `null` and
//! `notnull` (unknown modifiers are ignored for forward compatibility). An
//! empty column name defaults to the field identifier; `-` excludes the
//! field. The `#[derive(Record)]` macro emits these tags from `#[col("…")]`
//! attributes; the parsing here is the single source of truth for the tag
//! syntax.
//!
//! Extraction is deterministic and cached per record type: the first call for
//! a type builds its [`Schema`] and publishes it for concurrent readers.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use crate::value::Value;

/// Underlying kind of a mapped field, as declared by the record type.
///
/// Drives the default empty literal: a pointer (optional) field falls back to
/// `null`, a numeric field to `0`, everything else to `''`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Optional field (`Option<T>`); may render as NULL unless `notnull`.
    Pointer,
    /// Numeric primitive.
    Numeric,
    /// Text, bytes and everything else.
    Other,
}

/// One declared field mapping, as supplied by a [`Record`] implementation.
#[derive(Clone, Copy, Debug)]
pub struct FieldTag {
    /// Source field identifier.
    pub name: &'static str,
    /// Raw mapping tag: `"<column>[,<modifier>]*"`.
    pub tag: &'static str,
    /// Underlying field kind.
    pub kind: FieldKind,
}

/// Normalized per-column mapping policy for one record field.
#[derive(Clone, Debug)]
pub struct FieldInfo {
    /// Source field identifier.
    pub name: &'static str,
    /// SQL column name.
    pub column: &'static str,
    /// Index into the record's `read_values()` output.
    pub index: usize,
    /// Skip the column entirely when the value is zero.
    pub omit_empty: bool,
    /// Column participates in UPDATE WHERE / Save dispatch.
    pub primary_key: bool,
    /// Explicitly nullable.
    pub null: bool,
    /// Explicitly non-nullable; overrides pointer-implied nullability.
    pub not_null: bool,
    /// Field is an optional (pointer) type.
    pub is_pointer: bool,
    /// SQL literal emitted for a zero value when NULL is not allowed.
    pub empty_literal: &'static str,
}

impl FieldInfo {
    /// Returns true if the column can store NULL.
    pub fn allows_null(&self) -> bool {
        if self.is_pointer {
            return !self.not_null;
        }
        self.null
    }
}

/// The complete column map for one record type, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    fields: Vec<FieldInfo>,
}

impl Schema {
    /// Parse declared field tags into a normalized schema.
    ///
    /// # Panics
    ///
    /// Panics when two fields map to the same column. That is a programmer
    /// error in the type definition, not a runtime condition.
    pub fn extract(tags: &'static [FieldTag]) -> Self {
        let mut fields: Vec<FieldInfo> = Vec::with_capacity(tags.len());

        for (index, ft) in tags.iter().enumerate() {
            let mut parts = ft.tag.split(',');
            let column = parts.next().unwrap_or("");

            if column == "-" {
                continue;
            }
            let column = if column.is_empty() { ft.name } else { column };

            let mut info = FieldInfo {
                name: ft.name,
                column,
                index,
                omit_empty: false,
                primary_key: false,
                null: false,
                not_null: false,
                is_pointer: ft.kind == FieldKind::Pointer,
                empty_literal: match ft.kind {
                    FieldKind::Pointer => "null",
                    FieldKind::Numeric => "0",
                    FieldKind::Other => "''",
                },
            };

            for modifier in parts {
                match modifier {
                    "pk" => info.primary_key = true,
                    "omitempty" => info.omit_empty = true,
                    "null" => info.null = true,
                    "notnull" => info.not_null = true,
                    // Unknown modifiers are ignored.
                    _ => {}
                }
            }

            // A non-nullable column must never fall back to a NULL literal.
            if !info.allows_null() && info.empty_literal == "null" {
                info.empty_literal = "''";
            }

            if fields.iter().any(|f| f.column == info.column) {
                panic!(
                    "Schema::extract: duplicate column mapping '{}' on field '{}'",
                    info.column, info.name
                );
            }
            fields.push(info);
        }

        Self { fields }
    }

    /// All mapped fields in declaration order.
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Look up a field by column name.
    pub fn field(&self, column: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.column == column)
    }

    /// All primary-key fields in declaration order.
    pub fn primary_keys(&self) -> impl Iterator<Item = &FieldInfo> {
        self.fields.iter().filter(|f| f.primary_key)
    }

    /// The sole primary-key field, or `None` when the type declares zero or
    /// several. Save dispatch and insert back-population require exactly one.
    pub fn only_primary_key(&self) -> Option<&FieldInfo> {
        let mut pks = self.primary_keys();
        let first = pks.next()?;
        if pks.next().is_some() {
            return None;
        }
        Some(first)
    }
}

/// A record type that maps to a single table.
///
/// Usually implemented via `#[derive(Record)]`; manual implementations only
/// need to keep `read_values()` index-aligned with `fields()`.
pub trait Record {
    /// Declared field mappings in declaration order.
    fn fields() -> &'static [FieldTag];

    /// Runtime field values, index-aligned with [`Record::fields`].
    fn read_values(&self) -> Vec<Value>;

    /// Receives the driver-generated key after a successful insert when the
    /// record's sole primary-key field was zero beforehand. The default does
    /// nothing; the derive overrides it for integer-typed keys.
    fn take_generated_key(&mut self, key: i64) {
        let _ = key;
    }
}

static SCHEMAS: OnceLock<RwLock<HashMap<TypeId, &'static Schema>>> = OnceLock::new();

/// Schema for a record type, computed once on first use.
///
/// The cache is read-mostly: concurrent lookups take a shared lock, a miss
/// builds the schema and publishes it. Entries are never evicted; the key
/// space is bounded by the number of record types in the program.
pub fn schema_of<R: Record + 'static>() -> &'static Schema {
    let cache = SCHEMAS.get_or_init(|| RwLock::new(HashMap::new()));
    if let Ok(map) = cache.read() {
        if let Some(schema) = map.get(&TypeId::of::<R>()).copied() {
            return schema;
        }
    }

    let built: &'static Schema = Box::leak(Box::new(Schema::extract(R::fields())));
    let mut map = match cache.write() {
        Ok(map) => map,
        Err(poisoned) => poisoned.into_inner(),
    };
    // Two racing builders may both get here; the first insert wins.
    *map.entry(TypeId::of::<R>()).or_insert(built)
}

/// The record's value map after `omitempty` suppression, in declaration
/// order. `values` must be the record's full `read_values()` output.
pub(crate) fn row_values(schema: &Schema, mut values: Vec<Value>) -> Vec<(&FieldInfo, Value)> {
    let mut out = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let value = std::mem::replace(&mut values[field.index], Value::Null);
        if field.omit_empty && value.is_zero() {
            continue;
        }
        out.push((field, value));
    }
    out
}
