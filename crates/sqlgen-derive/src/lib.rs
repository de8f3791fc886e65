//! Derive macros for sqlgen
//!
//! Provides the `#[derive(Record)]` macro.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod record;

/// Derive the `Record` trait for a struct.
///
/// # Example
///
/// ```ignore
/// use sqlgen::Record;
///
/// #[derive(Record)]
/// struct User {
///     #[col("id,pk,omitempty")]
///     id: i64,
///     #[col("")]
///     email: String,
///     #[col("note,null")]
///     note: Option<String>,
///     cached: String, // no #[col] attribute: not mapped
/// }
/// ```
///
/// # Attributes
///
/// - `#[col("<column>[,<modifier>]*")]` — column mapping tag; modifiers are
///   `pk`, `omitempty`, `null` and `notnull`. An empty column name maps the
///   field under its own identifier; `-` excludes it.
///
/// # Generated
///
/// - `fields()` — the declared mapping tags in declaration order
/// - `read_values()` — runtime field values, index-aligned with `fields()`
/// - `take_generated_key()` — written only when the struct has exactly one
///   integer-typed `pk` field; assigns the driver-generated key to it
#[proc_macro_derive(Record, attributes(col))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
