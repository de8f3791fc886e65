//! # sqlgen
//!
//! A metadata-driven SQL statement generator.
//!
//! Record types declare their column mappings once (via `#[derive(Record)]`
//! or a manual [`Record`] impl); sqlgen turns them into correct, escaped
//! INSERT/UPDATE statements and substitutes placeholders in hand-written SQL
//! templates, expanding list arguments into grouped parameter lists.
//!
//! ## Features
//!
//! - **Declarative mapping**: field tags (`"column,pk,omitempty,null,notnull"`)
//!   are extracted once per type and cached
//! - **Null policy**: per-column decisions between a `null` literal, an empty
//!   literal and a bound parameter
//! - **Dialect-aware**: positional (`?`) and numbered (`$1, $2, …`)
//!   placeholder styles, configurable template sigils
//! - **Narrow driver seam**: everything executes through a single
//!   [`Executor::exec`] contract; no connection management here
//!
//! ## Example
//!
//! ```ignore
//! use sqlgen::{Db, Dialect, Record};
//!
//! #[derive(Record)]
//! struct User {
//!     #[col("id,pk,omitempty")]
//!     id: i64,
//!     #[col("")]
//!     email: String,
//!     #[col("note,null")]
//!     note: Option<String>,
//! }
//!
//! let mut db = Db::new(driver, Dialect::postgres());
//! let mut user = User { id: 0, email: "a@example.com".into(), note: None };
//! db.save("users", &mut user).await?; // inserts, back-populates user.id
//! db.save("users", &mut user).await?; // updates WHERE "id" = $n
//! ```

pub mod crud;
pub mod dialect;
pub mod error;
pub mod executor;
pub mod policy;
pub mod schema;
pub mod statement;
pub mod template;
pub mod value;

pub use crud::Db;
pub use dialect::{Dialect, PlaceholderStyle};
pub use error::{SqlError, SqlResult};
pub use executor::Executor;
pub use policy::{Rendered, classify};
pub use schema::{FieldInfo, FieldKind, FieldTag, Record, Schema, schema_of};
pub use value::Value;

#[cfg(feature = "derive")]
pub use sqlgen_derive::Record;
