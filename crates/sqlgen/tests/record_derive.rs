//! Tests for the #[derive(Record)] expansion.

use sqlgen::{FieldKind, Record, Value, schema_of};

#[derive(Record)]
struct Article {
    #[col("id,pk,omitempty")]
    id: Option<i64>,
    #[col("")]
    title: String,
    #[col("body,null")]
    body: Option<String>,
    #[col("view_count")]
    view_count: u32,
    #[col("-")]
    draft: bool,
    #[allow(dead_code)]
    dirty: bool, // unmapped
}

fn article() -> Article {
    Article {
        id: None,
        title: "hello".to_string(),
        body: None,
        view_count: 3,
        draft: true,
        dirty: false,
    }
}

#[test]
fn derive_emits_declared_tags() {
    let fields = Article::fields();
    // All #[col] fields appear, the untagged one does not.
    assert_eq!(fields.len(), 5);
    assert_eq!(fields[0].name, "id");
    assert_eq!(fields[0].tag, "id,pk,omitempty");
    assert!(matches!(fields[0].kind, FieldKind::Pointer));
    assert!(matches!(fields[1].kind, FieldKind::Other));
    assert!(matches!(fields[3].kind, FieldKind::Numeric));
}

#[test]
fn read_values_align_with_fields() {
    let values = article().read_values();
    assert_eq!(values.len(), Article::fields().len());
    assert_eq!(values[0], Value::Null);
    assert_eq!(values[1], Value::Text("hello".into()));
    assert_eq!(values[3], Value::Int(3));
    assert_eq!(values[4], Value::Bool(true));
}

#[test]
fn schema_excludes_dash_and_defaults_names() {
    let schema = schema_of::<Article>();
    // `-` excluded, untagged excluded.
    assert!(schema.field("draft").is_none());
    assert!(schema.field("dirty").is_none());
    // Empty column name defaults to the field identifier.
    assert_eq!(schema.field("title").unwrap().name, "title");
    assert_eq!(schema.fields().len(), 4);
}

#[test]
fn generated_key_lands_in_optional_pk() {
    let mut a = article();
    a.take_generated_key(17);
    assert_eq!(a.id, Some(17));
}

#[derive(Record)]
struct Counter {
    #[col("id,pk")]
    id: i32,
    #[col("n")]
    n: i64,
}

#[test]
fn generated_key_narrows_to_declared_int_type() {
    let mut c = Counter { id: 0, n: 0 };
    c.take_generated_key(9);
    assert_eq!(c.id, 9);
}

#[derive(Record)]
struct NamedKey {
    #[col("slug,pk")]
    slug: String,
    #[col("label")]
    label: String,
}

#[test]
fn non_integer_key_is_left_alone() {
    let mut n = NamedKey {
        slug: "intro".to_string(),
        label: "Intro".to_string(),
    };
    // String keys cannot take a generated id; the default no-op applies.
    n.take_generated_key(5);
    assert_eq!(n.slug, "intro");
}
