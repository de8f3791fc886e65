//! INSERT and UPDATE clause construction from record metadata.
//!
//! Builders take the record's post-`omitempty` value map in declaration
//! order, classify every value through the policy engine and emit final SQL
//! text plus the bound parameter list for the dialect.

use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::policy::{Rendered, classify};
use crate::schema::FieldInfo;
use crate::value::Value;
use std::collections::HashMap;

/// One record's value map after `omitempty` suppression.
pub(crate) type RowValues<'s> = Vec<(&'s FieldInfo, Value)>;

/// Classify `value` and append either its literal text or a placeholder mark,
/// pushing bound parameters onto `params`.
fn render_value(
    dialect: &Dialect,
    out: &mut String,
    params: &mut Vec<Value>,
    field: &FieldInfo,
    value: Value,
) -> SqlResult<()> {
    match classify(value, field)? {
        Rendered::Literal(text) => out.push_str(text),
        Rendered::Param(v) => {
            params.push(v);
            dialect.push_placeholder(out, params.len());
        }
    }
    Ok(())
}

/// Build `INSERT INTO <table> (<cols>) VALUES (<vals>)` for one record.
pub(crate) fn insert_clause(
    dialect: &Dialect,
    table: &str,
    values: RowValues<'_>,
) -> SqlResult<(String, Vec<Value>)> {
    let mut params = Vec::new();

    let mut cols = String::new();
    let mut vals = String::new();
    for (i, (field, value)) in values.into_iter().enumerate() {
        if i > 0 {
            cols.push_str(", ");
            vals.push_str(", ");
        }
        cols.push_str(&dialect.quote_ident(field.column));
        render_value(dialect, &mut vals, &mut params, field, value)?;
    }

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        dialect.quote_ident(table),
        cols,
        vals
    );
    Ok((sql, params))
}

/// Build `UPDATE <table> SET … WHERE …` for one record.
///
/// Primary-key columns are routed into the WHERE clause, one equality
/// predicate per key column joined with AND; all other columns form the SET
/// list. A primary-key value that renders as NULL cannot identify a row and
/// is an error, as are an empty SET list and an empty WHERE clause.
pub(crate) fn update_clause(
    dialect: &Dialect,
    table: &str,
    values: RowValues<'_>,
) -> SqlResult<(String, Vec<Value>)> {
    let mut params = Vec::new();

    let mut set = String::new();
    let mut set_count = 0usize;
    // SET renders before WHERE, so key values are deferred to keep numbered
    // placeholders in output order.
    let mut keys: RowValues<'_> = Vec::new();

    for (field, value) in values {
        if field.primary_key {
            keys.push((field, value));
            continue;
        }
        if set_count > 0 {
            set.push_str(", ");
        }
        set.push_str(&dialect.quote_ident(field.column));
        set.push_str(" = ");
        render_value(dialect, &mut set, &mut params, field, value)?;
        set_count += 1;
    }

    if set_count == 0 {
        return Err(SqlError::NothingToSet {
            table: table.to_string(),
        });
    }
    if keys.is_empty() {
        return Err(SqlError::NoPrimaryKey {
            table: table.to_string(),
        });
    }

    let mut where_clause = String::new();
    for (i, (field, value)) in keys.into_iter().enumerate() {
        if matches!(classify(value.clone(), field)?, Rendered::Literal("null")) {
            return Err(SqlError::NullPrimaryKey {
                column: field.column.to_string(),
            });
        }
        if i > 0 {
            where_clause.push_str(" AND ");
        }
        where_clause.push_str(&dialect.quote_ident(field.column));
        where_clause.push_str(" = ");
        render_value(dialect, &mut where_clause, &mut params, field, value)?;
    }

    let sql = format!(
        "UPDATE {} SET {} WHERE {}",
        dialect.quote_ident(table),
        set,
        where_clause
    );
    Ok((sql, params))
}

/// Build one multi-row `INSERT INTO <table> (<cols>) VALUES (…),(…),…`.
///
/// The column list is the union of all columns present across the rows, in
/// first-seen order. A row missing a column that appears in another row
/// contributes a NULL (or the column's empty literal when NULL is not
/// allowed) for that column.
pub(crate) fn bulk_insert_clause<'s>(
    dialect: &Dialect,
    table: &str,
    rows: Vec<RowValues<'s>>,
) -> SqlResult<(String, Vec<Value>)> {
    if rows.is_empty() {
        return Err(SqlError::EmptyBulk);
    }

    let mut columns: Vec<&'s FieldInfo> = Vec::new();
    let mut maps: Vec<HashMap<&'s str, Value>> = Vec::with_capacity(rows.len());
    for row in rows {
        let mut map = HashMap::with_capacity(row.len());
        for (field, value) in row {
            if !columns.iter().any(|c| c.column == field.column) {
                columns.push(field);
            }
            map.insert(field.column, value);
        }
        maps.push(map);
    }

    let mut sql = String::from("INSERT INTO ");
    sql.push_str(&dialect.quote_ident(table));
    sql.push_str(" (");
    for (i, field) in columns.iter().enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str(&dialect.quote_ident(field.column));
    }
    sql.push_str(") VALUES ");

    let mut params = Vec::new();
    for (i, mut map) in maps.into_iter().enumerate() {
        if i > 0 {
            sql.push(',');
        }
        sql.push('(');
        for (j, field) in columns.iter().enumerate() {
            if j > 0 {
                sql.push(',');
            }
            let value = map.remove(field.column).unwrap_or(Value::Null);
            render_value(dialect, &mut sql, &mut params, field, value)?;
        }
        sql.push(')');
    }

    Ok((sql, params))
}
