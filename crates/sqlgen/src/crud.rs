//! Thin CRUD orchestration over the statement builders.
//!
//! [`Db`] pairs a driver [`Executor`] with a [`Dialect`] and dispatches
//! records (single or collections) through the builders. All SQL generation
//! happens synchronously in-process; the only await point is the final
//! handoff to the driver.

use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::executor::Executor;
use crate::schema::{Record, row_values, schema_of};
use crate::statement::{bulk_insert_clause, insert_clause, update_clause};
use crate::value::Value;

/// Statement generator bound to a driver and a dialect.
pub struct Db<E> {
    executor: E,
    dialect: Dialect,
}

impl<E: Executor> Db<E> {
    pub fn new(executor: E, dialect: Dialect) -> Self {
        Self { executor, dialect }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Consume the generator and hand the driver back.
    pub fn into_inner(self) -> E {
        self.executor
    }

    /// Substitute template placeholders without executing.
    ///
    /// See [`Dialect::substitute`] for the template rules.
    pub fn substitute(&self, template: &str, args: Vec<Value>) -> SqlResult<(String, Vec<Value>)> {
        self.dialect.substitute(template, args)
    }

    /// Substitute a template and execute the result.
    pub async fn exec(
        &mut self,
        expected_rows: i64,
        template: &str,
        args: Vec<Value>,
    ) -> SqlResult<i64> {
        let (sql, params) = self.dialect.substitute(template, args)?;
        self.run(expected_rows, &sql, &params).await
    }

    async fn run(&mut self, expected_rows: i64, sql: &str, params: &[Value]) -> SqlResult<i64> {
        #[cfg(feature = "tracing")]
        tracing::debug!(sql, params = params.len(), expected_rows, "executing statement");
        self.executor.exec(expected_rows, sql, params).await
    }

    /// Insert one record.
    ///
    /// When the record has exactly one primary-key column and its value was
    /// zero before the insert, the driver-returned last-insert-id is written
    /// back into that field.
    pub async fn insert<R: Record + 'static>(&mut self, table: &str, record: &mut R) -> SqlResult<()> {
        let schema = schema_of::<R>();
        let values = record.read_values();
        let key_was_zero = schema
            .only_primary_key()
            .is_some_and(|pk| values[pk.index].is_zero());

        let (sql, params) = insert_clause(&self.dialect, table, row_values(schema, values))?;
        let insert_id = self.run(1, &sql, &params).await?;

        if key_was_zero {
            record.take_generated_key(insert_id);
        }
        Ok(())
    }

    /// Insert a collection of records, one statement per record.
    pub async fn insert_many<R: Record + 'static>(
        &mut self,
        table: &str,
        records: &mut [R],
    ) -> SqlResult<()> {
        for record in records {
            self.insert(table, record).await?;
        }
        Ok(())
    }

    /// Insert a collection of records with a single multi-row statement.
    ///
    /// The column list is the union across all records; generated keys are
    /// not back-populated in bulk mode.
    pub async fn insert_bulk<R: Record + 'static>(
        &mut self,
        table: &str,
        records: &[R],
    ) -> SqlResult<()> {
        let schema = schema_of::<R>();
        let rows = records
            .iter()
            .map(|r| row_values(schema, r.read_values()))
            .collect();
        let (sql, params) = bulk_insert_clause(&self.dialect, table, rows)?;
        self.run(records.len() as i64, &sql, &params).await?;
        Ok(())
    }

    /// Update one record, matching on its primary-key columns.
    pub async fn update<R: Record + 'static>(&mut self, table: &str, record: &R) -> SqlResult<()> {
        let schema = schema_of::<R>();
        let (sql, params) =
            update_clause(&self.dialect, table, row_values(schema, record.read_values()))?;
        self.run(1, &sql, &params).await?;
        Ok(())
    }

    /// Update a collection of records, one statement per record.
    pub async fn update_many<R: Record + 'static>(
        &mut self,
        table: &str,
        records: &[R],
    ) -> SqlResult<()> {
        for record in records {
            self.update(table, record).await?;
        }
        Ok(())
    }

    /// Insert or update one record, dispatching on its sole primary key:
    /// a zero key inserts, a non-zero key updates.
    ///
    /// Errors when the record does not declare exactly one `pk` column.
    pub async fn save<R: Record + 'static>(&mut self, table: &str, record: &mut R) -> SqlResult<()> {
        let schema = schema_of::<R>();
        let pk = schema
            .only_primary_key()
            .ok_or(SqlError::SinglePrimaryKey { op: "Save" })?;

        if record.read_values()[pk.index].is_zero() {
            self.insert(table, record).await
        } else {
            self.update(table, record).await
        }
    }

    /// Save a collection of records, dispatching each independently.
    pub async fn save_many<R: Record + 'static>(
        &mut self,
        table: &str,
        records: &mut [R],
    ) -> SqlResult<()> {
        for record in records {
            self.save(table, record).await?;
        }
        Ok(())
    }
}
