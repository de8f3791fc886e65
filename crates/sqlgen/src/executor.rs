//! Driver execution contract.

use crate::error::SqlResult;
use crate::value::Value;

/// The narrow driver contract the generator hands finished statements to.
///
/// `expected_rows` is the number of rows the caller expects the statement to
/// affect; whether a mismatch matters is the driver's (or caller's) concern,
/// the generator never enforces it. The returned value is the driver's
/// last-inserted-id, used to back-populate integer primary keys.
///
/// Implementations are assumed safe for sequential reuse; concurrent use from
/// multiple callers needs external synchronization.
pub trait Executor: Send {
    /// Execute a finished statement with its bound parameters.
    fn exec(
        &mut self,
        expected_rows: i64,
        sql: &str,
        args: &[Value],
    ) -> impl std::future::Future<Output = SqlResult<i64>> + Send;
}
