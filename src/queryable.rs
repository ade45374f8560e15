//! A database that executes raw SQL text.

use std::future::Future;

use crate::statement::StatementsResult;
use crate::Error;

/// A trait for types that can execute SQL text containing any number of statements.
///
/// The SQL text is opaque: it is forwarded to the database as-is, including any identifiers
/// interpolated by the caller.
pub trait Queryable {
    /// Execute `sql`, returning one result per statement.
    ///
    /// Errors that occur while executing an individual statement or reading a row are reported
    /// through the returned streams. Only a failure to start execution is returned directly.
    ///
    /// Implementations may serialize access to the underlying connection. Callers should finish
    /// reading (or drop) one row stream before executing further SQL.
    fn execute_statements(
        &self,
        sql: &str,
    ) -> impl Future<Output = Result<StatementsResult, Error>> + Send;
}
