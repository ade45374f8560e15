//! The results of executing SQL text, delivered as streams.
//!
//! Executing SQL text yields one [`StatementResult`] per statement, in order. Each statement in turn
//! carries a stream of rows. Both levels are pulled by the consumer: nothing is produced ahead of
//! what the consumer asks for beyond a small bounded buffer, so arbitrarily large tables are read
//! with a constant number of rows in memory.
//!
//! An error on either stream is its final element.

use std::fmt;

use futures::stream::BoxStream;

use crate::value::Value;
use crate::Error;

/// A single row: one value per column, in column order.
pub type Row = Vec<Value>;

/// The rows of a single statement.
pub type RowStream = BoxStream<'static, Result<Row, Error>>;

/// The per-statement results of executing SQL text.
pub type StatementStream = BoxStream<'static, Result<StatementResult, Error>>;

/// The results of executing SQL text that may contain several statements.
#[must_use]
#[derive(Default)]
pub struct StatementsResult {
    /// `None` when execution never started or the stream has been taken.
    statements: Option<StatementStream>,
}

/// The result of a single statement.
#[must_use]
pub struct StatementResult {
    /// The names of the columns in each row. Empty if the statement does not return rows.
    pub column_names: Vec<String>,
    /// `None` once the rows have been taken.
    rows: Option<RowStream>,
}

impl StatementsResult {
    /// Wrap the stream of per-statement results.
    #[inline]
    pub fn new(statements: StatementStream) -> Self {
        Self {
            statements: Some(statements),
        }
    }

    /// Take the stream of per-statement results. This succeeds at most once.
    #[inline]
    pub fn take_statements(&mut self) -> Result<StatementStream, Error> {
        self.statements.take().ok_or(Error::MissingStatementResults)
    }
}

impl StatementResult {
    /// The result of a statement with the given columns and rows.
    #[inline]
    pub fn new(column_names: Vec<String>, rows: RowStream) -> Self {
        Self {
            column_names,
            rows: Some(rows),
        }
    }

    /// Take the rows of the statement. This succeeds at most once.
    #[inline]
    pub fn take_rows(&mut self) -> Result<RowStream, Error> {
        self.rows.take().ok_or(Error::UnableToPrintStatementResult)
    }
}

impl fmt::Debug for StatementsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatementsResult")
            .field("started", &self.statements.is_some())
            .finish()
    }
}

impl fmt::Debug for StatementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatementResult")
            .field("column_names", &self.column_names)
            .field("has_rows", &self.rows.is_some())
            .finish()
    }
}
