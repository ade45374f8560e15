//! Errors surfaced by formatting, printing, and dumping.

use crate::format::FormatError;

/// Any error that can occur while executing, printing, or dumping statements.
///
/// Errors are never accumulated: every operation stops at the first one and returns it.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A [`StatementsResult`](crate::statement::StatementsResult) was never started, or its
    /// statements were already taken.
    #[error("missing statement result channel")]
    MissingStatementResults,
    /// A [`StatementResult`](crate::statement::StatementResult) has no row stream left to read.
    #[error("unable to print statement result")]
    UnableToPrintStatementResult,
    /// A query that must produce a statement produced none.
    #[error("query produced no statement result")]
    NoStatement,
    /// A metadata query returned a row of unexpected width.
    #[error("expected {expected} columns, got {found}")]
    ColumnCount {
        /// The number of columns the query selects.
        expected: usize,
        /// The number of columns in the row that was returned.
        found: usize,
    },
    /// The schema of a table did not contain exactly one `CREATE TABLE` statement.
    #[error("expected 1 table definition for {table}, got {found}")]
    TableDefinition {
        /// The table being dumped.
        table: String,
        /// The number of `table` rows the schema query returned.
        found: usize,
    },
    /// The command was run without a database to talk to.
    #[error("missing db connection")]
    MissingConnection,
    /// A value could not be formatted.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The SQLite driver reported an error.
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    /// Some other statement-execution collaborator reported an error.
    #[error(transparent)]
    Driver(Box<dyn std::error::Error + Send + Sync>),
    /// Writing to the output sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an error reported by a driver that has no dedicated variant.
    #[inline]
    pub fn driver<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Driver(err.into())
    }
}
