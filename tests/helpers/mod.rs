#![allow(dead_code)]

use std::future::{self, Future};
use std::sync::Mutex;

use anyhow::Result;
use futures::{stream, StreamExt as _};
#[cfg(feature = "sqlite")]
use sqlshell::backend::{DatabaseBackend as _, Sqlite};
use sqlshell::dump::dump;
use sqlshell::statement::{Row, StatementResult, StatementsResult};
use sqlshell::value::Value;
use sqlshell::{CommandContext, Error, Location, Queryable};

/// Produces a canned response for each SQL text and records what was executed.
pub(crate) struct Scripted {
    respond: Box<dyn Fn(&str) -> StatementsResult + Send + Sync>,
    executed: Mutex<Vec<String>>,
}

impl Scripted {
    pub(crate) fn new(respond: impl Fn(&str) -> StatementsResult + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Every SQL text executed so far, in order.
    pub(crate) fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

impl Queryable for Scripted {
    fn execute_statements(
        &self,
        sql: &str,
    ) -> impl Future<Output = Result<StatementsResult, Error>> + Send {
        self.executed.lock().unwrap().push(sql.to_owned());
        future::ready(Ok((self.respond)(sql)))
    }
}

/// A single statement with the given columns and rows.
pub(crate) fn statement(columns: &[&str], rows: Vec<Result<Row, Error>>) -> StatementResult {
    StatementResult::new(
        columns.iter().map(|&column| column.to_owned()).collect(),
        Box::pin(stream::iter(rows)),
    )
}

/// The result of SQL text consisting of a single statement.
pub(crate) fn single(columns: &[&str], rows: Vec<Result<Row, Error>>) -> StatementsResult {
    statements(vec![Ok(statement(columns, rows))])
}

pub(crate) fn statements(statements: Vec<Result<StatementResult, Error>>) -> StatementsResult {
    StatementsResult::new(Box::pin(stream::iter(statements)))
}

/// A row of text values.
pub(crate) fn text_row(values: &[&str]) -> Result<Row, Error> {
    Ok(values.iter().map(|&value| Value::from(value)).collect())
}

/// An error as reported by a driver.
pub(crate) fn driver_error(message: &str) -> Error {
    Error::driver(message.to_owned())
}

/// Dump the database, returning everything written along with the outcome.
pub(crate) async fn dump_capturing<Q>(db: Q) -> (String, Result<(), Error>)
where
    Q: Queryable,
{
    let mut out = Vec::new();
    let result = dump(&CommandContext::new().with_db(db), &mut out).await;
    (String::from_utf8(out).unwrap(), result)
}

pub(crate) async fn dump_to_string<Q>(db: Q) -> Result<String>
where
    Q: Queryable,
{
    let (out, result) = dump_capturing(db).await;
    result?;
    Ok(out)
}

/// Execute every statement of `sql`, discarding any rows.
pub(crate) async fn run<Q>(db: &Q, sql: &str) -> Result<()>
where
    Q: Queryable,
{
    let mut result = db.execute_statements(sql).await?;
    let mut statements = result.take_statements()?;
    while let Some(statement) = statements.next().await {
        let mut rows = statement?.take_rows()?;
        while let Some(row) = rows.next().await {
            let _row = row?;
        }
    }
    Ok(())
}

/// A fresh in-memory database on which `sql` has been run.
#[cfg(feature = "sqlite")]
pub(crate) async fn sqlite_with(sql: &str) -> Result<Sqlite> {
    let db = Sqlite::at_location(Location::InMemory)?;
    run(&db, sql).await?;
    Ok(db)
}

/// A path for a database file that no other test uses.
pub(crate) fn scratch_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("sqlshell-{}-{name}.db", std::process::id()))
}
