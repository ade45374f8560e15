use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use async_stream::stream;
use rusqlite::{Batch, Connection, Statement};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::backend::DatabaseBackend;
use crate::conv::sqlite_value_to_value;
use crate::queryable::Queryable;
use crate::statement::{Row, StatementResult, StatementsResult};
use crate::tracing_shim::{debug, trace};
use crate::{Error, Location};

/// The number of rows read ahead of the consumer for each statement.
const ROW_BUFFER: usize = 64;

/// A SQLite database, accessed through a single shared connection.
///
/// Statements are executed on a blocking thread. Only one execution runs at a time; a second call
/// to [`Queryable::execute_statements`] waits until the previous execution has produced all of
/// its rows or its consumer has gone away.
#[derive(Debug)]
pub struct Sqlite {
    /// Where the database was opened.
    location: Location,
    /// The connection every execution runs on, one at a time.
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseBackend for Sqlite {
    type Error = rusqlite::Error;

    fn at_location(location: Location) -> Result<Self, Self::Error> {
        let connection = open(&location)?;
        Ok(Self {
            location,
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    fn location(&self) -> &Location {
        &self.location
    }
}

/// Open a new connection to the database at `location`.
fn open(location: &Location) -> rusqlite::Result<Connection> {
    match location {
        Location::InMemory => Connection::open_in_memory(),
        Location::OnDisk { path } => Connection::open(path),
    }
}

impl Queryable for Sqlite {
    fn execute_statements(
        &self,
        sql: &str,
    ) -> impl Future<Output = Result<StatementsResult, Error>> + Send {
        debug!(%sql, location = %self.location(), "executing statements");
        let connection = Arc::clone(&self.connection);
        let sql = sql.to_owned();

        async move {
            // Only one statement is in flight at a time, so there is nothing to buffer.
            let (tx, mut rx) = mpsc::channel(1);
            let _handle = tokio::task::spawn_blocking(move || {
                let connection = connection.lock().unwrap_or_else(PoisonError::into_inner);
                produce_statements(&connection, &sql, &tx);
            });

            let statements = stream!({
                while let Some(statement) = rx.recv().await {
                    yield statement;
                }
            });
            Ok(StatementsResult::new(Box::pin(statements)))
        }
    }
}

/// Execute each statement of `sql` in order.
///
/// A statement that returns rows has its result sent before its rows are stepped through, and
/// a failure while stepping ends its row stream. A statement without columns is run to
/// completion first, so a failure to run it is the final element of the statement stream.
///
/// Stops at the first error, or as soon as nobody is listening for further statements.
fn produce_statements(
    connection: &Connection,
    sql: &str,
    statements: &mpsc::Sender<Result<StatementResult, Error>>,
) {
    let mut batch = Batch::new(connection, sql);
    loop {
        let mut statement = match batch.next() {
            Ok(Some(statement)) => statement,
            Ok(None) => return,
            Err(err) => {
                let _res = statements.blocking_send(Err(err.into()));
                return;
            }
        };

        let column_names = statement
            .column_names()
            .into_iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();

        if column_names.is_empty() {
            if let Err(err) = run_to_completion(&mut statement) {
                let _res = statements.blocking_send(Err(err.into()));
                return;
            }
            let result = StatementResult::new(column_names, Box::pin(futures::stream::empty()));
            if statements.blocking_send(Ok(result)).is_err() {
                trace!("statement consumer went away");
                return;
            }
            continue;
        }

        let (tx, rx) = mpsc::channel(ROW_BUFFER);
        let result = StatementResult::new(column_names, Box::pin(ReceiverStream::new(rx)));
        if statements.blocking_send(Ok(result)).is_err() {
            trace!("statement consumer went away");
            return;
        }

        if let Err(err) = produce_rows(&mut statement, &tx) {
            let _res = tx.blocking_send(Err(err.into()));
            return;
        }
    }
}

/// Step through a statement that returns no rows.
fn run_to_completion(statement: &mut Statement<'_>) -> rusqlite::Result<()> {
    let mut rows = statement.query([])?;
    while rows.next()?.is_some() {}
    Ok(())
}

/// Step through a statement, sending each row. The statement is always run to completion unless
/// a row is produced that nobody is listening for.
fn produce_rows(
    statement: &mut Statement<'_>,
    rows_tx: &mpsc::Sender<Result<Row, Error>>,
) -> rusqlite::Result<()> {
    let mut rows = statement.query([])?;
    while let Some(row) = rows.next()? {
        let column_count = row.as_ref().column_count();
        let values = (0..column_count)
            .map(|i| row.get_ref(i).map(sqlite_value_to_value))
            .collect::<rusqlite::Result<Row>>()?;
        if rows_tx.blocking_send(Ok(values)).is_err() {
            trace!("row consumer went away");
            break;
        }
    }
    Ok(())
}
