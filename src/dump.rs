//! Rendering a database as a SQL script that recreates it.
//!
//! The script disables foreign key enforcement, then for each table emits its `CREATE TABLE`
//! statement, one `INSERT` per row, and finally the table's indexes, triggers, and other schema
//! objects. Deferring those objects until after the data means triggers do not fire and indexes
//! are not maintained while the rows are replayed.

use futures::StreamExt as _;
use tokio::io::{AsyncWrite, AsyncWriteExt as _};

use crate::context::CommandContext;
use crate::escape::{escape_single_quotes, quote_identifier_if_needed};
use crate::format::{format_row, Mode};
use crate::queryable::Queryable;
use crate::statement::StatementResult;
use crate::tracing_shim::{debug, info_span, Instrument as _};
use crate::Error;

/// The first line of every dump.
const PREAMBLE: &str = "PRAGMA foreign_keys=OFF;";

/// Lists user tables, leaving out SQLite's own tables and the bookkeeping tables of replication
/// and WASM function support.
pub const LIST_TABLES_QUERY: &str = "SELECT name FROM sqlite_master WHERE type='table' \
    and name not like 'sqlite_%' \
    and name != '_litestream_seq' \
    and name != '_litestream_lock' \
    and name != 'libsql_wasm_func_table'";

/// The stored schema of a single table.
#[derive(Debug)]
struct TableSchema {
    /// The `CREATE TABLE` statement, terminated by a semicolon.
    create_table: String,
    /// Every other schema object tied to the table, in the order the database returned them.
    other: Vec<String>,
}

/// Write a SQL script that recreates the database of `ctx` to `out`.
///
/// Tables are dumped in the order the database lists them. The first error aborts the dump;
/// everything written up to that point is left in `out`.
pub async fn dump<Q, W>(ctx: &CommandContext<Q>, out: &mut W) -> Result<(), Error>
where
    Q: Queryable,
    W: AsyncWrite + Unpin,
{
    let db = ctx.db()?;

    write_line(out, PREAMBLE).await?;

    let tables = list_tables(db).await?;
    debug!(count = tables.len(), "dumping tables");

    for table in &tables {
        dump_table(db, table, out)
            .instrument(info_span!("dump_table", %table))
            .await?;
    }

    out.flush().await?;
    Ok(())
}

/// The names of all user tables, read in full before returning.
pub async fn list_tables<Q>(db: &Q) -> Result<Vec<String>, Error>
where
    Q: Queryable,
{
    let mut statement = first_statement(db, LIST_TABLES_QUERY).await?;
    let mut rows = statement.take_rows()?;

    let mut tables = Vec::new();
    while let Some(row) = rows.next().await {
        let name = format_row(&row?, Mode::Display)?
            .into_iter()
            .next()
            .ok_or(Error::ColumnCount {
                expected: 1,
                found: 0,
            })?;
        tables.push(name);
    }
    Ok(tables)
}

/// Write the `CREATE TABLE` statement of `table`, then its rows, then its other schema objects.
async fn dump_table<Q, W>(db: &Q, table: &str, out: &mut W) -> Result<(), Error>
where
    Q: Queryable,
    W: AsyncWrite + Unpin,
{
    let TableSchema {
        create_table,
        other,
    } = table_schema(db, table).await?;

    write_line(out, &create_table).await?;
    dump_table_records(db, table, out).await?;
    for statement in &other {
        write_line(out, statement).await?;
    }

    debug!(other_statements = other.len(), "dumped table");
    Ok(())
}

/// Read the stored schema of `table`, which must include exactly one table definition.
async fn table_schema<Q>(db: &Q, table: &str) -> Result<TableSchema, Error>
where
    Q: Queryable,
{
    // Automatic indexes have no SQL of their own and are recreated by `CREATE TABLE`.
    let sql = format!(
        "SELECT type, sql || ';' FROM sqlite_master WHERE tbl_name='{}' AND sql IS NOT NULL",
        escape_single_quotes(table)
    );
    let mut statement = first_statement(db, &sql).await?;
    let mut rows = statement.take_rows()?;

    let mut create_tables = Vec::with_capacity(1);
    let mut other = Vec::new();
    while let Some(row) = rows.next().await {
        let formatted = format_row(&row?, Mode::Display)?;
        let [kind, sql]: [String; 2] =
            formatted
                .try_into()
                .map_err(|formatted: Vec<String>| Error::ColumnCount {
                    expected: 2,
                    found: formatted.len(),
                })?;

        if kind == "table" {
            create_tables.push(sql);
        } else {
            other.push(sql);
        }
    }

    match <[String; 1]>::try_from(create_tables) {
        Ok([create_table]) => Ok(TableSchema {
            create_table,
            other,
        }),
        Err(create_tables) => Err(Error::TableDefinition {
            table: table.to_owned(),
            found: create_tables.len(),
        }),
    }
}

/// Write one `INSERT` statement per row of `table`, in the order the rows are read.
async fn dump_table_records<Q, W>(db: &Q, table: &str, out: &mut W) -> Result<(), Error>
where
    Q: Queryable,
    W: AsyncWrite + Unpin,
{
    let sql = format!("SELECT * FROM '{}'", escape_single_quotes(table));
    let mut statement = first_statement(db, &sql).await?;
    let mut rows = statement.take_rows()?;

    let prefix = format!("INSERT INTO {} VALUES (", quote_identifier_if_needed(table));
    while let Some(row) = rows.next().await {
        let values = format_row(&row?, Mode::SqlLiteral)?;
        let insert = format!("{prefix}{});", values.join(", "));
        write_line(out, &insert).await?;
    }
    Ok(())
}

/// Execute `sql` and return the result of its first statement.
async fn first_statement<Q>(db: &Q, sql: &str) -> Result<StatementResult, Error>
where
    Q: Queryable,
{
    let mut result = db.execute_statements(sql).await?;
    let mut statements = result.take_statements()?;
    statements.next().await.ok_or(Error::NoStatement)?
}

/// Write `line` followed by a newline.
async fn write_line<W>(out: &mut W, line: &str) -> Result<(), Error>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(line.as_bytes()).await?;
    out.write_all(b"\n").await?;
    Ok(())
}
