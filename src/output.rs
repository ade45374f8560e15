//! Printing statement results as text tables.

use std::fmt::Display;

use comfy_table::presets::NOTHING;
use comfy_table::{ContentArrangement, Table};
use futures::StreamExt as _;
use tokio::io::{AsyncWrite, AsyncWriteExt as _};

use crate::format::{format_row, Mode};
use crate::statement::{StatementResult, StatementsResult};
use crate::tracing_shim::trace;
use crate::Error;

/// Print the result of every statement in order, stopping at the first error.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(result, out)))]
pub async fn print_statements_result<W>(
    mut result: StatementsResult,
    out: &mut W,
    with_header: bool,
) -> Result<(), Error>
where
    W: AsyncWrite + Unpin,
{
    let mut statements = result.take_statements()?;
    while let Some(statement) = statements.next().await {
        print_statement_result(statement?, out, with_header).await?;
    }
    Ok(())
}

/// Print the rows of a single statement as a table.
///
/// Nothing is printed for a statement without columns, though its row stream is still read to the
/// end so that any error it carries is returned. The first error on the row stream aborts
/// printing and is returned; anything already written stays written.
pub async fn print_statement_result<W>(
    mut result: StatementResult,
    out: &mut W,
    with_header: bool,
) -> Result<(), Error>
where
    W: AsyncWrite + Unpin,
{
    let mut rows = result.take_rows()?;
    if result.column_names.is_empty() {
        while let Some(row) = rows.next().await {
            let _row = row?;
        }
        return Ok(());
    }

    let mut table = create_table();
    if with_header {
        set_header(&mut table, result.column_names);
    }

    while let Some(row) = rows.next().await {
        let _table = table.add_row(format_row(&row?, Mode::Display)?);
    }
    trace!(rows = table.row_count(), "rendering table");

    write_table(&mut table, out).await
}

/// Print already formatted rows beneath `header`.
pub async fn print_table<W, H, R>(out: &mut W, header: H, rows: R) -> Result<(), Error>
where
    W: AsyncWrite + Unpin,
    H: IntoIterator<Item: Into<String>>,
    R: IntoIterator<Item = Vec<String>>,
{
    let mut table = create_table();
    set_header(&mut table, header.into_iter().map(Into::into));
    for row in rows {
        let _table = table.add_row(row);
    }
    write_table(&mut table, out).await
}

/// Print `err` for the user.
pub async fn print_error<W, E>(err: &E, out: &mut W) -> Result<(), Error>
where
    W: AsyncWrite + Unpin,
    E: Display + ?Sized,
{
    out.write_all(format!("Error: {err}\n").as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

/// The gap between two columns.
const COLUMN_GAP: u16 = 5;

/// A left-aligned table without borders. Columns are separated by [`COLUMN_GAP`] spaces, which are
/// applied by [`write_table`] once all columns exist.
fn create_table() -> Table {
    let mut table = Table::new();
    let _table = table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Disabled);
    table
}

/// Use `names` as the header of `table`, formatted by [`format_header`].
fn set_header<I>(table: &mut Table, names: I)
where
    I: IntoIterator<Item = String>,
{
    let header: Vec<String> = names.into_iter().map(|name| format_header(&name)).collect();
    let _table = table.set_header(header);
}

/// A column name as shown in a header: uppercased, with underscores turned into spaces. A dot
/// becomes a space too unless it sits between digits or spaces, so `1.5` is kept as is.
fn format_header(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let is_num_or_space = |c: char| c.is_ascii_digit() || c == ' ';

    let replaced: String = chars
        .iter()
        .enumerate()
        .map(|(i, &c)| match c {
            '_' => ' ',
            '.' if (i > 0 && !is_num_or_space(chars[i - 1]))
                || chars.get(i + 1).is_some_and(|&next| !is_num_or_space(next)) =>
            {
                ' '
            }
            c => c,
        })
        .collect();

    let trimmed = replaced.trim();
    if trimmed.is_empty() && !name.is_empty() {
        " ".to_owned()
    } else {
        trimmed.to_uppercase()
    }
}

/// Render `table` to `out`, without trailing whitespace on any line, and flush.
async fn write_table<W>(table: &mut Table, out: &mut W) -> Result<(), Error>
where
    W: AsyncWrite + Unpin,
{
    for column in table.column_iter_mut() {
        let _column = column.set_padding((0, COLUMN_GAP));
    }

    let mut rendered = String::new();
    for line in table.to_string().lines() {
        rendered.push_str(line.trim_end());
        rendered.push('\n');
    }
    out.write_all(rendered.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}
