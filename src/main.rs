//! A command-line interface for running SQL against a SQLite database and dumping it as SQL.
//!
//! For usage, run `cargo run --features binary -- --help`.

#[cfg(not(feature = "sqlite"))]
compile_error!("the binary requires the `sqlite` feature");

mod cli;

use crate::cli::{Args, Command};
use clap::Parser as _;
use sqlshell::backend::{DatabaseBackend as _, Sqlite};
use sqlshell::output::{print_error, print_statements_result, print_table};
use sqlshell::{dump, CommandContext, Error, Location, Queryable as _};
use std::process::ExitCode;
use tokio::io::{self, AsyncReadExt as _};
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let Args { database, command } = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(execute(Location::from_optional_path(database), command))
}

/// Run the command, reporting any failure on stderr.
///
/// Only a failure to report the error is returned as an error.
async fn execute(
    location: Location,
    command: Command,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match run(location, command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            print_error(&err, &mut io::stderr()).await?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Run a single command against the database at `location`, writing its output to stdout.
async fn run(location: Location, command: Command) -> Result<(), Error> {
    let db = Sqlite::at_location(location)?;
    let mut stdout = io::stdout();

    match command {
        Command::Exec { sql, no_header } => {
            let sql = if sql == "-" { read_stdin().await? } else { sql };
            let ctx = CommandContext::new().with_db(db).with_header(!no_header);
            let result = ctx.db()?.execute_statements(&sql).await?;
            print_statements_result(result, &mut stdout, ctx.header()).await
        }
        Command::Dump => dump::dump(&CommandContext::new().with_db(db), &mut stdout).await,
        Command::Tables => {
            let tables = dump::list_tables(&db).await?;
            print_table(&mut stdout, ["name"], tables.into_iter().map(|name| vec![name])).await
        }
    }
}

/// Read all of stdin as SQL text.
async fn read_stdin() -> io::Result<String> {
    let mut sql = String::new();
    let _num_bytes = io::stdin().read_to_string(&mut sql).await?;
    Ok(sql)
}
