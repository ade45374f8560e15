//! Command-line interface for sqlshell.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line arguments for sqlshell.
#[derive(Debug, Parser)]
#[command(version, propagate_version = true)]
pub(crate) struct Args {
    /// The database file to open.
    ///
    /// If omitted, a fresh in-memory database is used.
    #[arg(global = true, short, long)]
    pub(crate) database: Option<PathBuf>,
    /// The operation to perform.
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// What operation to perform.
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Execute SQL and print the result of every statement as a table.
    #[clap(aliases = ["execute", "run"])]
    Exec {
        /// The SQL to execute. Multiple statements are separated by semicolons.
        ///
        /// If `-`, the SQL is read from stdin.
        sql: String,
        /// Omit the header line of each table.
        #[arg(long)]
        no_header: bool,
    },
    /// Render the database's schema and content as SQL.
    ///
    /// Replaying the output against an empty database recreates the tables, their rows, and
    /// their indexes and triggers.
    Dump,
    /// List the tables of the database.
    #[clap(alias = "ls")]
    Tables,
}
