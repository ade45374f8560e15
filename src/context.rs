//! What a shell command needs to run.

use crate::Error;

/// The state shared by shell commands: the database to talk to and how results are shown.
#[derive(Debug)]
pub struct CommandContext<Q> {
    /// The database commands run against, if one was provided.
    db: Option<Q>,
    /// Whether printed tables start with a header line.
    with_header: bool,
}

impl<Q> Default for CommandContext<Q> {
    fn default() -> Self {
        Self {
            db: None,
            with_header: true,
        }
    }
}

impl<Q> CommandContext<Q> {
    /// A context with no database that prints table headers.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `db` for every command run with this context.
    #[inline]
    pub fn with_db(mut self, db: Q) -> Self {
        self.db = Some(db);
        self
    }

    /// Whether tables printed by commands start with a header line.
    #[inline]
    pub fn with_header(mut self, with_header: bool) -> Self {
        self.with_header = with_header;
        self
    }

    /// The database, or [`Error::MissingConnection`] if none was provided.
    #[inline]
    pub fn db(&self) -> Result<&Q, Error> {
        self.db.as_ref().ok_or(Error::MissingConnection)
    }

    /// Whether tables should be printed with a header line.
    #[inline]
    pub const fn header(&self) -> bool {
        self.with_header
    }
}
