//! Where a database lives.

use std::fmt;
use std::path::PathBuf;

/// The database a shell is connected to.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Location {
    /// A fresh in-memory database. Its contents are lost once the connection is closed.
    InMemory,
    /// A database file, created if it does not exist.
    OnDisk {
        /// The path to the database file.
        path: PathBuf,
    },
}

impl Location {
    /// The database at `path`, or an in-memory database if no path is given.
    #[inline]
    pub fn from_optional_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::InMemory, |path| Self::OnDisk { path })
    }
}

impl<T> From<T> for Location
where
    T: Into<PathBuf>,
{
    fn from(path: T) -> Self {
        Self::OnDisk { path: path.into() }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InMemory => f.write_str(":memory:"),
            Self::OnDisk { path } => write!(f, "{}", path.display()),
        }
    }
}
