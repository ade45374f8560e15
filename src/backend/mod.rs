//! Database backends that can execute SQL text.

#[cfg(feature = "sqlite")]
mod sqlite;

/// Restricts [`DatabaseBackend`] to the backends defined here.
mod sealed {
    pub trait Sealed {}
    #[cfg(feature = "sqlite")]
    impl Sealed for super::sqlite::Sqlite {}
}

#[cfg(feature = "sqlite")]
pub use self::sqlite::Sqlite;
use crate::Location;

/// A database that can be opened at a [`Location`].
pub trait DatabaseBackend: sealed::Sealed + Sized {
    /// The error reported by the underlying driver.
    type Error;

    /// Open the database at the given location.
    fn at_location(location: Location) -> Result<Self, Self::Error>;

    /// The location the database was opened at.
    fn location(&self) -> &Location;
}
