//! The output side of a SQL shell: rendering driver values as table cells or SQL literals,
//! printing statement results as text tables, and dumping a database as a replayable SQL script.
//!
//! Statement execution is abstracted by [`Queryable`]. With the `sqlite` feature, [`Sqlite`]
//! provides an implementation backed by `rusqlite`.
//!
//! [`Sqlite`]: backend::Sqlite

pub mod backend;
mod context;
pub mod conv;
pub mod dump;
mod error;
pub mod escape;
pub mod format;
mod location;
pub mod output;
mod queryable;
pub mod statement;
mod tracing_shim;
pub mod value;

pub use self::context::CommandContext;
pub use self::error::Error;
pub use self::location::Location;
pub use self::queryable::Queryable;
