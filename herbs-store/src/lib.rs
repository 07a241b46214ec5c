//! herbs-store: PostgreSQL access for herb records
//!
//! Owns the connection pool and the herb repository. The pool is an
//! explicit [`Database`] value created once per command and passed by
//! reference; there is no global handle.

pub mod db;
pub mod error;

pub use db::{migrations, Database, HerbRepo};
pub use error::{ErrorKind, Result, StoreError};
