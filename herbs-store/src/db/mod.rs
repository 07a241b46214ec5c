//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - One explicit pool per command, closed when the command ends
//! - One parameterized statement per repository call
//! - Every row decoded by a single shared routine
//! - No retries: errors go straight back to the caller

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{connect_options, pool_options, Database, MAX_CONNECTIONS};
pub use repos::*;
