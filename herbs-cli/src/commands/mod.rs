//! Command implementations for the herbs CLI

pub mod db;
pub mod herb;

pub use db::run_db;
pub use herb::run_herb;
