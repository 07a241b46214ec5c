//! Repository implementations for database access
//!
//! Each repository borrows the pool and issues exactly one statement
//! per call.

pub mod herbs;

pub use herbs::HerbRepo;
