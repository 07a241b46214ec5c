//! Domain models with validation before persistence
//!
//! A [`Herb`] is checked with [`Herb::validate`] before every write.
//! Invalid input returns ValidationError, not panic.

pub mod catalog;
pub mod herb;
pub mod validation;

pub use catalog::{HerbRegion, HerbWithDetails, Region, Usage, UsageType};
pub use herb::{Herb, HerbPatch};
pub use validation::ValidationError;
