pub mod config;
pub mod error;
pub mod models;
pub mod render;

pub use config::{DatabaseConfig, DatabaseOverrides, HerbsConfig};
pub use error::{CoreError, Result};
pub use models::{
    Herb, HerbPatch, HerbRegion, HerbWithDetails, Region, Usage, UsageType, ValidationError,
};
pub use render::OutputFormat;
