//! Catalog shapes related to herbs: regions and usages.
//!
//! These mirror the `regions`, `usage_types`, `usages` and `herb_regions`
//! tables. Nothing in the store reads or writes them yet.

use serde::{Deserialize, Serialize};

use super::Herb;

/// A geographic region where herbs grow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// A kind of use (tea, tincture, ointment, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageType {
    pub id: i32,
    pub name: String,
}

/// How a herb is used for a given usage type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub id: i32,
    pub herb_id: i32,
    pub usage_type_id: i32,
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub herb_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_type_name: Option<String>,
}

/// Many-to-many link between herbs and regions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HerbRegion {
    pub herb_id: i32,
    pub region_id: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub herb_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
}

/// A herb together with its regions and usages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HerbWithDetails {
    pub herb: Herb,
    pub regions: Vec<Region>,
    pub usages: Vec<Usage>,
}

impl From<Herb> for HerbWithDetails {
    fn from(herb: Herb) -> Self {
        Self {
            herb,
            regions: Vec::new(),
            usages: Vec::new(),
        }
    }
}
