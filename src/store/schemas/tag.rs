//! Tag record schema

use serde::{Deserialize, Serialize};

/// Classification of a tag's scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagType {
    Global,
    Regional,
    #[serde(rename = "Site-Specific")]
    SiteSpecific,
    Impactful,
    #[serde(rename = "Profile-Specific")]
    ProfileSpecific,
}

/// Tag in the catalog, referenced by id from feedback items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: i64,
    /// Unique across the catalog
    pub name: String,
    #[serde(rename = "type")]
    pub tag_type: Option<TagType>,
}
