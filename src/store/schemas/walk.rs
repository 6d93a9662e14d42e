//! Walk record schema
//!
//! A walk is a site visit. It records two controlling relations: the creator
//! (immutable, who filed it) and the owner (reassignable, who is accountable
//! for it). At creation both point at the same user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::schemas::{Region, Site};

/// Progress states for a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalkStatus {
    Created,
    #[serde(rename = "In-Progress")]
    InProgress,
    Completed,
}

/// Walk record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkRecord {
    pub id: i64,
    pub region: Region,
    pub site: Site,
    pub creation_date: DateTime<Utc>,
    pub walk_date: DateTime<Utc>,
    pub whiteboard: Option<String>,
    pub status: WalkStatus,
    /// Immutable after creation
    pub creator_id: i64,
    /// Reassignable; must always reference an existing user
    pub owner_id: i64,
    /// One-way terminal flag; archiving freezes the walk's own fields but
    /// does not retroactively freeze existing feedback
    pub is_archived: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&WalkStatus::InProgress).unwrap(),
            "\"In-Progress\""
        );
        assert_eq!(
            serde_json::to_string(&WalkStatus::Created).unwrap(),
            "\"Created\""
        );
    }
}
