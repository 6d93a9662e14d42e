//! Feedback record schema
//!
//! Feedback items hang off a walk. Ownership is nullable here, unlike walks:
//! an item can sit unassigned until someone takes accountability for it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resolution states for a feedback item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackStatus {
    Created,
    Assigned,
    #[serde(rename = "In-Progress")]
    InProgress,
    Successful,
    Unsuccessful,
}

/// Feedback record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: i64,
    pub creation_date: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub status: FeedbackStatus,
    pub votes: u32,
    pub follow_up_note: Option<String>,
    pub resolution_note: Option<String>,
    /// Immutable; the parent walk must not be archived at creation time.
    /// Once created, this item's archival is independent of the walk's.
    pub walk_id: i64,
    /// Immutable after creation
    pub creator_id: i64,
    /// Reassignable and nullable
    pub owner_id: Option<i64>,
    /// Tag references, validated against the tag catalog on write
    pub tag_ids: Vec<i64>,
    /// One-way terminal flag; freezes this item and all of its comments
    pub is_archived: bool,
    /// Masks the creator identity in every rendered view, including the
    /// creator's own
    pub is_anonymous: bool,
}
