//! Entity record schemas
//!
//! One module per stored entity kind, plus the shared geography enums that
//! both users and walks carry.

pub mod comment;
pub mod feedback;
pub mod tag;
pub mod user;
pub mod walk;

pub use comment::CommentRecord;
pub use feedback::{FeedbackRecord, FeedbackStatus};
pub use tag::{TagRecord, TagType};
pub use user::{Role, UserRecord};
pub use walk::{WalkRecord, WalkStatus};

use serde::{Deserialize, Serialize};

/// Operating regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    East,
    West,
    North,
    South,
}

/// Physical sites where walks take place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Site {
    #[serde(rename = "New York, NY")]
    NewYork,
    #[serde(rename = "Minneapolis, MN")]
    Minneapolis,
    #[serde(rename = "Dallas, TX")]
    Dallas,
    #[serde(rename = "Seattle, WA")]
    Seattle,
}

impl Site {
    /// Region the site belongs to
    pub fn region(&self) -> Region {
        match self {
            Site::NewYork => Region::East,
            Site::Minneapolis => Region::North,
            Site::Dallas => Region::South,
            Site::Seattle => Region::West,
        }
    }
}
