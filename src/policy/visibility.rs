//! Visibility transform
//!
//! Output shaping for every entity the API returns. Raw relation objects and
//! password hashes never leave this module's view types; responses expose
//! only numeric relation ids plus derived display names.
//!
//! Anonymity rule: an anonymous feedback item renders its creator as
//! "Anonymous" for every viewer, including the creator. The masking is
//! viewer-independent so there is no code path that can leak the identity.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::schemas::{
    CommentRecord, FeedbackRecord, FeedbackStatus, Region, Role, Site, TagRecord, TagType,
    UserRecord, WalkRecord, WalkStatus,
};

/// Name used for masked creators
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Name used when a relation cannot be resolved
pub const UNKNOWN_NAME: &str = "Unknown";

/// Derive a display name from a user record: full name, else username, else
/// "Unknown" when the relation is absent or unresolved.
pub fn display_name(user: Option<&UserRecord>) -> String {
    match user {
        Some(u) => u
            .full_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| u.username.clone()),
        None => UNKNOWN_NAME.to_string(),
    }
}

/// User as rendered by the API
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub disabled: bool,
    pub role: Role,
    pub region: Region,
    pub site: Site,
}

impl From<&UserRecord> for UserView {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            disabled: user.disabled,
            role: user.role,
            region: user.region,
            site: user.site,
        }
    }
}

/// Tag as rendered by the API
#[derive(Debug, Clone, Serialize)]
pub struct TagView {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub tag_type: Option<TagType>,
}

impl From<&TagRecord> for TagView {
    fn from(tag: &TagRecord) -> Self {
        Self {
            id: tag.id,
            name: tag.name.clone(),
            tag_type: tag.tag_type,
        }
    }
}

/// Comment as rendered by the API
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: i64,
    pub creation_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub text: String,
    pub feedback_id: i64,
    pub author_id: i64,
    pub author_name: String,
}

/// Render a comment. Comments carry no anonymity flag; the author is always
/// attributable.
pub fn render_comment(comment: &CommentRecord, author: Option<&UserRecord>) -> CommentView {
    CommentView {
        id: comment.id,
        creation_date: comment.creation_date,
        updated_at: comment.updated_at,
        text: comment.text.clone(),
        feedback_id: comment.feedback_id,
        author_id: comment.author_id,
        author_name: display_name(author),
    }
}

/// Feedback as rendered by the API
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackView {
    pub id: i64,
    pub creation_date: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub status: FeedbackStatus,
    pub votes: u32,
    pub follow_up_note: Option<String>,
    pub resolution_note: Option<String>,
    pub walk_id: i64,
    pub creator_id: i64,
    pub owner_id: Option<i64>,
    pub is_archived: bool,
    pub is_anonymous: bool,
    pub creator_name: String,
    pub owner_name: String,
    pub tags: Vec<TagView>,
    pub comments: Vec<CommentView>,
}

/// Render a feedback item, applying the anonymity mask
pub fn render_feedback(
    feedback: &FeedbackRecord,
    creator: Option<&UserRecord>,
    owner: Option<&UserRecord>,
    tags: Vec<TagView>,
    comments: Vec<CommentView>,
) -> FeedbackView {
    let creator_name = if feedback.is_anonymous {
        ANONYMOUS_NAME.to_string()
    } else {
        display_name(creator)
    };

    FeedbackView {
        id: feedback.id,
        creation_date: feedback.creation_date,
        title: feedback.title.clone(),
        description: feedback.description.clone(),
        status: feedback.status,
        votes: feedback.votes,
        follow_up_note: feedback.follow_up_note.clone(),
        resolution_note: feedback.resolution_note.clone(),
        walk_id: feedback.walk_id,
        creator_id: feedback.creator_id,
        owner_id: feedback.owner_id,
        is_archived: feedback.is_archived,
        is_anonymous: feedback.is_anonymous,
        creator_name,
        owner_name: display_name(owner),
        tags,
        comments,
    }
}

/// Walk as rendered by the API
#[derive(Debug, Clone, Serialize)]
pub struct WalkView {
    pub id: i64,
    pub region: Region,
    pub site: Site,
    pub creation_date: DateTime<Utc>,
    pub walk_date: DateTime<Utc>,
    pub whiteboard: Option<String>,
    pub status: WalkStatus,
    pub creator_id: i64,
    pub owner_id: i64,
    pub is_archived: bool,
    pub creator_name: String,
    pub owner_name: String,
    pub feedback: Vec<FeedbackView>,
}

/// Render a walk with its non-archived feedback. Walk ownership is mandatory,
/// so an unresolvable owner only happens on a racing user deletion and falls
/// back to "Unknown".
pub fn render_walk(
    walk: &WalkRecord,
    creator: Option<&UserRecord>,
    owner: Option<&UserRecord>,
    feedback: Vec<FeedbackView>,
) -> WalkView {
    WalkView {
        id: walk.id,
        region: walk.region,
        site: walk.site,
        creation_date: walk.creation_date,
        walk_date: walk.walk_date,
        whiteboard: walk.whiteboard.clone(),
        status: walk.status,
        creator_id: walk.creator_id,
        owner_id: walk.owner_id,
        is_archived: walk.is_archived,
        creator_name: display_name(creator),
        owner_name: display_name(owner),
        feedback,
    }
}
