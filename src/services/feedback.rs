//! Feedback operations

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::policy::authorization::{decide, Action, Target};
use crate::policy::lifecycle::{archive, ensure_mutable, Archivable, ArchiveOutcome};
use crate::policy::visibility::{render_comment, render_feedback, FeedbackView, TagView};
use crate::services::StatusResponse;
use crate::store::schemas::{FeedbackRecord, FeedbackStatus, UserRecord};
use crate::store::MemoryStore;
use crate::types::{Result, WalkboardError};

/// Payload for creating a feedback item
#[derive(Debug, Deserialize)]
pub struct FeedbackCreate {
    pub title: String,
    pub description: String,
    #[serde(default = "default_feedback_status")]
    pub status: FeedbackStatus,
    #[serde(default)]
    pub votes: u32,
    #[serde(default)]
    pub follow_up_note: Option<String>,
    #[serde(default)]
    pub resolution_note: Option<String>,
    pub walk_id: i64,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub tags_id: Vec<i64>,
}

fn default_feedback_status() -> FeedbackStatus {
    FeedbackStatus::Created
}

/// Payload for updating a feedback item. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct FeedbackUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<FeedbackStatus>,
    pub owner_id: Option<i64>,
    pub follow_up_note: Option<String>,
    pub resolution_note: Option<String>,
    pub tag_ids: Option<Vec<i64>>,
}

/// Render a feedback item with its tags and comment thread
pub(crate) fn view(store: &MemoryStore, item: &FeedbackRecord) -> FeedbackView {
    let creator = store.user(item.creator_id);
    let owner = item.owner_id.and_then(|id| store.user(id));

    // Tag references are validated on write; anything missing here was
    // removed from the catalog since and is simply dropped from the view.
    let tags: Vec<TagView> = item
        .tag_ids
        .iter()
        .filter_map(|id| store.tag(*id))
        .map(|t| TagView::from(&t))
        .collect();

    let comments = store
        .comments_for_feedback(item.id)
        .iter()
        .map(|c| {
            let author = store.user(c.author_id);
            render_comment(c, author.as_ref())
        })
        .collect();

    render_feedback(item, creator.as_ref(), owner.as_ref(), tags, comments)
}

fn ensure_owner_exists(store: &MemoryStore, owner_id: i64) -> Result<()> {
    if !store.user_exists(owner_id) {
        return Err(WalkboardError::InvalidReference(format!(
            "User with owner_id {owner_id} does not exist."
        )));
    }
    Ok(())
}

/// Create a feedback item against a non-archived walk. An archived or absent
/// walk reads as not-found so its existence is never confirmed through a 403.
pub fn create_feedback(
    store: &MemoryStore,
    user: &UserRecord,
    input: FeedbackCreate,
) -> Result<FeedbackView> {
    if store.active_walk(input.walk_id).is_none() {
        return Err(WalkboardError::NotFound(format!(
            "Active walk with ID {} not found.",
            input.walk_id
        )));
    }

    if let Some(owner_id) = input.owner_id {
        ensure_owner_exists(store, owner_id)?;
    }

    // Validates every tag id; a single bad reference rejects the create
    store.tags_by_ids(&input.tags_id)?;

    let item = store.insert_feedback(FeedbackRecord {
        id: 0,
        creation_date: Utc::now(),
        title: input.title,
        description: input.description,
        status: input.status,
        votes: input.votes,
        follow_up_note: input.follow_up_note,
        resolution_note: input.resolution_note,
        walk_id: input.walk_id,
        creator_id: user.id,
        owner_id: input.owner_id,
        tag_ids: input.tags_id,
        is_archived: false,
        is_anonymous: input.is_anonymous,
    });

    info!(
        "Feedback {} created on walk {} by user {}",
        item.id, item.walk_id, user.id
    );
    Ok(view(store, &item))
}

/// Read a feedback item by id. Archived items are not readable: 404, not 403.
pub fn get_feedback(store: &MemoryStore, feedback_id: i64) -> Result<FeedbackView> {
    let item = store.active_feedback(feedback_id).ok_or_else(|| {
        WalkboardError::NotFound(format!("Feedback with ID {feedback_id} not found"))
    })?;
    Ok(view(store, &item))
}

/// Update a feedback item. The owner or an elevated role may update; the
/// creator relation alone is not sufficient. Reference checks run before any
/// field is applied.
pub fn update_feedback(
    store: &MemoryStore,
    user: &UserRecord,
    feedback_id: i64,
    input: FeedbackUpdate,
) -> Result<FeedbackView> {
    let mut item = store
        .feedback(feedback_id)
        .ok_or_else(|| WalkboardError::NotFound("Feedback not found".to_string()))?;

    ensure_mutable(&item)?;

    if !decide(user, Action::Update, Target::Feedback(&item)).is_allowed() {
        return Err(WalkboardError::Forbidden(
            "Not authorized to update this feedback".to_string(),
        ));
    }

    if let Some(owner_id) = input.owner_id {
        ensure_owner_exists(store, owner_id)?;
    }
    if let Some(ref tag_ids) = input.tag_ids {
        store.tags_by_ids(tag_ids)?;
    }

    if let Some(title) = input.title {
        item.title = title;
    }
    if let Some(description) = input.description {
        item.description = description;
    }
    if let Some(status) = input.status {
        item.status = status;
    }
    if let Some(owner_id) = input.owner_id {
        item.owner_id = Some(owner_id);
    }
    if let Some(follow_up_note) = input.follow_up_note {
        item.follow_up_note = Some(follow_up_note);
    }
    if let Some(resolution_note) = input.resolution_note {
        item.resolution_note = Some(resolution_note);
    }
    if let Some(tag_ids) = input.tag_ids {
        item.tag_ids = tag_ids;
    }

    store.save_feedback(item.clone());
    Ok(view(store, &item))
}

/// Archive a feedback item, freezing it and its comments. Authorization runs
/// before the idempotence short-circuit.
pub fn archive_feedback(
    store: &MemoryStore,
    user: &UserRecord,
    feedback_id: i64,
) -> Result<StatusResponse> {
    let mut item = store
        .feedback(feedback_id)
        .ok_or_else(|| WalkboardError::NotFound("Feedback not found".to_string()))?;

    if !decide(user, Action::Archive, Target::Feedback(&item)).is_allowed() {
        return Err(WalkboardError::Forbidden(
            "Not authorized to archive this feedback".to_string(),
        ));
    }

    let outcome = archive(&mut item);
    let message = outcome.message(item.kind());
    if outcome == ArchiveOutcome::Archived {
        store.save_feedback(item.clone());
        info!("Feedback {} archived by user {}", item.id, user.id);
    }

    Ok(StatusResponse::success(message))
}
