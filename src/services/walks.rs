//! Walk operations

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use crate::policy::authorization::{decide, Action, Target};
use crate::policy::lifecycle::{archive, ensure_mutable, Archivable, ArchiveOutcome};
use crate::policy::visibility::{render_walk, WalkView};
use crate::services::{feedback, StatusResponse};
use crate::store::schemas::{Region, Site, UserRecord, WalkRecord, WalkStatus};
use crate::store::MemoryStore;
use crate::types::{Result, WalkboardError};

/// Payload for creating a walk
#[derive(Debug, Deserialize)]
pub struct WalkCreate {
    pub region: Region,
    pub site: Site,
    pub walk_date: DateTime<Utc>,
    #[serde(default)]
    pub whiteboard: Option<String>,
    #[serde(default = "default_walk_status")]
    pub status: WalkStatus,
}

fn default_walk_status() -> WalkStatus {
    WalkStatus::Created
}

/// Payload for updating a walk. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct WalkUpdate {
    pub walk_date: Option<DateTime<Utc>>,
    pub whiteboard: Option<String>,
    pub status: Option<WalkStatus>,
    pub owner_id: Option<i64>,
}

/// Render a walk with its non-archived feedback
pub(crate) fn view(store: &MemoryStore, walk: &WalkRecord) -> WalkView {
    let creator = store.user(walk.creator_id);
    let owner = store.user(walk.owner_id);
    let items = store
        .active_feedback_for_walk(walk.id)
        .iter()
        .map(|f| feedback::view(store, f))
        .collect();
    render_walk(walk, creator.as_ref(), owner.as_ref(), items)
}

/// Create a walk. The caller becomes both creator and owner.
pub fn create_walk(store: &MemoryStore, user: &UserRecord, input: WalkCreate) -> WalkView {
    let walk = store.insert_walk(WalkRecord {
        id: 0,
        region: input.region,
        site: input.site,
        creation_date: Utc::now(),
        walk_date: input.walk_date,
        whiteboard: input.whiteboard,
        status: input.status,
        creator_id: user.id,
        owner_id: user.id,
        is_archived: false,
    });

    info!("Walk {} created by user {}", walk.id, user.id);
    view(store, &walk)
}

/// Read a walk by id. Archived walks remain readable.
pub fn get_walk(store: &MemoryStore, walk_id: i64) -> Result<WalkView> {
    let walk = store
        .walk(walk_id)
        .ok_or_else(|| WalkboardError::NotFound(format!("Walk with ID {walk_id} not found")))?;
    Ok(view(store, &walk))
}

/// Update a walk. Reassigning the owner verifies the new owner exists before
/// any field is applied; a bad reference rejects the whole update.
pub fn update_walk(
    store: &MemoryStore,
    user: &UserRecord,
    walk_id: i64,
    input: WalkUpdate,
) -> Result<WalkView> {
    let mut walk = store
        .walk(walk_id)
        .ok_or_else(|| WalkboardError::NotFound("Walk not found".to_string()))?;

    ensure_mutable(&walk)?;

    if !decide(user, Action::Update, Target::Walk(&walk)).is_allowed() {
        return Err(WalkboardError::Forbidden(
            "Not authorized to update this walk".to_string(),
        ));
    }

    if let Some(new_owner_id) = input.owner_id {
        if !store.user_exists(new_owner_id) {
            return Err(WalkboardError::InvalidReference(format!(
                "User with owner_id {new_owner_id} does not exist."
            )));
        }
    }

    if let Some(walk_date) = input.walk_date {
        walk.walk_date = walk_date;
    }
    if let Some(whiteboard) = input.whiteboard {
        walk.whiteboard = Some(whiteboard);
    }
    if let Some(status) = input.status {
        walk.status = status;
    }
    if let Some(owner_id) = input.owner_id {
        walk.owner_id = owner_id;
    }

    store.save_walk(walk.clone());
    Ok(view(store, &walk))
}

/// Archive a walk. Authorization runs before the idempotence short-circuit;
/// archiving an already-archived walk is success, not an error.
pub fn archive_walk(store: &MemoryStore, user: &UserRecord, walk_id: i64) -> Result<StatusResponse> {
    let mut walk = store
        .walk(walk_id)
        .ok_or_else(|| WalkboardError::NotFound("Walk not found".to_string()))?;

    if !decide(user, Action::Archive, Target::Walk(&walk)).is_allowed() {
        return Err(WalkboardError::Forbidden(
            "Not authorized to archive this walk".to_string(),
        ));
    }

    let outcome = archive(&mut walk);
    let message = outcome.message(walk.kind());
    if outcome == ArchiveOutcome::Archived {
        store.save_walk(walk.clone());
        info!("Walk {} archived by user {}", walk.id, user.id);
    }

    Ok(StatusResponse::success(message))
}

/// Delete a walk and everything under it. Role-agnostic: only the creator or
/// owner may delete, with no administrative override.
pub fn delete_walk(store: &MemoryStore, user: &UserRecord, walk_id: i64) -> Result<()> {
    let walk = store
        .walk(walk_id)
        .ok_or_else(|| WalkboardError::NotFound("Walk not found".to_string()))?;

    if !decide(user, Action::Delete, Target::Walk(&walk)).is_allowed() {
        return Err(WalkboardError::Forbidden(
            "Not authorized to delete this walk".to_string(),
        ));
    }

    store.delete_walk(walk_id);
    info!("Walk {} deleted by user {}", walk_id, user.id);
    Ok(())
}
