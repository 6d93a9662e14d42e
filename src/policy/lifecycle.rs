//! Lifecycle engine
//!
//! Walks and feedback move one way: active to archived. There is no
//! transition back. Archiving freezes the entity against further mutation;
//! for feedback it also freezes every comment underneath, a state comments
//! inherit through their parent rather than carry themselves.

use crate::store::schemas::{FeedbackRecord, WalkRecord};
use crate::types::{Result, WalkboardError};

/// Entities with a one-way archive flag
pub trait Archivable {
    fn is_archived(&self) -> bool;
    fn set_archived(&mut self);
    /// Noun used in fault and status messages
    fn kind(&self) -> &'static str;
}

impl Archivable for WalkRecord {
    fn is_archived(&self) -> bool {
        self.is_archived
    }
    fn set_archived(&mut self) {
        self.is_archived = true;
    }
    fn kind(&self) -> &'static str {
        "walk"
    }
}

impl Archivable for FeedbackRecord {
    fn is_archived(&self) -> bool {
        self.is_archived
    }
    fn set_archived(&mut self) {
        self.is_archived = true;
    }
    fn kind(&self) -> &'static str {
        "feedback"
    }
}

/// Result of an archive call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// The flag was set by this call
    Archived,
    /// The entity was already archived; nothing was written
    AlreadyArchived,
}

impl ArchiveOutcome {
    /// Status message distinguishing a fresh archive from an idempotent one.
    /// Both are success to the caller.
    pub fn message(&self, kind: &str) -> String {
        match self {
            ArchiveOutcome::Archived => format!("{} archived successfully", capitalize(kind)),
            ArchiveOutcome::AlreadyArchived => format!("{} already archived", capitalize(kind)),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Archive an entity. Idempotent: archiving an already-archived entity is a
/// no-op reported as `AlreadyArchived`, not an error.
pub fn archive<T: Archivable>(entity: &mut T) -> ArchiveOutcome {
    if entity.is_archived() {
        return ArchiveOutcome::AlreadyArchived;
    }
    entity.set_archived();
    ArchiveOutcome::Archived
}

/// Reject mutation of a frozen entity. Checked independently of, and in
/// addition to, the authorization rule table.
pub fn ensure_mutable<T: Archivable>(entity: &T) -> Result<()> {
    if entity.is_archived() {
        return Err(WalkboardError::Conflict(format!(
            "Cannot modify archived {}.",
            entity.kind()
        )));
    }
    Ok(())
}

/// Reject comment edits under a frozen feedback item. The comment itself has
/// no archive flag; the parent's current state decides.
pub fn ensure_comments_open(parent: &FeedbackRecord) -> Result<()> {
    if parent.is_archived {
        return Err(WalkboardError::Conflict(
            "Cannot modify comments on an archived feedback item".to_string(),
        ));
    }
    Ok(())
}
