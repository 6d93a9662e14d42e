//! Authorization rule table
//!
//! One closed rule table deciding, for every (action, entity) pair, whether a
//! principal may proceed. Rules are explicit predicates over role and
//! relation membership (creator / owner / author), never dispatch on role
//! subtypes, so the whole table is auditable in one place.
//!
//! The table is evaluated against the entity state *before* any mutation, and
//! it deliberately decides role/relationship questions only. Whether the
//! target is frozen (archived) is the lifecycle module's concern and is
//! checked independently by callers; whether the target exists at all is the
//! store's.

use crate::store::schemas::{CommentRecord, FeedbackRecord, UserRecord, WalkRecord};

/// Actions gated by the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Archive,
    Delete,
    Comment,
}

/// Snapshot of the entity an action targets
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Walk(&'a WalkRecord),
    Feedback(&'a FeedbackRecord),
    Comment(&'a CommentRecord),
}

/// Why an action was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Principal is neither creator nor owner, and holds no override
    NotCreatorOrOwner,
    /// Principal is not the owner and holds no elevated role
    NotOwnerOrElevated,
    /// Principal is not the author
    NotAuthor,
    /// The (action, entity) pair is not part of the surface
    UnsupportedAction,
}

/// Outcome of a rule-table lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

fn allow_if(ok: bool, reason: DenyReason) -> Decision {
    if ok {
        Decision::Allow
    } else {
        Decision::Deny(reason)
    }
}

/// Whether the principal is named on the walk as creator or owner
pub fn is_walk_party(principal: &UserRecord, walk: &WalkRecord) -> bool {
    walk.creator_id == principal.id || walk.owner_id == principal.id
}

/// Whether the principal is named on the feedback as creator or owner
pub fn is_feedback_party(principal: &UserRecord, feedback: &FeedbackRecord) -> bool {
    feedback.creator_id == principal.id || feedback.owner_id == Some(principal.id)
}

/// Decide whether `principal` may perform `action` on `target`.
///
/// Principals reaching this table are already authenticated and active;
/// disabled accounts are rejected upstream by the identity resolver.
pub fn decide(principal: &UserRecord, action: Action, target: Target<'_>) -> Decision {
    match (action, target) {
        // Any active principal may create walks, read them, and file feedback
        // or comments; parent existence and frozen state are gated elsewhere.
        (Action::Create, Target::Walk(_)) | (Action::Read, Target::Walk(_)) => Decision::Allow,
        (Action::Create, Target::Feedback(_)) | (Action::Read, Target::Feedback(_)) => {
            Decision::Allow
        }
        (Action::Comment, Target::Feedback(_)) => Decision::Allow,

        // Walk mutation: creator, owner, or the Developer override
        (Action::Update, Target::Walk(walk)) | (Action::Archive, Target::Walk(walk)) => allow_if(
            is_walk_party(principal, walk) || principal.role.is_admin(),
            DenyReason::NotCreatorOrOwner,
        ),

        // Walk deletion is role-agnostic: only the people named on the walk
        (Action::Delete, Target::Walk(walk)) => {
            allow_if(is_walk_party(principal, walk), DenyReason::NotCreatorOrOwner)
        }

        // Feedback resolution: the owner, or an elevated role. Creator alone
        // is not sufficient here.
        (Action::Update, Target::Feedback(feedback)) => allow_if(
            feedback.owner_id == Some(principal.id) || principal.role.is_elevated(),
            DenyReason::NotOwnerOrElevated,
        ),

        // Feedback archival: creator, owner, or the Developer override
        (Action::Archive, Target::Feedback(feedback)) => allow_if(
            is_feedback_party(principal, feedback) || principal.role.is_admin(),
            DenyReason::NotCreatorOrOwner,
        ),

        // Comment edits: the author only
        (Action::Update, Target::Comment(comment)) => allow_if(
            comment.author_id == principal.id,
            DenyReason::NotAuthor,
        ),

        // Comment deletion: the author, or the Developer override
        (Action::Delete, Target::Comment(comment)) => allow_if(
            comment.author_id == principal.id || principal.role.is_admin(),
            DenyReason::NotAuthor,
        ),

        // Everything else is off the surface and blocked
        _ => Decision::Deny(DenyReason::UnsupportedAction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::schemas::{
        FeedbackStatus, Region, Role, Site, WalkStatus,
    };
    use chrono::Utc;

    fn user(id: i64, role: Role) -> UserRecord {
        UserRecord {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            full_name: None,
            hashed_password: "hash".to_string(),
            disabled: false,
            role,
            region: Region::East,
            site: Site::NewYork,
        }
    }

    fn walk(creator_id: i64, owner_id: i64) -> WalkRecord {
        WalkRecord {
            id: 1,
            region: Region::East,
            site: Site::NewYork,
            creation_date: Utc::now(),
            walk_date: Utc::now(),
            whiteboard: None,
            status: WalkStatus::Created,
            creator_id,
            owner_id,
            is_archived: false,
        }
    }

    fn feedback(creator_id: i64, owner_id: Option<i64>) -> FeedbackRecord {
        FeedbackRecord {
            id: 1,
            creation_date: Utc::now(),
            title: "title".to_string(),
            description: "description".to_string(),
            status: FeedbackStatus::Created,
            votes: 0,
            follow_up_note: None,
            resolution_note: None,
            walk_id: 1,
            creator_id,
            owner_id,
            tag_ids: vec![],
            is_archived: false,
            is_anonymous: false,
        }
    }

    fn comment(author_id: i64) -> CommentRecord {
        CommentRecord {
            id: 1,
            creation_date: Utc::now(),
            updated_at: None,
            text: "text".to_string(),
            feedback_id: 1,
            author_id,
        }
    }

    #[test]
    fn test_walk_update_creator_owner_or_developer() {
        let w = walk(1, 2);

        assert!(decide(&user(1, Role::User), Action::Update, Target::Walk(&w)).is_allowed());
        assert!(decide(&user(2, Role::User), Action::Update, Target::Walk(&w)).is_allowed());
        assert!(decide(&user(9, Role::Developer), Action::Update, Target::Walk(&w)).is_allowed());

        // An unrelated plain user is denied
        assert_eq!(
            decide(&user(9, Role::User), Action::Update, Target::Walk(&w)),
            Decision::Deny(DenyReason::NotCreatorOrOwner)
        );
        // Manager/Executive carry no walk override
        assert!(!decide(&user(9, Role::Manager), Action::Update, Target::Walk(&w)).is_allowed());
        assert!(!decide(&user(9, Role::Executive), Action::Update, Target::Walk(&w)).is_allowed());
    }

    #[test]
    fn test_walk_delete_has_no_developer_override() {
        let w = walk(1, 2);

        assert!(decide(&user(1, Role::User), Action::Delete, Target::Walk(&w)).is_allowed());
        assert!(decide(&user(2, Role::User), Action::Delete, Target::Walk(&w)).is_allowed());
        assert_eq!(
            decide(&user(9, Role::Developer), Action::Delete, Target::Walk(&w)),
            Decision::Deny(DenyReason::NotCreatorOrOwner)
        );
    }

    #[test]
    fn test_feedback_update_creator_alone_insufficient() {
        let f = feedback(1, Some(2));

        // The creator who is not owner is denied
        assert_eq!(
            decide(&user(1, Role::User), Action::Update, Target::Feedback(&f)),
            Decision::Deny(DenyReason::NotOwnerOrElevated)
        );
        // The owner is allowed
        assert!(decide(&user(2, Role::User), Action::Update, Target::Feedback(&f)).is_allowed());
        // Elevated roles are allowed regardless of relation
        assert!(decide(&user(9, Role::Manager), Action::Update, Target::Feedback(&f)).is_allowed());
        assert!(
            decide(&user(9, Role::Executive), Action::Update, Target::Feedback(&f)).is_allowed()
        );
        assert!(
            decide(&user(9, Role::Developer), Action::Update, Target::Feedback(&f)).is_allowed()
        );
    }

    #[test]
    fn test_feedback_update_unowned_requires_elevated_role() {
        let f = feedback(1, None);

        assert!(!decide(&user(1, Role::User), Action::Update, Target::Feedback(&f)).is_allowed());
        assert!(decide(&user(1, Role::Manager), Action::Update, Target::Feedback(&f)).is_allowed());
    }

    #[test]
    fn test_feedback_archive_creator_owner_or_developer() {
        let f = feedback(1, Some(2));

        assert!(decide(&user(1, Role::User), Action::Archive, Target::Feedback(&f)).is_allowed());
        assert!(decide(&user(2, Role::User), Action::Archive, Target::Feedback(&f)).is_allowed());
        assert!(
            decide(&user(9, Role::Developer), Action::Archive, Target::Feedback(&f)).is_allowed()
        );
        assert!(!decide(&user(9, Role::Manager), Action::Archive, Target::Feedback(&f)).is_allowed());
        assert!(!decide(&user(9, Role::User), Action::Archive, Target::Feedback(&f)).is_allowed());
    }

    #[test]
    fn test_comment_update_author_only() {
        let c = comment(1);

        assert!(decide(&user(1, Role::User), Action::Update, Target::Comment(&c)).is_allowed());
        assert_eq!(
            decide(&user(2, Role::User), Action::Update, Target::Comment(&c)),
            Decision::Deny(DenyReason::NotAuthor)
        );
        // Even a Developer cannot edit someone else's words
        assert!(!decide(&user(2, Role::Developer), Action::Update, Target::Comment(&c)).is_allowed());
    }

    #[test]
    fn test_comment_delete_author_or_developer() {
        let c = comment(1);

        assert!(decide(&user(1, Role::User), Action::Delete, Target::Comment(&c)).is_allowed());
        assert!(decide(&user(2, Role::Developer), Action::Delete, Target::Comment(&c)).is_allowed());
        assert_eq!(
            decide(&user(2, Role::Manager), Action::Delete, Target::Comment(&c)),
            Decision::Deny(DenyReason::NotAuthor)
        );
    }

    #[test]
    fn test_creation_and_reads_open_to_active_principals() {
        let w = walk(1, 1);
        let f = feedback(1, None);
        let stranger = user(9, Role::User);

        assert!(decide(&stranger, Action::Create, Target::Walk(&w)).is_allowed());
        assert!(decide(&stranger, Action::Read, Target::Walk(&w)).is_allowed());
        assert!(decide(&stranger, Action::Create, Target::Feedback(&f)).is_allowed());
        assert!(decide(&stranger, Action::Read, Target::Feedback(&f)).is_allowed());
        assert!(decide(&stranger, Action::Comment, Target::Feedback(&f)).is_allowed());
    }

    #[test]
    fn test_off_surface_pairs_blocked() {
        let w = walk(1, 1);
        let c = comment(1);
        let admin = user(1, Role::Developer);

        assert_eq!(
            decide(&admin, Action::Comment, Target::Walk(&w)),
            Decision::Deny(DenyReason::UnsupportedAction)
        );
        assert_eq!(
            decide(&admin, Action::Archive, Target::Comment(&c)),
            Decision::Deny(DenyReason::UnsupportedAction)
        );
        // Feedback has no delete operation
        let f = feedback(1, Some(1));
        assert_eq!(
            decide(&admin, Action::Delete, Target::Feedback(&f)),
            Decision::Deny(DenyReason::UnsupportedAction)
        );
    }
}
