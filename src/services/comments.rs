//! Comment operations
//!
//! Comments derive their frozen state from the parent feedback, resolved
//! through the store at decision time; the parent's current record is always
//! re-fetched rather than cached on the comment.

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::policy::authorization::{decide, Action, Target};
use crate::policy::lifecycle::ensure_comments_open;
use crate::policy::visibility::{render_comment, CommentView};
use crate::store::schemas::{CommentRecord, UserRecord};
use crate::store::MemoryStore;
use crate::types::{Result, WalkboardError};

/// Payload for creating a comment
#[derive(Debug, Deserialize)]
pub struct CommentCreate {
    pub text: String,
}

/// Payload for editing a comment
#[derive(Debug, Deserialize)]
pub struct CommentUpdate {
    pub text: String,
}

pub(crate) fn view(store: &MemoryStore, comment: &CommentRecord) -> CommentView {
    let author = store.user(comment.author_id);
    render_comment(comment, author.as_ref())
}

/// Comment on a feedback item. An archived or absent parent reads as
/// not-found.
pub fn create_comment(
    store: &MemoryStore,
    user: &UserRecord,
    feedback_id: i64,
    input: CommentCreate,
) -> Result<CommentView> {
    if store.active_feedback(feedback_id).is_none() {
        return Err(WalkboardError::NotFound(format!(
            "Active feedback with ID {feedback_id} not found."
        )));
    }

    let comment = store.insert_comment(CommentRecord {
        id: 0,
        creation_date: Utc::now(),
        updated_at: None,
        text: input.text,
        feedback_id,
        author_id: user.id,
    });

    info!(
        "Comment {} created on feedback {} by user {}",
        comment.id, feedback_id, user.id
    );
    Ok(view(store, &comment))
}

/// Edit a comment. Only the author may edit, and only while the parent
/// feedback is not frozen; the frozen conflict takes precedence over the
/// authorship check.
pub fn update_comment(
    store: &MemoryStore,
    user: &UserRecord,
    comment_id: i64,
    input: CommentUpdate,
) -> Result<CommentView> {
    let mut comment = store
        .comment(comment_id)
        .ok_or_else(|| WalkboardError::NotFound("Comment not found".to_string()))?;

    let parent = store
        .feedback(comment.feedback_id)
        .ok_or_else(|| WalkboardError::NotFound("Feedback not found".to_string()))?;

    ensure_comments_open(&parent)?;

    if !decide(user, Action::Update, Target::Comment(&comment)).is_allowed() {
        return Err(WalkboardError::Forbidden(
            "Not authorized to update this comment".to_string(),
        ));
    }

    comment.text = input.text;
    comment.updated_at = Some(Utc::now());
    store.save_comment(comment.clone());

    Ok(view(store, &comment))
}

/// Delete a comment. The author, or a Developer when the author is malicious
/// or has left the org.
pub fn delete_comment(store: &MemoryStore, user: &UserRecord, comment_id: i64) -> Result<()> {
    let comment = store
        .comment(comment_id)
        .ok_or_else(|| WalkboardError::NotFound("Comment not found".to_string()))?;

    if !decide(user, Action::Delete, Target::Comment(&comment)).is_allowed() {
        return Err(WalkboardError::Forbidden(
            "Not authorized to delete this comment".to_string(),
        ));
    }

    store.delete_comment(comment_id);
    info!("Comment {} deleted by user {}", comment_id, user.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{feedback, walks};
    use crate::store::schemas::{FeedbackStatus, Region, Role, Site, WalkStatus};
    use chrono::Duration;

    fn add_user(store: &MemoryStore, name: &str, role: Role) -> UserRecord {
        store
            .insert_user(UserRecord {
                id: 0,
                username: name.to_string(),
                email: format!("{name}@example.com"),
                full_name: Some(format!("{name} full")),
                hashed_password: "hash".to_string(),
                disabled: false,
                role,
                region: Region::West,
                site: Site::Seattle,
            })
            .unwrap()
    }

    fn add_feedback(store: &MemoryStore, user: &UserRecord) -> i64 {
        let walk = walks::create_walk(
            store,
            user,
            walks::WalkCreate {
                region: Region::West,
                site: Site::Seattle,
                walk_date: Utc::now() + Duration::days(1),
                whiteboard: None,
                status: WalkStatus::Created,
            },
        );
        feedback::create_feedback(
            store,
            user,
            feedback::FeedbackCreate {
                title: "Noise on line 2".to_string(),
                description: "Bearing squeal near the packer".to_string(),
                status: FeedbackStatus::Created,
                votes: 0,
                follow_up_note: None,
                resolution_note: None,
                walk_id: walk.id,
                owner_id: Some(user.id),
                is_anonymous: false,
                tags_id: vec![],
            },
        )
        .unwrap()
        .id
    }

    #[test]
    fn test_create_comment_attributes_author() {
        let store = MemoryStore::new();
        let user = add_user(&store, "alice", Role::User);
        let feedback_id = add_feedback(&store, &user);

        let comment = create_comment(
            &store,
            &user,
            feedback_id,
            CommentCreate {
                text: "Confirmed on second shift".to_string(),
            },
        )
        .unwrap();

        assert_eq!(comment.author_id, user.id);
        assert_eq!(comment.author_name, "alice full");
        assert_eq!(comment.feedback_id, feedback_id);
        assert!(comment.updated_at.is_none());
    }

    #[test]
    fn test_create_comment_on_archived_feedback_not_found() {
        let store = MemoryStore::new();
        let user = add_user(&store, "alice", Role::User);
        let feedback_id = add_feedback(&store, &user);
        feedback::archive_feedback(&store, &user, feedback_id).unwrap();

        let err = create_comment(
            &store,
            &user,
            feedback_id,
            CommentCreate {
                text: "too late".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, WalkboardError::NotFound(_)));
    }

    #[test]
    fn test_update_comment_by_author_sets_updated_at() {
        let store = MemoryStore::new();
        let user = add_user(&store, "alice", Role::User);
        let feedback_id = add_feedback(&store, &user);
        let comment = create_comment(
            &store,
            &user,
            feedback_id,
            CommentCreate {
                text: "first draft".to_string(),
            },
        )
        .unwrap();

        let updated = update_comment(
            &store,
            &user,
            comment.id,
            CommentUpdate {
                text: "second draft".to_string(),
            },
        )
        .unwrap();
        assert_eq!(updated.text, "second draft");
        assert!(updated.updated_at.is_some());
    }

    #[test]
    fn test_update_comment_non_author_forbidden() {
        let store = MemoryStore::new();
        let author = add_user(&store, "alice", Role::User);
        let other = add_user(&store, "bob", Role::User);
        let feedback_id = add_feedback(&store, &author);
        let comment = create_comment(
            &store,
            &author,
            feedback_id,
            CommentCreate {
                text: "mine".to_string(),
            },
        )
        .unwrap();

        let err = update_comment(
            &store,
            &other,
            comment.id,
            CommentUpdate {
                text: "theirs".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, WalkboardError::Forbidden(_)));
    }

    #[test]
    fn test_author_edit_after_parent_archived_is_conflict_not_forbidden() {
        let store = MemoryStore::new();
        let author = add_user(&store, "alice", Role::User);
        let feedback_id = add_feedback(&store, &author);
        let comment = create_comment(
            &store,
            &author,
            feedback_id,
            CommentCreate {
                text: "before freeze".to_string(),
            },
        )
        .unwrap();

        feedback::archive_feedback(&store, &author, feedback_id).unwrap();

        // The rightful author is rejected with the archived conflict
        let err = update_comment(
            &store,
            &author,
            comment.id,
            CommentUpdate {
                text: "after freeze".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, WalkboardError::Conflict(_)));

        // A non-author gets the same conflict: the frozen state dominates
        let other = add_user(&store, "bob", Role::User);
        let err = update_comment(
            &store,
            &other,
            comment.id,
            CommentUpdate {
                text: "x".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, WalkboardError::Conflict(_)));
    }

    #[test]
    fn test_delete_comment_author_or_developer() {
        let store = MemoryStore::new();
        let author = add_user(&store, "alice", Role::User);
        let other = add_user(&store, "bob", Role::Manager);
        let admin = add_user(&store, "dev", Role::Developer);
        let feedback_id = add_feedback(&store, &author);

        let c1 = create_comment(&store, &author, feedback_id, CommentCreate { text: "a".into() })
            .unwrap();
        let c2 = create_comment(&store, &author, feedback_id, CommentCreate { text: "b".into() })
            .unwrap();

        // A manager is neither author nor Developer
        let err = delete_comment(&store, &other, c1.id).unwrap_err();
        assert!(matches!(err, WalkboardError::Forbidden(_)));

        delete_comment(&store, &author, c1.id).unwrap();
        delete_comment(&store, &admin, c2.id).unwrap();
        assert!(store.comment(c1.id).is_none());
        assert!(store.comment(c2.id).is_none());
    }

    #[test]
    fn test_delete_missing_comment_not_found() {
        let store = MemoryStore::new();
        let user = add_user(&store, "alice", Role::User);

        let err = delete_comment(&store, &user, 99999).unwrap_err();
        assert!(matches!(err, WalkboardError::NotFound(_)));
    }
}
