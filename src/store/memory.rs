//! In-memory entity store
//!
//! Concurrent maps keyed by id, one per entity kind, with per-collection id
//! counters. All reads return cloned snapshots so callers never hold a map
//! guard while deciding; writes replace the whole record.

use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::store::schemas::{CommentRecord, FeedbackRecord, TagRecord, UserRecord, WalkRecord};
use crate::types::{Result, WalkboardError};

/// In-memory store for all entity kinds
pub struct MemoryStore {
    users: DashMap<i64, UserRecord>,
    walks: DashMap<i64, WalkRecord>,
    feedback: DashMap<i64, FeedbackRecord>,
    comments: DashMap<i64, CommentRecord>,
    tags: DashMap<i64, TagRecord>,
    next_user_id: AtomicI64,
    next_walk_id: AtomicI64,
    next_feedback_id: AtomicI64,
    next_comment_id: AtomicI64,
    next_tag_id: AtomicI64,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            walks: DashMap::new(),
            feedback: DashMap::new(),
            comments: DashMap::new(),
            tags: DashMap::new(),
            next_user_id: AtomicI64::new(1),
            next_walk_id: AtomicI64::new(1),
            next_feedback_id: AtomicI64::new(1),
            next_comment_id: AtomicI64::new(1),
            next_tag_id: AtomicI64::new(1),
        }
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Insert a user, assigning its id. Username and email must be unique.
    pub fn insert_user(&self, mut user: UserRecord) -> Result<UserRecord> {
        let duplicate = self.users.iter().any(|entry| {
            entry.value().username == user.username || entry.value().email == user.email
        });
        if duplicate {
            return Err(WalkboardError::Validation(format!(
                "User {} already exists",
                user.username
            )));
        }

        user.id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    pub fn user(&self, id: i64) -> Option<UserRecord> {
        self.users.get(&id).map(|u| u.clone())
    }

    pub fn user_by_username(&self, username: &str) -> Option<UserRecord> {
        self.users
            .iter()
            .find(|entry| entry.value().username == username)
            .map(|entry| entry.value().clone())
    }

    pub fn user_exists(&self, id: i64) -> bool {
        self.users.contains_key(&id)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    // =========================================================================
    // Walks
    // =========================================================================

    /// Insert a walk, assigning its id
    pub fn insert_walk(&self, mut walk: WalkRecord) -> WalkRecord {
        walk.id = self.next_walk_id.fetch_add(1, Ordering::SeqCst);
        self.walks.insert(walk.id, walk.clone());
        walk
    }

    pub fn walk(&self, id: i64) -> Option<WalkRecord> {
        self.walks.get(&id).map(|w| w.clone())
    }

    /// Walk lookup that hides archived walks (used where creation against an
    /// archived parent must read as not-found)
    pub fn active_walk(&self, id: i64) -> Option<WalkRecord> {
        self.walks
            .get(&id)
            .filter(|w| !w.is_archived)
            .map(|w| w.clone())
    }

    /// Replace a walk by id
    pub fn save_walk(&self, walk: WalkRecord) {
        self.walks.insert(walk.id, walk);
    }

    /// Delete a walk and cascade to its feedback and their comments.
    /// Returns false if the walk did not exist.
    pub fn delete_walk(&self, id: i64) -> bool {
        if self.walks.remove(&id).is_none() {
            return false;
        }

        let orphaned: Vec<i64> = self
            .feedback
            .iter()
            .filter(|entry| entry.value().walk_id == id)
            .map(|entry| *entry.key())
            .collect();
        for feedback_id in orphaned {
            self.feedback.remove(&feedback_id);
            self.comments
                .retain(|_, comment| comment.feedback_id != feedback_id);
        }

        true
    }

    /// Walks created or owned by the user, most recent walk_date first
    pub fn walks_for_user(&self, user_id: i64) -> Vec<WalkRecord> {
        let mut walks: Vec<WalkRecord> = self
            .walks
            .iter()
            .filter(|entry| {
                let w = entry.value();
                w.creator_id == user_id || w.owner_id == user_id
            })
            .map(|entry| entry.value().clone())
            .collect();
        walks.sort_by(|a, b| b.walk_date.cmp(&a.walk_date));
        walks
    }

    // =========================================================================
    // Feedback
    // =========================================================================

    /// Insert a feedback item, assigning its id
    pub fn insert_feedback(&self, mut item: FeedbackRecord) -> FeedbackRecord {
        item.id = self.next_feedback_id.fetch_add(1, Ordering::SeqCst);
        self.feedback.insert(item.id, item.clone());
        item
    }

    pub fn feedback(&self, id: i64) -> Option<FeedbackRecord> {
        self.feedback.get(&id).map(|f| f.clone())
    }

    /// Feedback lookup that hides archived items (archived feedback is not
    /// readable by id)
    pub fn active_feedback(&self, id: i64) -> Option<FeedbackRecord> {
        self.feedback
            .get(&id)
            .filter(|f| !f.is_archived)
            .map(|f| f.clone())
    }

    /// Replace a feedback item by id
    pub fn save_feedback(&self, item: FeedbackRecord) {
        self.feedback.insert(item.id, item);
    }

    /// Non-archived feedback created or owned by the user, newest first
    pub fn feedback_for_user(&self, user_id: i64) -> Vec<FeedbackRecord> {
        let mut items: Vec<FeedbackRecord> = self
            .feedback
            .iter()
            .filter(|entry| {
                let f = entry.value();
                !f.is_archived && (f.creator_id == user_id || f.owner_id == Some(user_id))
            })
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by(|a, b| b.creation_date.cmp(&a.creation_date));
        items
    }

    /// Non-archived feedback attached to a walk, oldest first
    pub fn active_feedback_for_walk(&self, walk_id: i64) -> Vec<FeedbackRecord> {
        let mut items: Vec<FeedbackRecord> = self
            .feedback
            .iter()
            .filter(|entry| {
                let f = entry.value();
                f.walk_id == walk_id && !f.is_archived
            })
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by(|a, b| a.creation_date.cmp(&b.creation_date));
        items
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// Insert a comment, assigning its id
    pub fn insert_comment(&self, mut comment: CommentRecord) -> CommentRecord {
        comment.id = self.next_comment_id.fetch_add(1, Ordering::SeqCst);
        self.comments.insert(comment.id, comment.clone());
        comment
    }

    pub fn comment(&self, id: i64) -> Option<CommentRecord> {
        self.comments.get(&id).map(|c| c.clone())
    }

    /// Replace a comment by id
    pub fn save_comment(&self, comment: CommentRecord) {
        self.comments.insert(comment.id, comment);
    }

    /// Delete a comment. Returns false if it did not exist.
    pub fn delete_comment(&self, id: i64) -> bool {
        self.comments.remove(&id).is_some()
    }

    /// Comments on a feedback item, oldest first
    pub fn comments_for_feedback(&self, feedback_id: i64) -> Vec<CommentRecord> {
        let mut comments: Vec<CommentRecord> = self
            .comments
            .iter()
            .filter(|entry| entry.value().feedback_id == feedback_id)
            .map(|entry| entry.value().clone())
            .collect();
        comments.sort_by(|a, b| a.creation_date.cmp(&b.creation_date));
        comments
    }

    // =========================================================================
    // Tags
    // =========================================================================

    /// Insert a tag, assigning its id. Tag names are unique.
    pub fn insert_tag(&self, mut tag: TagRecord) -> Result<TagRecord> {
        let duplicate = self
            .tags
            .iter()
            .any(|entry| entry.value().name == tag.name);
        if duplicate {
            return Err(WalkboardError::Validation(format!(
                "Tag '{}' already exists",
                tag.name
            )));
        }

        tag.id = self.next_tag_id.fetch_add(1, Ordering::SeqCst);
        self.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    pub fn tag(&self, id: i64) -> Option<TagRecord> {
        self.tags.get(&id).map(|t| t.clone())
    }

    /// Full tag catalog, ordered by id
    pub fn tags(&self) -> Vec<TagRecord> {
        let mut tags: Vec<TagRecord> = self.tags.iter().map(|t| t.value().clone()).collect();
        tags.sort_by_key(|t| t.id);
        tags
    }

    /// Resolve a list of tag ids, failing on the first id that does not exist
    pub fn tags_by_ids(&self, ids: &[i64]) -> Result<Vec<TagRecord>> {
        ids.iter()
            .map(|id| {
                self.tag(*id).ok_or_else(|| {
                    WalkboardError::InvalidReference(
                        "One or more provided tag IDs are invalid.".to_string(),
                    )
                })
            })
            .collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::schemas::{
        FeedbackStatus, Region, Role, Site, TagType, WalkStatus,
    };
    use chrono::{Duration, Utc};

    fn user(name: &str) -> UserRecord {
        UserRecord {
            id: 0,
            username: name.to_string(),
            email: format!("{name}@example.com"),
            full_name: None,
            hashed_password: "hash".to_string(),
            disabled: false,
            role: Role::User,
            region: Region::East,
            site: Site::NewYork,
        }
    }

    fn walk(creator_id: i64, owner_id: i64, days_out: i64) -> WalkRecord {
        WalkRecord {
            id: 0,
            region: Region::East,
            site: Site::NewYork,
            creation_date: Utc::now(),
            walk_date: Utc::now() + Duration::days(days_out),
            whiteboard: None,
            status: WalkStatus::Created,
            creator_id,
            owner_id,
            is_archived: false,
        }
    }

    fn feedback(walk_id: i64, creator_id: i64, owner_id: Option<i64>) -> FeedbackRecord {
        FeedbackRecord {
            id: 0,
            creation_date: Utc::now(),
            title: "title".to_string(),
            description: "description".to_string(),
            status: FeedbackStatus::Created,
            votes: 0,
            follow_up_note: None,
            resolution_note: None,
            walk_id,
            creator_id,
            owner_id,
            tag_ids: vec![],
            is_archived: false,
            is_anonymous: false,
        }
    }

    #[test]
    fn test_user_uniqueness() {
        let store = MemoryStore::new();
        let created = store.insert_user(user("alice")).unwrap();
        assert_eq!(created.id, 1);

        // Same username is rejected
        assert!(store.insert_user(user("alice")).is_err());
        assert_eq!(store.user_count(), 1);

        assert_eq!(store.user_by_username("alice").unwrap().id, created.id);
        assert!(store.user_by_username("bob").is_none());
    }

    #[test]
    fn test_walks_for_user_covers_both_relations() {
        let store = MemoryStore::new();
        let me = store.insert_user(user("me")).unwrap();
        let other = store.insert_user(user("other")).unwrap();

        let created = store.insert_walk(walk(me.id, other.id, 1));
        let owned = store.insert_walk(walk(other.id, me.id, 2));
        let unrelated = store.insert_walk(walk(other.id, other.id, 3));

        let mine = store.walks_for_user(me.id);
        let ids: Vec<i64> = mine.iter().map(|w| w.id).collect();
        assert_eq!(mine.len(), 2);
        assert!(ids.contains(&created.id));
        assert!(ids.contains(&owned.id));
        assert!(!ids.contains(&unrelated.id));

        // Most recent walk_date first
        assert_eq!(mine[0].id, owned.id);
    }

    #[test]
    fn test_active_lookups_hide_archived() {
        let store = MemoryStore::new();
        let u = store.insert_user(user("u")).unwrap();
        let mut w = store.insert_walk(walk(u.id, u.id, 1));
        let mut f = store.insert_feedback(feedback(w.id, u.id, None));

        assert!(store.active_walk(w.id).is_some());
        assert!(store.active_feedback(f.id).is_some());

        w.is_archived = true;
        store.save_walk(w.clone());
        f.is_archived = true;
        store.save_feedback(f.clone());

        assert!(store.active_walk(w.id).is_none());
        assert!(store.active_feedback(f.id).is_none());
        // Plain lookups still see them
        assert!(store.walk(w.id).is_some());
        assert!(store.feedback(f.id).is_some());
    }

    #[test]
    fn test_feedback_for_user_excludes_archived() {
        let store = MemoryStore::new();
        let u = store.insert_user(user("u")).unwrap();
        let w = store.insert_walk(walk(u.id, u.id, 1));

        let visible = store.insert_feedback(feedback(w.id, u.id, None));
        let mut hidden = store.insert_feedback(feedback(w.id, u.id, None));
        hidden.is_archived = true;
        store.save_feedback(hidden);
        let owned = store.insert_feedback(feedback(w.id, 999, Some(u.id)));

        let items = store.feedback_for_user(u.id);
        let ids: Vec<i64> = items.iter().map(|f| f.id).collect();
        assert_eq!(items.len(), 2);
        assert!(ids.contains(&visible.id));
        assert!(ids.contains(&owned.id));
    }

    #[test]
    fn test_delete_walk_cascades() {
        let store = MemoryStore::new();
        let u = store.insert_user(user("u")).unwrap();
        let w = store.insert_walk(walk(u.id, u.id, 1));
        let f = store.insert_feedback(feedback(w.id, u.id, None));
        let c = store.insert_comment(CommentRecord {
            id: 0,
            creation_date: Utc::now(),
            updated_at: None,
            text: "note".to_string(),
            feedback_id: f.id,
            author_id: u.id,
        });

        assert!(store.delete_walk(w.id));
        assert!(store.walk(w.id).is_none());
        assert!(store.feedback(f.id).is_none());
        assert!(store.comment(c.id).is_none());

        // Second delete reports missing
        assert!(!store.delete_walk(w.id));
    }

    #[test]
    fn test_tags_by_ids_rejects_unknown() {
        let store = MemoryStore::new();
        let safety = store
            .insert_tag(TagRecord {
                id: 0,
                name: "Safety".to_string(),
                tag_type: Some(TagType::SiteSpecific),
            })
            .unwrap();

        let resolved = store.tags_by_ids(&[safety.id]).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "Safety");

        let err = store.tags_by_ids(&[safety.id, 42]).unwrap_err();
        assert!(matches!(err, WalkboardError::InvalidReference(_)));

        // Duplicate names rejected
        assert!(store
            .insert_tag(TagRecord {
                id: 0,
                name: "Safety".to_string(),
                tag_type: None,
            })
            .is_err());
    }

    #[test]
    fn test_comments_ordered_oldest_first() {
        let store = MemoryStore::new();
        let u = store.insert_user(user("u")).unwrap();
        let w = store.insert_walk(walk(u.id, u.id, 1));
        let f = store.insert_feedback(feedback(w.id, u.id, None));

        let base = Utc::now();
        for i in 0..3 {
            store.insert_comment(CommentRecord {
                id: 0,
                creation_date: base + Duration::seconds(i),
                updated_at: None,
                text: format!("comment {i}"),
                feedback_id: f.id,
                author_id: u.id,
            });
        }

        let comments = store.comments_for_feedback(f.id);
        assert_eq!(comments.len(), 3);
        assert_eq!(comments[0].text, "comment 0");
        assert_eq!(comments[2].text, "comment 2");
    }
}
