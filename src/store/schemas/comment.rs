//! Comment record schema

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment threaded on a feedback item.
///
/// Comments carry no archive flag of their own; they inherit the frozen state
/// of their parent feedback, resolved through the store at decision time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: i64,
    pub creation_date: DateTime<Utc>,
    /// Set on every edit, None until the first one
    pub updated_at: Option<DateTime<Utc>>,
    pub text: String,
    /// Immutable; must reference existing, non-archived feedback at creation
    pub feedback_id: i64,
    /// Immutable; comments are always attributable
    pub author_id: i64,
}
