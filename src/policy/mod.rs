//! Policy core
//!
//! Pure, synchronous decision logic, separated from transport and storage:
//!
//! - **authorization**: who may perform an action, from role and relationship
//! - **lifecycle**: one-way archive transitions and frozen-entity guards
//! - **visibility**: output shaping, anonymity masking, display-name rules
//!
//! Authorization and lifecycle are independent gates. Callers run both: a
//! mutation needs an `Allow` from the rule table *and* a thawed target.

pub mod authorization;
pub mod lifecycle;
pub mod visibility;

pub use authorization::{decide, Action, Decision, DenyReason, Target};
pub use lifecycle::{archive, ensure_comments_open, ensure_mutable, ArchiveOutcome, Archivable};
pub use visibility::{
    display_name, render_comment, render_feedback, render_walk, CommentView, FeedbackView,
    TagView, UserView, WalkView,
};
