//! User operations: login and relation-scoped listings

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{verify_password, JwtValidator};
use crate::policy::visibility::{FeedbackView, UserView, WalkView};
use crate::services::{feedback, walks};
use crate::store::schemas::UserRecord;
use crate::store::MemoryStore;
use crate::types::{Result, WalkboardError};

/// Login form (OAuth2 password flow shape, form-encoded)
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Bearer token response
#[derive(Debug, Serialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Authenticate a username/password pair and mint a token.
///
/// Unknown users and wrong passwords produce the same fault so the response
/// never distinguishes which half failed.
pub fn login(store: &MemoryStore, jwt: &JwtValidator, form: &LoginForm) -> Result<Token> {
    let invalid = || WalkboardError::Unauthenticated("Incorrect username or password".to_string());

    let user = store.user_by_username(&form.username).ok_or_else(invalid)?;

    if !verify_password(&form.password, &user.hashed_password)? {
        warn!("Failed login attempt for {}", form.username);
        return Err(invalid());
    }

    let (access_token, _) = jwt.generate_token(&user.username)?;
    info!("User {} logged in", user.username);

    Ok(Token {
        access_token,
        token_type: "bearer",
    })
}

/// The caller's own account
pub fn current_user(user: &UserRecord) -> UserView {
    UserView::from(user)
}

/// Walks the caller created or owns, most recent walk_date first
pub fn my_walks(store: &MemoryStore, user: &UserRecord) -> Vec<WalkView> {
    store
        .walks_for_user(user.id)
        .iter()
        .map(|w| walks::view(store, w))
        .collect()
}

/// Non-archived feedback the caller created or owns, newest first
pub fn my_feedback(store: &MemoryStore, user: &UserRecord) -> Vec<FeedbackView> {
    store
        .feedback_for_user(user.id)
        .iter()
        .map(|f| feedback::view(store, f))
        .collect()
}
