//! Error types for Walkboard
//!
//! Every fault the service can surface is a variant here. The variants mirror
//! the decision taxonomy the handlers rely on: authentication faults dominate
//! everything, not-found dominates forbidden (so the existence of inaccessible
//! resources is never confirmed), and archived-state conflicts are distinct
//! from authorization denials.

use hyper::StatusCode;
use thiserror::Error;

/// Walkboard error type
#[derive(Debug, Error)]
pub enum WalkboardError {
    /// Missing, invalid, or expired credential; unknown user; bad login
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated but disabled account. Rejected before any entity lookup.
    #[error("Inactive user")]
    InactiveUser,

    /// Role/ownership rule failed on an existing, visible entity
    #[error("{0}")]
    Forbidden(String),

    /// Entity or required parent absent, or filtered out by state
    #[error("{0}")]
    NotFound(String),

    /// Mutation against an archived (frozen) entity
    #[error("{0}")]
    Conflict(String),

    /// A foreign id in the payload does not resolve
    #[error("{0}")]
    InvalidReference(String),

    /// Malformed body or missing required fields
    #[error("{0}")]
    Validation(String),

    /// Hashing, serialization, or other unexpected faults
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WalkboardError {
    /// HTTP status code the transport layer maps this fault to
    pub fn status(&self) -> StatusCode {
        match self {
            WalkboardError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            WalkboardError::InactiveUser => StatusCode::BAD_REQUEST,
            WalkboardError::Forbidden(_) => StatusCode::FORBIDDEN,
            WalkboardError::NotFound(_) => StatusCode::NOT_FOUND,
            WalkboardError::Conflict(_) => StatusCode::CONFLICT,
            WalkboardError::InvalidReference(_) => StatusCode::BAD_REQUEST,
            WalkboardError::Validation(_) => StatusCode::BAD_REQUEST,
            WalkboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable code included in error responses
    pub fn code(&self) -> &'static str {
        match self {
            WalkboardError::Unauthenticated(_) => "UNAUTHENTICATED",
            WalkboardError::InactiveUser => "INACTIVE_USER",
            WalkboardError::Forbidden(_) => "FORBIDDEN",
            WalkboardError::NotFound(_) => "NOT_FOUND",
            WalkboardError::Conflict(_) => "CONFLICT",
            WalkboardError::InvalidReference(_) => "INVALID_REFERENCE",
            WalkboardError::Validation(_) => "VALIDATION",
            WalkboardError::Internal(_) => "INTERNAL",
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, WalkboardError>;
