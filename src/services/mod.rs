//! Service layer
//!
//! One module per resource. Every operation follows the same sequence:
//! fetch a snapshot, run the lifecycle guard and the authorization table,
//! validate payload references, mutate, persist, render. Fault precedence is
//! enforced here: not-found before forbidden, archived-conflict before
//! ownership on updates, authorization before the idempotent archive
//! short-circuit.

pub mod comments;
pub mod feedback;
pub mod users;
pub mod walks;

use serde::Serialize;

/// Body returned by archive endpoints
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: String) -> Self {
        Self {
            status: "success",
            message,
        }
    }
}
