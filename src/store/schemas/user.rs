//! User record schema
//!
//! Stores account credentials alongside the role and location attributes the
//! authorization rules read.

use serde::{Deserialize, Serialize};

use crate::store::schemas::{Region, Site};

/// Closed set of roles a user can hold.
///
/// `Developer` is the administrative role: it carries overrides on most
/// destructive actions. `Manager` and `Executive` are elevated only for
/// feedback resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    User,
    Manager,
    Executive,
    Developer,
}

impl Role {
    /// Whether this role carries the administrative override
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Developer)
    }

    /// Whether this role may resolve feedback it does not own
    pub fn is_elevated(&self) -> bool {
        matches!(self, Role::Manager | Role::Executive | Role::Developer)
    }
}

/// User account record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    /// Argon2 PHC hash, never serialized into responses
    pub hashed_password: String,
    pub disabled: bool,
    pub role: Role,
    pub region: Region,
    pub site: Site,
}
