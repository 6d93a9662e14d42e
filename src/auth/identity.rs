//! Identity resolver
//!
//! Turns a bearer credential into a user record. Credential faults are
//! resolved before any entity is looked up, and a disabled account is
//! rejected with the distinct inactive fault rather than an authorization
//! denial.

use tracing::warn;

use crate::auth::jwt::{extract_token_from_header, JwtValidator};
use crate::store::schemas::UserRecord;
use crate::store::MemoryStore;
use crate::types::{Result, WalkboardError};

const CREDENTIALS_ERROR: &str = "Could not validate credentials";

/// Resolves bearer credentials against the user store
#[derive(Clone)]
pub struct IdentityResolver {
    jwt: JwtValidator,
}

impl IdentityResolver {
    /// Build a resolver from an explicitly constructed validator
    pub fn new(jwt: JwtValidator) -> Self {
        Self { jwt }
    }

    /// The validator, for routes that mint tokens
    pub fn jwt(&self) -> &JwtValidator {
        &self.jwt
    }

    /// Resolve the principal behind an Authorization header.
    ///
    /// Fails with `Unauthenticated` on a missing/invalid/expired token or an
    /// unknown user. Does not gate on the disabled flag.
    pub fn resolve(&self, store: &MemoryStore, auth_header: Option<&str>) -> Result<UserRecord> {
        let token = extract_token_from_header(auth_header)
            .ok_or_else(|| WalkboardError::Unauthenticated("Not authenticated".to_string()))?;

        let result = self.jwt.verify_token(token);
        if !result.valid {
            warn!(
                "Token validation failed: {}",
                result.error.as_deref().unwrap_or("unknown")
            );
            return Err(WalkboardError::Unauthenticated(CREDENTIALS_ERROR.to_string()));
        }

        let claims = result
            .claims
            .ok_or_else(|| WalkboardError::Unauthenticated(CREDENTIALS_ERROR.to_string()))?;

        store
            .user_by_username(&claims.sub)
            .ok_or_else(|| WalkboardError::Unauthenticated(CREDENTIALS_ERROR.to_string()))
    }

    /// Resolve the principal and reject disabled accounts.
    ///
    /// This is the gate every entity operation goes through; the inactive
    /// fault dominates any authorization or not-found outcome.
    pub fn resolve_active(
        &self,
        store: &MemoryStore,
        auth_header: Option<&str>,
    ) -> Result<UserRecord> {
        let user = self.resolve(store, auth_header)?;
        if user.disabled {
            return Err(WalkboardError::InactiveUser);
        }
        Ok(user)
    }
}
