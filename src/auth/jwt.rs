//! JWT token generation and validation
//!
//! HS256 bearer tokens carrying the username in `sub`. The validator is an
//! explicitly constructed value (secret + expiry in, from configuration), so
//! nothing here reads ambient process state.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::types::{Result, WalkboardError};

/// Claims carried in every token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the authenticated user
    pub sub: String,
    /// Expiry (unix seconds)
    pub exp: u64,
    /// Issued at (unix seconds)
    pub iat: u64,
}

/// Result of token verification
#[derive(Debug)]
pub struct TokenValidationResult {
    pub valid: bool,
    pub claims: Option<Claims>,
    pub error: Option<String>,
}

/// Mints and verifies HS256 tokens
#[derive(Clone)]
pub struct JwtValidator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_seconds: u64,
}

impl JwtValidator {
    /// Create a validator from a shared secret
    pub fn new(secret: &str, expiry_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_seconds,
        }
    }

    /// Dev-mode validator with the insecure default secret
    pub fn new_dev() -> Self {
        Self::new("dev-only-insecure-secret", 3600)
    }

    /// Generate a token for a username. Returns the token and its expiry
    /// timestamp (unix seconds).
    pub fn generate_token(&self, username: &str) -> Result<(String, u64)> {
        let now = Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: username.to_string(),
            exp: now + self.expiry_seconds,
            iat: now,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| WalkboardError::Internal(format!("Failed to sign token: {e}")))?;

        Ok((token, claims.exp))
    }

    /// Verify a token's signature and expiry
    pub fn verify_token(&self, token: &str) -> TokenValidationResult {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => TokenValidationResult {
                valid: true,
                claims: Some(data.claims),
                error: None,
            },
            Err(e) => TokenValidationResult {
                valid: false,
                claims: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Extract a bearer token from an Authorization header value
pub fn extract_token_from_header(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, Header};

    #[test]
    fn test_generate_and_verify_roundtrip() {
        let jwt = JwtValidator::new("test-secret", 3600);
        let (token, expires_at) = jwt.generate_token("jdoe").unwrap();

        let result = jwt.verify_token(&token);
        assert!(result.valid);
        let claims = result.claims.unwrap();
        assert_eq!(claims.sub, "jdoe");
        assert_eq!(claims.exp, expires_at);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let jwt = JwtValidator::new("test-secret", 3600);
        let (token, _) = jwt.generate_token("jdoe").unwrap();

        let other = JwtValidator::new("different-secret", 3600);
        let result = other.verify_token(&token);
        assert!(!result.valid);
        assert!(result.claims.is_none());
        assert!(result.error.is_some());
    }

    #[test]
    fn test_expired_token_rejected() {
        let jwt = JwtValidator::new("test-secret", 3600);

        let now = Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: "jdoe".to_string(),
            exp: now - 10,
            iat: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let result = jwt.verify_token(&token);
        assert!(!result.valid);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let jwt = JwtValidator::new("test-secret", 3600);
        assert!(!jwt.verify_token("not-a-token").valid);
        assert!(!jwt.verify_token("").valid);
    }

    #[test]
    fn test_extract_token_from_header() {
        assert_eq!(
            extract_token_from_header(Some("Bearer abc.def.ghi")),
            Some("abc.def.ghi")
        );
        assert_eq!(extract_token_from_header(Some("Basic abc")), None);
        assert_eq!(extract_token_from_header(Some("Bearer ")), None);
        assert_eq!(extract_token_from_header(None), None);
    }
}
