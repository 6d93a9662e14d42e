//! Authentication for Walkboard
//!
//! Provides:
//! - JWT token generation and validation
//! - Password hashing with Argon2
//! - Identity resolution from bearer credentials

pub mod identity;
pub mod jwt;
pub mod password;

pub use identity::IdentityResolver;
pub use jwt::{extract_token_from_header, Claims, JwtValidator, TokenValidationResult};
pub use password::{hash_password, verify_password};
