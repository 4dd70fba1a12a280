//! Authentication building blocks for the identity service
//!
//! Provides the two cryptographic capabilities the service is built on:
//! - Password hashing and verification (Argon2id, PHC string format)
//! - Access token issuance and verification (JWT, HS256)
//!
//! Both are pure computation over values passed in by the caller. Persistence,
//! HTTP, and policy decisions live in the service crate; this crate never
//! performs I/O.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashingParams, PasswordHasher};
//!
//! let hasher = PasswordHasher::new(HashingParams::default()).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{TokenConfig, TokenIssuer};
//!
//! let issuer = TokenIssuer::new(&TokenConfig {
//!     secret: "secret_key_at_least_32_bytes_long!".to_string(),
//!     issuer: "http://localhost:8080/".to_string(),
//!     audience: vec!["http://localhost:8080/".to_string()],
//!     expiration_secs: 1200,
//! });
//!
//! let issued = issuer.issue("794defc3-109a-4c6f-a7d2-cb976065ea80").unwrap();
//! assert_eq!(issued.token_type, "Bearer");
//! assert_eq!(issued.expires_in, 1200);
//!
//! let claims = issuer.verify(&issued.access_token).unwrap();
//! assert_eq!(claims.sub, "794defc3-109a-4c6f-a7d2-cb976065ea80");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::AccessTokenClaims;
pub use token::IssuedToken;
pub use token::TokenConfig;
pub use token::TokenError;
pub use token::TokenIssuer;
