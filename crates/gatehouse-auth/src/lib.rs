//! # Gatehouse Authentication Core
//!
//! Credential verification, bearer token issuance and token-gated request
//! authorization.
//!
//! This crate provides:
//! - **Password Hasher**: Argon2id digests in self-describing PHC format
//! - **Token Issuer / Verifier**: HS256-signed, time-limited bearer tokens
//! - **Access Guard**: `Authorization: Bearer` extraction and verification
//! - **Authentication Service**: the login flow over a pluggable credential store
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gatehouse_auth::{
//!     AccessGuard, AuthConfig, AuthService, CredentialStore, PasswordHasher, TokenIssuer,
//!     TokenVerifier, DEFAULT_TOKEN_TTL,
//! };
//!
//! # async fn example(store: Arc<dyn CredentialStore>) -> gatehouse_auth::Result<()> {
//! let config = AuthConfig::new(Some("a-long-random-signing-secret-value"), DEFAULT_TOKEN_TTL)?;
//! let service = AuthService::new(store, PasswordHasher::new()?, TokenIssuer::new(&config))?;
//! let guard = AccessGuard::new(TokenVerifier::new(&config));
//!
//! service.register("alice@example.com", "correct horse").await?;
//!
//! if let Some(token) = service.login("alice@example.com", "correct horse").await?.token() {
//!     let principal = guard.authorize(Some(&format!("Bearer {}", token)))?;
//!     println!("authenticated as {}", principal.subject);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod guard;
pub mod password;
pub mod service;
pub mod store;
pub mod token;

pub use config::{AuthConfig, DEFAULT_TOKEN_TTL, RECOMMENDED_SECRET_LEN};
pub use error::{AuthError, Result};
pub use guard::{extract_bearer, AccessGuard, Principal};
pub use password::{PasswordHasher, HASH_MEMORY_COST_KIB, HASH_PARALLELISM, HASH_TIME_COST};
pub use service::{AuthResult, AuthService, RejectReason};
pub use store::{Credential, CredentialStore};
pub use token::{unix_now, Claims, TokenIssuer, TokenVerifier, TOKEN_ALGORITHM};
