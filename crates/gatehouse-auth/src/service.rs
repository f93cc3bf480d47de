//! Login and registration orchestration.

use std::sync::Arc;

use crate::error::{AuthError, Result};
use crate::password::PasswordHasher;
use crate::store::{Credential, CredentialStore};
use crate::token::TokenIssuer;

/// Password hashed for unknown emails so both rejection paths cost the same.
const TIMING_DUMMY_PASSWORD: &str = "gatehouse-timing-equaliser";

/// Why a login was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Unknown email or wrong password.
    InvalidCredentials,
}

/// Outcome of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    /// Credentials verified; carries the issued bearer token.
    Authenticated(String),
    /// Credentials rejected.
    Rejected(RejectReason),
}

impl AuthResult {
    /// Get the token if authenticated.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated(token) => Some(token),
            Self::Rejected(_) => None,
        }
    }
}

/// Orchestrates credential lookup, password verification and token issuance.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    issuer: TokenIssuer,
    dummy_digest: Arc<str>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("hasher", &self.hasher)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Create a service over an injected credential store.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
        issuer: TokenIssuer,
    ) -> Result<Self> {
        let dummy_digest = hasher.hash(TIMING_DUMMY_PASSWORD)?;

        Ok(Self {
            store,
            hasher,
            issuer,
            dummy_digest: Arc::from(dummy_digest),
        })
    }

    /// Attempt a login.
    ///
    /// A token is issued only after password verification has completed and
    /// returned `true`. Store outages and corrupt digests are returned as
    /// errors, never as rejections.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResult> {
        let credential = match self.store.find_by_email(email).await? {
            Some(credential) => credential,
            None => {
                // Burn the same hashing cost as a real check.
                let _ = self.verify_password(password, &self.dummy_digest).await;
                tracing::warn!("Login rejected");
                return Ok(AuthResult::Rejected(RejectReason::InvalidCredentials));
            }
        };

        match self
            .verify_password(password, &credential.password_hash)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!("Login rejected");
                return Ok(AuthResult::Rejected(RejectReason::InvalidCredentials));
            }
            Err(e) => {
                tracing::error!(credential_id = %credential.id, error = %e, "Stored password digest is unusable");
                return Err(e);
            }
        }

        let token = self.issuer.issue(&credential.id)?;
        tracing::info!(
            credential_id = %credential.id,
            ttl_secs = self.issuer.ttl().as_secs(),
            "Login succeeded"
        );

        Ok(AuthResult::Authenticated(token))
    }

    /// Register a new credential, storing only the password digest.
    pub async fn register(&self, email: &str, password: &str) -> Result<Credential> {
        let digest = self.hash_password(password).await?;
        let credential = self.store.create_credential(email, &digest).await?;

        tracing::info!(credential_id = %credential.id, "Credential registered");
        Ok(credential)
    }

    /// Hash a password on a blocking worker thread.
    pub async fn hash_password(&self, password: &str) -> Result<String> {
        let hasher = self.hasher.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("password hashing task failed: {}", e)))?
    }

    /// Verify a password on a blocking worker thread and wait for the verdict.
    async fn verify_password(&self, password: &str, digest: &str) -> Result<bool> {
        let hasher = self.hasher.clone();
        let password = password.to_string();
        let digest = digest.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AuthError::Internal(format!("password verification task failed: {}", e)))?
    }
}
