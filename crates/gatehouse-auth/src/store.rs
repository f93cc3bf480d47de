//! Credential persistence interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A stored login credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Opaque credential identifier; becomes the token subject.
    pub id: String,
    /// Unique email, compared exactly as stored.
    pub email: String,
    /// PHC-format password digest.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Persistence interface consumed by the authentication core.
///
/// Implementations own their connection lifecycle and report outages as
/// `AuthError::StoreUnavailable`.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a credential by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>>;

    /// Persist a new credential. Fails with `AuthError::EmailExists` on a
    /// duplicate email.
    async fn create_credential(&self, email: &str, password_hash: &str) -> Result<Credential>;
}

#[async_trait]
impl<T: CredentialStore + ?Sized> CredentialStore for std::sync::Arc<T> {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>> {
        (**self).find_by_email(email).await
    }

    async fn create_credential(&self, email: &str, password_hash: &str) -> Result<Credential> {
        (**self).create_credential(email, password_hash).await
    }
}
