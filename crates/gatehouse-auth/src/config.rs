//! Process-wide authentication settings.

use std::time::Duration;

use crate::error::{AuthError, Result};

/// Default bearer token lifetime: 24 hours.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Secrets shorter than this are accepted but logged as weak.
pub const RECOMMENDED_SECRET_LEN: usize = 32;

/// Validated authentication settings, built once at startup.
#[derive(Clone)]
pub struct AuthConfig {
    secret: Vec<u8>,
    token_ttl: Duration,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl AuthConfig {
    /// Build the settings, rejecting a missing secret or a zero TTL.
    pub fn new(secret: Option<&str>, token_ttl: Duration) -> Result<Self> {
        let secret = secret
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AuthError::Config("signing secret is not set".to_string()))?;

        if token_ttl.is_zero() {
            return Err(AuthError::Config("token TTL must be positive".to_string()));
        }

        if secret.len() < RECOMMENDED_SECRET_LEN {
            tracing::warn!(
                length = secret.len(),
                recommended = RECOMMENDED_SECRET_LEN,
                "Signing secret is shorter than recommended"
            );
        }

        Ok(Self {
            secret: secret.as_bytes().to_vec(),
            token_ttl,
        })
    }

    /// Signing secret bytes.
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Lifetime of issued tokens.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }
}
