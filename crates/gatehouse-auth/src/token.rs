//! Signed bearer tokens.
//!
//! Tokens are JWTs in compact form, signed with HS256. They are stateless: a
//! token is valid exactly when its signature checks out under the process
//! secret and the current time is before `exp`.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};

/// The only signing algorithm accepted.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Credential identifier the token was issued to.
    pub sub: String,
    /// Issue time (Unix seconds).
    pub iat: u64,
    /// Expiry time (Unix seconds).
    pub exp: u64,
    /// Unique token ID.
    pub jti: String,
}

impl Claims {
    /// Check if the claims are expired at `now`.
    pub fn is_expired_at(&self, now: u64) -> bool {
        now >= self.exp
    }
}

/// Mints signed, time-limited tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").field("ttl", &self.ttl).finish()
    }
}

impl TokenIssuer {
    /// Create an issuer from validated settings.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            key: EncodingKey::from_secret(config.secret()),
            ttl: config.token_ttl(),
        }
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject`, valid from now for the configured TTL.
    pub fn issue(&self, subject: &str) -> Result<String> {
        self.issue_at(subject, unix_now())
    }

    /// Issue a token as if the current time were `issued_at`.
    pub fn issue_at(&self, subject: &str, issued_at: u64) -> Result<String> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.ttl.as_secs()),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        jsonwebtoken::encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.key)
            .map_err(|e| AuthError::Internal(format!("token signing failed: {}", e)))
    }
}

/// Checks token integrity and expiry.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier").finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// Create a verifier from validated settings.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.leeway = 0;
        // Expiry is checked against a caller-supplied clock in `verify_at`.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            key: DecodingKey::from_secret(config.secret()),
            validation,
        }
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.verify_at(token, unix_now())
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// Every failure is reported as `AuthError::InvalidToken`.
    pub fn verify_at(&self, token: &str, now: u64) -> Result<Claims> {
        let claims = jsonwebtoken::decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| {
                tracing::debug!(reason = %e, "Token rejected");
                AuthError::InvalidToken
            })?
            .claims;

        if claims.iat > claims.exp || claims.is_expired_at(now) {
            tracing::debug!(exp = claims.exp, now, "Token rejected: expired");
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}

/// Current Unix time in seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::config::DEFAULT_TOKEN_TTL;
    use proptest::prelude::*;

    proptest! {
        /// Property: issued tokens verify and carry their subject
        #[test]
        fn prop_issue_verify(subject in "[a-zA-Z0-9-]{1,64}") {
            let config = AuthConfig::new(Some("proptest-signing-secret-0123456789"), DEFAULT_TOKEN_TTL).unwrap();
            let token = TokenIssuer::new(&config).issue(&subject).unwrap();
            let claims = TokenVerifier::new(&config).verify(&token).unwrap();
            prop_assert_eq!(claims.sub, subject);
        }

        /// Property: arbitrary strings never verify
        #[test]
        fn prop_garbage_rejected(s in ".*") {
            let config = AuthConfig::new(Some("proptest-signing-secret-0123456789"), DEFAULT_TOKEN_TTL).unwrap();
            prop_assert!(TokenVerifier::new(&config).verify(&s).is_err());
        }
    }
}
