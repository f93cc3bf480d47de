//! Bearer token extraction and request authorization.
//!
//! This module is independent of the HTTP framework: it turns the raw
//! `Authorization` header value into a [`Principal`] or a typed rejection.

use crate::error::{AuthError, Result};
use crate::token::TokenVerifier;

/// Authenticated caller attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Credential identifier from the token subject.
    pub subject: String,
    /// Token expiry (Unix seconds).
    pub expires_at: u64,
}

/// Extract the token from a `Bearer <token>` header value.
///
/// An absent header, a bare `Bearer`, or any other scheme is reported as
/// `AuthError::MissingToken`.
pub fn extract_bearer(header: Option<&str>) -> Result<&str> {
    let header = header.map(str::trim).ok_or(AuthError::MissingToken)?;

    let (scheme, token) = header.split_once(' ').ok_or(AuthError::MissingToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MissingToken);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}

/// Gate in front of protected handlers.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    verifier: TokenVerifier,
}

impl AccessGuard {
    /// Create a guard around a token verifier.
    pub fn new(verifier: TokenVerifier) -> Self {
        Self { verifier }
    }

    /// Authorize a request from its `Authorization` header value.
    ///
    /// Only `MissingToken` or `InvalidToken` are ever returned as errors.
    pub fn authorize(&self, header: Option<&str>) -> Result<Principal> {
        let token = extract_bearer(header)?;
        let claims = self.verifier.verify(token)?;

        Ok(Principal {
            subject: claims.sub,
            expires_at: claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, DEFAULT_TOKEN_TTL};
    use crate::token::{unix_now, TokenIssuer};

    fn setup() -> (TokenIssuer, AccessGuard) {
        let config =
            AuthConfig::new(Some("guard-test-signing-secret-0123456789"), DEFAULT_TOKEN_TTL).unwrap();
        (
            TokenIssuer::new(&config),
            AccessGuard::new(TokenVerifier::new(&config)),
        )
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(extract_bearer(Some("bearer abc")).unwrap(), "abc");
        assert_eq!(extract_bearer(Some("  Bearer   abc  ")).unwrap(), "abc");
    }

    #[test]
    fn test_extract_missing() {
        for header in [None, Some(""), Some("Bearer"), Some("Bearer "), Some("abc")] {
            assert!(
                matches!(extract_bearer(header), Err(AuthError::MissingToken)),
                "header {:?} should be missing",
                header
            );
        }
    }

    #[test]
    fn test_extract_other_scheme() {
        assert!(matches!(
            extract_bearer(Some("Basic dXNlcjpwYXNz")),
            Err(AuthError::MissingToken)
        ));
        assert!(matches!(
            extract_bearer(Some("token abc")),
            Err(AuthError::MissingToken)
        ));
    }

    #[test]
    fn test_authorize_valid() {
        let (issuer, guard) = setup();
        let token = issuer.issue("user-42").unwrap();

        let principal = guard.authorize(Some(&format!("Bearer {}", token))).unwrap();
        assert_eq!(principal.subject, "user-42");
        assert!(principal.expires_at > unix_now());
    }

    #[test]
    fn test_authorize_rejections() {
        let (issuer, guard) = setup();

        assert!(matches!(guard.authorize(None), Err(AuthError::MissingToken)));
        assert!(matches!(
            guard.authorize(Some("Bearer")),
            Err(AuthError::MissingToken)
        ));
        assert!(matches!(
            guard.authorize(Some("Bearer not-a-token")),
            Err(AuthError::InvalidToken)
        ));

        let expired = issuer.issue_at("user-42", unix_now() - 2 * 86_400).unwrap();
        assert!(matches!(
            guard.authorize(Some(&format!("Bearer {}", expired))),
            Err(AuthError::InvalidToken)
        ));
    }
}
