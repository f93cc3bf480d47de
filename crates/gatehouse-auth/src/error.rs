//! Error types for the authentication core.

use thiserror::Error;

/// Result type for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur in the authentication core.
///
/// The first three variants are expected authentication outcomes. The rest
/// are infrastructure faults and must stay distinguishable from a rejected
/// login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Always reported identically.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No bearer token was presented.
    #[error("token not provided")]
    MissingToken,

    /// Token is malformed, badly signed or expired.
    #[error("invalid token")]
    InvalidToken,

    /// A stored password digest could not be parsed.
    #[error("malformed password digest: {0}")]
    HashFormat(String),

    /// The credential store could not be reached.
    #[error("credential store unavailable: {0}")]
    StoreUnavailable(String),

    /// A credential with this email is already registered.
    #[error("email already registered: {0}")]
    EmailExists(String),

    /// A caller-supplied value was rejected by the store.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration detected at startup.
    #[error("invalid auth configuration: {0}")]
    Config(String),

    /// Unexpected internal failure (worker panic, hashing backend error).
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidCredentials => 401,
            Self::MissingToken => 401,
            Self::InvalidToken => 401,
            Self::HashFormat(_) => 500,
            Self::StoreUnavailable(_) => 500,
            Self::EmailExists(_) => 409,
            Self::InvalidInput(_) => 422,
            Self::Config(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// Get the client-facing message.
    ///
    /// Infrastructure details are never exposed here; log the `Display`
    /// form instead.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Invalid credentials",
            Self::MissingToken => "Token not provided",
            Self::InvalidToken => "Invalid token",
            Self::HashFormat(_) => "Internal server error",
            Self::StoreUnavailable(_) => "Internal server error",
            Self::EmailExists(_) => "Email already exists",
            Self::InvalidInput(_) => "Invalid input",
            Self::Config(_) => "Internal server error",
            Self::Internal(_) => "Internal server error",
        }
    }

    /// Whether this error is an authentication rejection rather than a fault.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::MissingToken | Self::InvalidToken
        )
    }
}
