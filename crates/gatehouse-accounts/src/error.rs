//! Error types for account storage.

use gatehouse_auth::AuthError;
use thiserror::Error;

/// Result type for account operations.
pub type Result<T> = std::result::Result<T, AccountError>;

/// Errors that can occur in account storage.
#[derive(Debug, Error)]
pub enum AccountError {
    /// User not found.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// Profile not found.
    #[error("profile not found: {0}")]
    ProfileNotFound(String),

    /// Email already registered to another user.
    #[error("email already exists: {0}")]
    EmailExists(String),

    /// User already has a profile.
    #[error("user already has a profile: {0}")]
    ProfileExists(String),

    /// Invalid field value.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The store has been shut down or cannot be reached.
    #[error("account store unavailable: {0}")]
    Unavailable(String),
}

impl AccountError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UserNotFound(_) => 404,
            Self::ProfileNotFound(_) => 404,
            Self::EmailExists(_) => 409,
            Self::ProfileExists(_) => 409,
            Self::InvalidInput(_) => 422,
            Self::Unavailable(_) => 500,
        }
    }

    /// Get the client-facing message.
    pub fn public_message(&self) -> String {
        match self {
            Self::UserNotFound(_) => "User not found".to_string(),
            Self::ProfileNotFound(_) => "Profile not found".to_string(),
            Self::EmailExists(_) => "Email already exists".to_string(),
            Self::ProfileExists(_) => "This user already has a profile".to_string(),
            Self::InvalidInput(reason) => reason.clone(),
            Self::Unavailable(_) => "Internal server error".to_string(),
        }
    }
}

impl From<AccountError> for AuthError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::EmailExists(email) => AuthError::EmailExists(email),
            AccountError::Unavailable(reason) => AuthError::StoreUnavailable(reason),
            AccountError::InvalidInput(reason) => AuthError::InvalidInput(reason),
            other => AuthError::Internal(other.to_string()),
        }
    }
}
