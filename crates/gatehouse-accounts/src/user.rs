//! User account types.

use chrono::{DateTime, Utc};
use gatehouse_auth::Credential;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::Profile;

/// Unique identifier for a user.
pub type UserId = Uuid;

/// Maximum accepted email length.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email, unique and case-sensitive as stored.
    pub email: String,
    /// PHC-format password digest. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the user was last modified.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user.
    pub fn new(email: String, password_hash: String) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate an email for storage.
    ///
    /// Format checks happen at the API boundary; this only guards the
    /// invariants the store relies on.
    pub fn validate_email(email: &str) -> Result<(), String> {
        if email.is_empty() {
            return Err("email cannot be empty".to_string());
        }

        if email.len() > MAX_EMAIL_LENGTH {
            return Err(format!("email must be {} characters or less", MAX_EMAIL_LENGTH));
        }

        if email.chars().any(char::is_whitespace) {
            return Err("email cannot contain whitespace".to_string());
        }

        Ok(())
    }

    /// Update the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Credential view used by the authentication core.
    pub fn to_credential(&self) -> Credential {
        Credential {
            id: self.id.to_string(),
            email: self.email.clone(),
            password_hash: self.password_hash.clone(),
        }
    }

    /// Convert to an API response, embedding the profile if any.
    pub fn to_response(&self, profile: Option<Profile>) -> UserResponse {
        UserResponse {
            id: self.id,
            email: self.email.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            profile,
        }
    }
}

/// User representation returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,
    /// Email address.
    pub email: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Attached profile.
    pub profile: Option<Profile>,
}

/// Changes to apply to a user. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    /// New email.
    pub email: Option<String>,
    /// New password digest (already hashed).
    pub password_hash: Option<String>,
}

impl UserChanges {
    /// Check whether any field would change.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password_hash.is_none()
    }
}
