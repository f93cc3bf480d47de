//! User profile types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::UserId;

/// Unique identifier for a profile.
pub type ProfileId = Uuid;

/// Maximum length of a profile name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of a profile biography.
pub const MAX_BIO_LENGTH: usize = 1000;

/// Personal details attached to a user. At most one per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique profile ID.
    pub id: ProfileId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Gender, free text.
    pub gender: String,
    /// Short biography.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProfile {
    /// Display name.
    pub name: String,
    /// Gender.
    pub gender: String,
    /// Short biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Date of birth (`YYYY-MM-DD`).
    pub date_of_birth: NaiveDate,
}

/// Partial profile update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileChanges {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New gender.
    #[serde(default)]
    pub gender: Option<String>,
    /// New biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// New avatar URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// New date of birth.
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

impl Profile {
    /// Create a profile for `user_id`.
    pub fn new(user_id: UserId, fields: NewProfile) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            user_id,
            name: fields.name,
            gender: fields.gender,
            bio: fields.bio,
            avatar_url: fields.avatar_url,
            date_of_birth: fields.date_of_birth,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update and bump `updated_at`.
    pub fn apply(&mut self, changes: ProfileChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(gender) = changes.gender {
            self.gender = gender;
        }
        if let Some(bio) = changes.bio {
            self.bio = Some(bio);
        }
        if let Some(avatar_url) = changes.avatar_url {
            self.avatar_url = Some(avatar_url);
        }
        if let Some(date_of_birth) = changes.date_of_birth {
            self.date_of_birth = date_of_birth;
        }
        self.updated_at = Utc::now();
    }

    /// Validate profile fields.
    pub fn validate(&self) -> Result<(), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("name cannot be empty".to_string());
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(format!("name must be {} characters or less", MAX_NAME_LENGTH));
        }
        if self.gender.trim().is_empty() {
            return Err("gender cannot be empty".to_string());
        }
        if let Some(bio) = &self.bio {
            if bio.chars().count() > MAX_BIO_LENGTH {
                return Err(format!("bio must be {} characters or less", MAX_BIO_LENGTH));
            }
        }
        if self.date_of_birth > Utc::now().date_naive() {
            return Err("date_of_birth cannot be in the future".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> NewProfile {
        NewProfile {
            name: "Alice".to_string(),
            gender: "female".to_string(),
            bio: None,
            avatar_url: None,
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        }
    }

    #[test]
    fn test_create_profile() {
        let user_id = Uuid::new_v4();
        let profile = Profile::new(user_id, fields());

        assert_eq!(profile.user_id, user_id);
        assert_eq!(profile.name, "Alice");
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let mut profile = Profile::new(Uuid::new_v4(), fields());
        profile.apply(ProfileChanges {
            bio: Some("Rustacean".to_string()),
            ..Default::default()
        });

        assert_eq!(profile.name, "Alice");
        assert_eq!(profile.gender, "female");
        assert_eq!(profile.bio.as_deref(), Some("Rustacean"));
        assert_eq!(
            profile.date_of_birth,
            NaiveDate::from_ymd_opt(1990, 5, 17).unwrap()
        );
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let mut profile = Profile::new(Uuid::new_v4(), fields());
        profile.name = "  ".to_string();
        assert!(profile.validate().is_err());

        let mut profile = Profile::new(Uuid::new_v4(), fields());
        profile.bio = Some("x".repeat(MAX_BIO_LENGTH + 1));
        assert!(profile.validate().is_err());

        let mut profile = Profile::new(Uuid::new_v4(), fields());
        profile.date_of_birth = NaiveDate::from_ymd_opt(9999, 1, 1).unwrap();
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_date_of_birth_serialization() {
        let profile = Profile::new(Uuid::new_v4(), fields());
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["date_of_birth"], "1990-05-17");
        assert!(json.get("bio").is_none());
    }
}
