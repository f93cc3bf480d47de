//! In-process account storage.

use async_trait::async_trait;
use gatehouse_auth::{Credential, CredentialStore};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{AccountError, Result};
use crate::profile::{NewProfile, Profile, ProfileChanges, ProfileId};
use crate::user::{User, UserChanges, UserId};

#[derive(Debug, Default)]
struct Tables {
    /// Users by ID.
    users: HashMap<UserId, User>,
    /// Email to user ID index.
    email_index: HashMap<String, UserId>,
    /// Profiles by ID.
    profiles: HashMap<ProfileId, Profile>,
    /// User ID to profile ID index.
    profile_index: HashMap<UserId, ProfileId>,
}

/// User and profile storage.
///
/// Opened once at startup and shared by cloning. After [`AccountStore::shutdown`]
/// every operation fails with [`AccountError::Unavailable`].
#[derive(Debug, Clone)]
pub struct AccountStore {
    tables: Arc<RwLock<Tables>>,
    open: Arc<AtomicBool>,
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::open()
    }
}

/// Counts of stored records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountStats {
    /// Number of users.
    pub users: usize,
    /// Number of profiles.
    pub profiles: usize,
}

impl AccountStore {
    /// Open an empty store.
    pub fn open() -> Self {
        tracing::debug!("Account store opened");
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            open: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Close the store. Idempotent.
    pub fn shutdown(&self) {
        if self.open.swap(false, Ordering::SeqCst) {
            tracing::info!("Account store shut down");
        }
    }

    /// Whether the store still accepts operations.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(AccountError::Unavailable("account store is shut down".to_string()))
        }
    }

    // ==================== Users ====================

    /// Create a user with an already-hashed password.
    pub fn create_user(&self, email: String, password_hash: String) -> Result<User> {
        self.ensure_open()?;
        User::validate_email(&email).map_err(AccountError::InvalidInput)?;

        let mut tables = self.tables.write();
        if tables.email_index.contains_key(&email) {
            return Err(AccountError::EmailExists(email));
        }

        let user = User::new(email, password_hash);
        tables.email_index.insert(user.email.clone(), user.id);
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    /// Get a user by ID.
    pub fn get_user(&self, id: UserId) -> Result<User> {
        self.ensure_open()?;
        self.tables
            .read()
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| AccountError::UserNotFound(id.to_string()))
    }

    /// Get a user by exact email.
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.ensure_open()?;
        let tables = self.tables.read();
        Ok(tables
            .email_index
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    /// List all users, oldest first.
    pub fn list_users(&self) -> Result<Vec<User>> {
        self.ensure_open()?;
        let mut users: Vec<User> = self.tables.read().users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.email.cmp(&b.email)));
        Ok(users)
    }

    /// Apply a partial update to a user.
    pub fn update_user(&self, id: UserId, changes: UserChanges) -> Result<User> {
        self.ensure_open()?;
        if let Some(email) = &changes.email {
            User::validate_email(email).map_err(AccountError::InvalidInput)?;
        }

        let mut tables = self.tables.write();
        let current_email = tables
            .users
            .get(&id)
            .map(|u| u.email.clone())
            .ok_or_else(|| AccountError::UserNotFound(id.to_string()))?;

        if let Some(email) = &changes.email {
            if *email != current_email {
                if tables.email_index.contains_key(email) {
                    return Err(AccountError::EmailExists(email.clone()));
                }
                tables.email_index.remove(&current_email);
                tables.email_index.insert(email.clone(), id);
            }
        }

        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| AccountError::UserNotFound(id.to_string()))?;
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        user.touch();

        Ok(user.clone())
    }

    /// Delete a user and its profile.
    pub fn delete_user(&self, id: UserId) -> Result<User> {
        self.ensure_open()?;
        let mut tables = self.tables.write();

        let user = tables
            .users
            .remove(&id)
            .ok_or_else(|| AccountError::UserNotFound(id.to_string()))?;
        tables.email_index.remove(&user.email);

        if let Some(profile_id) = tables.profile_index.remove(&id) {
            tables.profiles.remove(&profile_id);
        }

        Ok(user)
    }

    // ==================== Profiles ====================

    /// Create the profile for a user.
    pub fn create_profile(&self, user_id: UserId, fields: NewProfile) -> Result<Profile> {
        self.ensure_open()?;
        let profile = Profile::new(user_id, fields);
        profile.validate().map_err(AccountError::InvalidInput)?;

        let mut tables = self.tables.write();
        if !tables.users.contains_key(&user_id) {
            return Err(AccountError::UserNotFound(user_id.to_string()));
        }
        if tables.profile_index.contains_key(&user_id) {
            return Err(AccountError::ProfileExists(user_id.to_string()));
        }

        tables.profile_index.insert(user_id, profile.id);
        tables.profiles.insert(profile.id, profile.clone());

        Ok(profile)
    }

    /// Get a profile by ID.
    pub fn get_profile(&self, id: ProfileId) -> Result<Profile> {
        self.ensure_open()?;
        self.tables
            .read()
            .profiles
            .get(&id)
            .cloned()
            .ok_or_else(|| AccountError::ProfileNotFound(id.to_string()))
    }

    /// Get the profile belonging to a user, if any.
    pub fn profile_for_user(&self, user_id: UserId) -> Result<Option<Profile>> {
        self.ensure_open()?;
        let tables = self.tables.read();
        Ok(tables
            .profile_index
            .get(&user_id)
            .and_then(|id| tables.profiles.get(id))
            .cloned())
    }

    /// List all profiles, oldest first.
    pub fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.ensure_open()?;
        let mut profiles: Vec<Profile> = self.tables.read().profiles.values().cloned().collect();
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(profiles)
    }

    /// Apply a partial update to a profile.
    pub fn update_profile(&self, id: ProfileId, changes: ProfileChanges) -> Result<Profile> {
        self.ensure_open()?;
        let mut tables = self.tables.write();

        let profile = tables
            .profiles
            .get_mut(&id)
            .ok_or_else(|| AccountError::ProfileNotFound(id.to_string()))?;

        let mut updated = profile.clone();
        updated.apply(changes);
        updated.validate().map_err(AccountError::InvalidInput)?;
        *profile = updated.clone();

        Ok(updated)
    }

    /// Delete a profile.
    pub fn delete_profile(&self, id: ProfileId) -> Result<Profile> {
        self.ensure_open()?;
        let mut tables = self.tables.write();

        let profile = tables
            .profiles
            .remove(&id)
            .ok_or_else(|| AccountError::ProfileNotFound(id.to_string()))?;
        tables.profile_index.remove(&profile.user_id);

        Ok(profile)
    }

    /// Get statistics about stored data.
    pub fn stats(&self) -> AccountStats {
        let tables = self.tables.read();
        AccountStats {
            users: tables.users.len(),
            profiles: tables.profiles.len(),
        }
    }
}

#[async_trait]
impl CredentialStore for AccountStore {
    async fn find_by_email(&self, email: &str) -> gatehouse_auth::Result<Option<Credential>> {
        Ok(self
            .find_user_by_email(email)?
            .map(|user| user.to_credential()))
    }

    async fn create_credential(
        &self,
        email: &str,
        password_hash: &str,
    ) -> gatehouse_auth::Result<Credential> {
        let user = self.create_user(email.to_string(), password_hash.to_string())?;
        Ok(user.to_credential())
    }
}
