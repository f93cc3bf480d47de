//! # Gatehouse Accounts
//!
//! User and profile records backing the Gatehouse HTTP service.
//!
//! A user owns the login credential (email plus password digest) and may
//! have at most one profile. Deleting a user removes its profile.
//! [`AccountStore`] implements [`gatehouse_auth::CredentialStore`] so the
//! authentication core can look credentials up without knowing about
//! profiles.

pub mod error;
pub mod profile;
pub mod store;
pub mod user;

pub use error::{AccountError, Result};
pub use profile::{NewProfile, Profile, ProfileChanges, ProfileId, MAX_BIO_LENGTH, MAX_NAME_LENGTH};
pub use store::{AccountStats, AccountStore};
pub use user::{User, UserChanges, UserId, UserResponse, MAX_EMAIL_LENGTH};
