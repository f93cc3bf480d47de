//! # Gatehouse Node
//!
//! HTTP service in front of the Gatehouse authentication core.
//!
//! ## Routes
//!
//! | Method | Path                  | Auth   | Purpose                       |
//! |--------|-----------------------|--------|-------------------------------|
//! | GET    | `/health`             | none   | Liveness and version          |
//! | POST   | `/login`              | none   | Exchange credentials for token|
//! | POST   | `/api/users`          | none   | Register                      |
//! | GET    | `/api/users[/{id}]`   | bearer | List or fetch users           |
//! | PUT    | `/api/users/{id}`     | bearer | Partial user update           |
//! | DELETE | `/api/users/{id}`     | bearer | Delete user and profile       |
//! | POST   | `/api/profiles/{uid}` | bearer | Create the user's profile     |
//! | GET    | `/api/profiles[/{id}]`| bearer | List or fetch profiles        |
//! | PUT    | `/api/profiles/{id}`  | bearer | Partial profile update        |
//! | DELETE | `/api/profiles/{id}`  | bearer | Delete profile                |
//!
//! ## Example
//!
//! ```rust,no_run
//! use gatehouse_accounts::AccountStore;
//! use gatehouse_auth::{AuthConfig, DEFAULT_TOKEN_TTL};
//! use gatehouse_node::api::{create_router, AppState};
//!
//! # fn example() -> Result<(), gatehouse_auth::AuthError> {
//! let config = AuthConfig::new(Some("a-long-random-signing-secret-value"), DEFAULT_TOKEN_TTL)?;
//! let state = AppState::new(AccountStore::open(), &config)?;
//! let app = create_router(state);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth_api;
pub mod config;
pub mod middleware;
pub mod observability;
pub mod profiles_api;
pub mod users_api;
pub mod validation;
