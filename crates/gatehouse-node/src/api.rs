//! HTTP API: shared state, error mapping and the router.

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use gatehouse_accounts::{AccountError, AccountStore};
use gatehouse_auth::{
    AccessGuard, AuthConfig, AuthError, AuthService, PasswordHasher, TokenIssuer, TokenVerifier,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::observability::request_id_middleware;
use crate::validation::ValidationErrorResponse;
use crate::{auth_api, profiles_api, users_api};

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// User and profile records.
    pub accounts: AccountStore,
    /// Login and registration.
    pub auth: AuthService,
    /// Bearer token gate for protected routes.
    pub guard: AccessGuard,
}

impl AppState {
    /// Wire the authentication core over an opened account store.
    pub fn new(accounts: AccountStore, config: &AuthConfig) -> Result<Self, AuthError> {
        let auth = AuthService::new(
            Arc::new(accounts.clone()),
            PasswordHasher::new()?,
            TokenIssuer::new(config),
        )?;
        let guard = AccessGuard::new(TokenVerifier::new(config));

        Ok(Self {
            accounts,
            auth,
            guard,
        })
    }

    /// Release the account store.
    pub fn shutdown(&self) {
        let stats = self.accounts.stats();
        tracing::info!(
            users = stats.users,
            profiles = stats.profiles,
            "Closing account store"
        );
        self.accounts.shutdown();
    }
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error("validation failed")]
    Validation(ValidationErrorResponse),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl From<ValidationErrorResponse> for ApiError {
    fn from(err: ValidationErrorResponse) -> Self {
        ApiError::Validation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Auth(err) => {
                if err.status_code() >= 500 {
                    tracing::error!(error = %err, "Request failed");
                }
                (status_from(err.status_code()), err.public_message().to_string())
            }
            ApiError::Account(err) => {
                if err.status_code() >= 500 {
                    tracing::error!(error = %err, "Request failed");
                }
                (status_from(err.status_code()), err.public_message())
            }
            ApiError::Validation(response) => return response.into_response(),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason),
        };

        (status, Json(MessageResponse { message })).into_response()
    }
}

fn status_from(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Body carrying a single message.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned when a record is created.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: String,
}

/// Creates the API router with the default request timeout.
pub fn create_router(state: AppState) -> Router {
    create_router_with_timeout(state, DEFAULT_REQUEST_TIMEOUT)
}

/// Creates the API router.
pub fn create_router_with_timeout(state: AppState, timeout: Duration) -> Router {
    let protected = Router::new()
        .merge(users_api::protected_routes())
        .merge(profiles_api::routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::require_bearer,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(auth_api::routes())
        .merge(users_api::public_routes())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (AuthError::InvalidCredentials.into(), StatusCode::UNAUTHORIZED),
            (AuthError::MissingToken.into(), StatusCode::UNAUTHORIZED),
            (
                AuthError::StoreUnavailable("closed".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AuthError::HashFormat("bad".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AccountError::UserNotFound("x".into()).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                AccountError::EmailExists("a@x.com".into()).into(),
                StatusCode::CONFLICT,
            ),
            (
                AccountError::Unavailable("closed".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::BadRequest("bad id".into()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
