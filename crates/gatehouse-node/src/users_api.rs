//! User management endpoints.
//!
//! Registration is public; every other route sits behind the access guard.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use gatehouse_accounts::{UserChanges, UserId, UserResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::{ApiError, AppState, CreatedResponse, MessageResponse};
use crate::validation::validate_request;

/// Request to register a user.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(
        min = 6,
        message = "Password must be at least 6 characters"
    ))]
    pub password: String,
}

/// Partial user update.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    #[validate(length(
        min = 6,
        message = "Password must be at least 6 characters"
    ))]
    pub password: Option<String>,
}

/// Routes reachable without a token.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/api/users", post(create_user))
}

/// Routes that require a bearer token.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Parse a path identifier.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid id: {}", raw)))
}

fn user_response(state: &AppState, id: UserId) -> Result<UserResponse, ApiError> {
    let user = state.accounts.get_user(id)?;
    let profile = state.accounts.profile_for_user(id)?;
    Ok(user.to_response(profile))
}

async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&req)?;

    let credential = state.auth.register(&req.email, &req.password).await?;
    tracing::info!(user_id = %credential.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "User created successfully".to_string(),
            id: credential.id,
        }),
    ))
}

async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = state
        .accounts
        .list_users()?
        .into_iter()
        .map(|user| {
            let profile = state.accounts.profile_for_user(user.id)?;
            Ok(user.to_response(profile))
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok(Json(users))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(user_response(&state, id)?))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    validate_request(&req)?;

    let password_hash = match &req.password {
        Some(password) => Some(state.auth.hash_password(password).await?),
        None => None,
    };
    let changes = UserChanges {
        email: req.email,
        password_hash,
    };

    if !changes.is_empty() {
        state.accounts.update_user(id, changes)?;
        tracing::info!(user_id = %id, "User updated");
    }

    Ok(Json(user_response(&state, id)?))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    state.accounts.delete_user(id)?;
    tracing::info!(user_id = %id, "User deleted");

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
