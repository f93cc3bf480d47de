//! Profile management endpoints. All routes require a bearer token.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use gatehouse_accounts::{NewProfile, ProfileChanges};
use serde::Deserialize;
use validator::Validate;

use crate::api::{ApiError, AppState, CreatedResponse, MessageResponse};
use crate::users_api::parse_id;
use crate::validation::validate_request;

/// Request to create a profile.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1))]
    pub gender: String,
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
    pub date_of_birth: NaiveDate,
}

impl From<CreateProfileRequest> for NewProfile {
    fn from(req: CreateProfileRequest) -> Self {
        NewProfile {
            name: req.name,
            gender: req.gender,
            bio: req.bio,
            avatar_url: req.avatar_url,
            date_of_birth: req.date_of_birth,
        }
    }
}

/// Partial profile update.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub gender: Option<String>,
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(req: UpdateProfileRequest) -> Self {
        ProfileChanges {
            name: req.name,
            gender: req.gender,
            bio: req.bio,
            avatar_url: req.avatar_url,
            date_of_birth: req.date_of_birth,
        }
    }
}

/// Creates the profile routes.
///
/// `POST /api/profiles/{id}` takes the owning user's ID; the other methods on
/// that path take the profile ID.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/profiles", get(list_profiles))
        .route(
            "/api/profiles/{id}",
            get(get_profile)
                .post(create_profile)
                .put(update_profile)
                .delete(delete_profile),
        )
}

async fn create_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<CreateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = parse_id(&user_id)?;
    validate_request(&req)?;

    let profile = state.accounts.create_profile(user_id, req.into())?;
    tracing::info!(user_id = %user_id, profile_id = %profile.id, "Profile created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Profile created successfully".to_string(),
            id: profile.id.to_string(),
        }),
    ))
}

async fn list_profiles(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.accounts.list_profiles()?))
}

async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.accounts.get_profile(id)?))
}

async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    validate_request(&req)?;

    let profile = state.accounts.update_profile(id, req.into())?;
    tracing::info!(profile_id = %id, "Profile updated");

    Ok(Json(profile))
}

async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    state.accounts.delete_profile(id)?;
    tracing::info!(profile_id = %id, "Profile deleted");

    Ok(Json(MessageResponse::new("Profile deleted successfully")))
}
