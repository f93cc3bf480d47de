//! Login endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use gatehouse_auth::{AuthError, AuthResult};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Creates the login route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Exchange credentials for a bearer token.
///
/// Unknown email and wrong password both answer 401 "Invalid credentials".
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    match state.auth.login(&req.email, &req.password).await? {
        AuthResult::Authenticated(token) => {
            Ok((StatusCode::CREATED, Json(LoginResponse { token })))
        }
        AuthResult::Rejected(_) => Err(AuthError::InvalidCredentials.into()),
    }
}
