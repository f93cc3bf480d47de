//! Bearer token gate for protected routes.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use gatehouse_auth::Principal;

use crate::api::{ApiError, AppState};

/// Reject the request with 401 unless it carries a valid bearer token.
///
/// On success the [`Principal`] is inserted into the request extensions and
/// the downstream handler runs once. On failure the handler is never called.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let principal: Principal = match state.guard.authorize(header) {
        Ok(principal) => principal,
        Err(err) => {
            tracing::debug!(error = %err, path = %request.uri().path(), "Request rejected by access guard");
            return ApiError::from(err).into_response();
        }
    };

    tracing::debug!(subject = %principal.subject, "Request authorized");
    request.extensions_mut().insert(principal);
    next.run(request).await
}
