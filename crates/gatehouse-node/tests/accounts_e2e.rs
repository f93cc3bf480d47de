//! End-to-end tests for user and profile management.

use axum::{body::Body, http::Request, response::Response, Router};
use gatehouse_accounts::AccountStore;
use gatehouse_auth::{AuthConfig, DEFAULT_TOKEN_TTL};
use gatehouse_node::api::{create_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn create_test_app() -> Router {
    let config =
        AuthConfig::new(Some("accounts-e2e-secret-accounts-e2e"), DEFAULT_TOKEN_TTL).unwrap();
    create_router(AppState::new(AccountStore::open(), &config).unwrap())
}

async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

struct Client {
    app: Router,
    token: Option<String>,
}

impl Client {
    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = &self.token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        self.app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }
}

/// Register `a@x.com` and return an authenticated client plus the user ID.
async fn signed_in() -> (Client, String) {
    let mut client = Client {
        app: create_test_app(),
        token: None,
    };

    let response = client
        .send(
            "POST",
            "/api/users",
            Some(json!({ "email": "a@x.com", "password": "secret" })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let id = json_body(response).await["id"].as_str().unwrap().to_string();

    let response = client
        .send(
            "POST",
            "/login",
            Some(json!({ "email": "a@x.com", "password": "secret" })),
        )
        .await;
    client.token = Some(json_body(response).await["token"].as_str().unwrap().to_string());

    (client, id)
}

fn profile_body() -> Value {
    json!({
        "name": "Alice",
        "gender": "female",
        "bio": "Rustacean",
        "date_of_birth": "1990-05-17"
    })
}

// ==================== Users ====================

#[tokio::test]
async fn test_registration_validation() {
    let client = Client {
        app: create_test_app(),
        token: None,
    };

    let response = client
        .send(
            "POST",
            "/api/users",
            Some(json!({ "email": "not-an-email", "password": "secret" })),
        )
        .await;
    assert_eq!(response.status(), 422);
    let body = json_body(response).await;
    assert_eq!(body["details"][0]["field"], "email");

    let response = client
        .send(
            "POST",
            "/api/users",
            Some(json!({ "email": "a@x.com", "password": "12345" })),
        )
        .await;
    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let (client, _) = signed_in().await;

    let response = client
        .send(
            "POST",
            "/api/users",
            Some(json!({ "email": "a@x.com", "password": "another" })),
        )
        .await;
    assert_eq!(response.status(), 409);
    assert_eq!(json_body(response).await["message"], "Email already exists");
}

#[tokio::test]
async fn test_get_user_and_not_found() {
    let (client, id) = signed_in().await;

    let response = client.send("GET", &format!("/api/users/{}", id), None).await;
    assert_eq!(response.status(), 200);
    let user = json_body(response).await;
    assert_eq!(user["email"], "a@x.com");
    assert!(user["profile"].is_null());

    let response = client
        .send(
            "GET",
            &format!("/api/users/{}", uuid::Uuid::new_v4()),
            None,
        )
        .await;
    assert_eq!(response.status(), 404);
    assert_eq!(json_body(response).await["message"], "User not found");

    let response = client.send("GET", "/api/users/not-a-uuid", None).await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_partial_user_update() {
    let (client, id) = signed_in().await;
    let uri = format!("/api/users/{}", id);

    // Password only: email is kept and the new password works
    let response = client
        .send("PUT", &uri, Some(json!({ "password": "new-secret" })))
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(json_body(response).await["email"], "a@x.com");

    let response = client
        .send(
            "POST",
            "/login",
            Some(json!({ "email": "a@x.com", "password": "new-secret" })),
        )
        .await;
    assert_eq!(response.status(), 201);

    let response = client
        .send(
            "POST",
            "/login",
            Some(json!({ "email": "a@x.com", "password": "secret" })),
        )
        .await;
    assert_eq!(response.status(), 401);

    // Email only
    let response = client
        .send("PUT", &uri, Some(json!({ "email": "b@x.com" })))
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(json_body(response).await["email"], "b@x.com");
}

#[tokio::test]
async fn test_update_email_conflict() {
    let (client, id) = signed_in().await;
    client
        .send(
            "POST",
            "/api/users",
            Some(json!({ "email": "b@x.com", "password": "secret" })),
        )
        .await;

    let response = client
        .send(
            "PUT",
            &format!("/api/users/{}", id),
            Some(json!({ "email": "b@x.com" })),
        )
        .await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn test_delete_user_cascades_profile() {
    let (client, id) = signed_in().await;

    let response = client
        .send("POST", &format!("/api/profiles/{}", id), Some(profile_body()))
        .await;
    let profile_id = json_body(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = client
        .send("DELETE", &format!("/api/users/{}", id), None)
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        json_body(response).await["message"],
        "User deleted successfully"
    );

    let response = client
        .send("GET", &format!("/api/profiles/{}", profile_id), None)
        .await;
    assert_eq!(response.status(), 404);

    let response = client.send("GET", "/api/users", None).await;
    assert_eq!(json_body(response).await, json!([]));
}

// ==================== Profiles ====================

#[tokio::test]
async fn test_profile_lifecycle() {
    let (client, id) = signed_in().await;

    let response = client
        .send("POST", &format!("/api/profiles/{}", id), Some(profile_body()))
        .await;
    assert_eq!(response.status(), 201);
    let profile_id = json_body(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let uri = format!("/api/profiles/{}", profile_id);

    // Embedded in the user
    let response = client.send("GET", &format!("/api/users/{}", id), None).await;
    let user = json_body(response).await;
    assert_eq!(user["profile"]["name"], "Alice");
    assert_eq!(user["profile"]["date_of_birth"], "1990-05-17");

    // Partial update
    let response = client
        .send("PUT", &uri, Some(json!({ "name": "Alicia" })))
        .await;
    assert_eq!(response.status(), 200);
    let profile = json_body(response).await;
    assert_eq!(profile["name"], "Alicia");
    assert_eq!(profile["bio"], "Rustacean");

    let response = client.send("GET", "/api/profiles", None).await;
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);

    let response = client.send("DELETE", &uri, None).await;
    assert_eq!(response.status(), 200);

    let response = client.send("GET", &uri, None).await;
    assert_eq!(response.status(), 404);
    assert_eq!(json_body(response).await["message"], "Profile not found");
}

#[tokio::test]
async fn test_second_profile_conflicts() {
    let (client, id) = signed_in().await;
    let uri = format!("/api/profiles/{}", id);

    client.send("POST", &uri, Some(profile_body())).await;
    let response = client.send("POST", &uri, Some(profile_body())).await;

    assert_eq!(response.status(), 409);
    assert_eq!(
        json_body(response).await["message"],
        "This user already has a profile"
    );
}

#[tokio::test]
async fn test_profile_for_unknown_user() {
    let (client, _) = signed_in().await;

    let response = client
        .send(
            "POST",
            &format!("/api/profiles/{}", uuid::Uuid::new_v4()),
            Some(profile_body()),
        )
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_profile_validation() {
    let (client, id) = signed_in().await;

    let response = client
        .send(
            "POST",
            &format!("/api/profiles/{}", id),
            Some(json!({
                "name": "",
                "gender": "female",
                "date_of_birth": "1990-05-17"
            })),
        )
        .await;
    assert_eq!(response.status(), 422);

    let response = client
        .send(
            "POST",
            &format!("/api/profiles/{}", id),
            Some(json!({
                "name": "Alice",
                "gender": "female",
                "date_of_birth": "2999-01-01"
            })),
        )
        .await;
    assert_eq!(response.status(), 422);
    assert_eq!(
        json_body(response).await["message"],
        "date_of_birth cannot be in the future"
    );
}
