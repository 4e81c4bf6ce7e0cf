mod common;

use poem::http::StatusCode;
use poem::test::TestClient;
use poem::Endpoint;
use serde_json::json;

async fn register(
    cli: &TestClient<impl Endpoint>,
    name: &str,
    email: &str,
    password: &str,
) -> String {
    let resp = cli
        .post("/api/auth/register")
        .body_json(&json!({ "name": name, "email": email, "password": password }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);

    let body = resp.json().await;
    body.value().object().get("token").string().to_string()
}

#[tokio::test]
async fn register_returns_token_and_public_fields() {
    let cli = common::test_client().await;

    let resp = cli
        .post("/api/auth/register")
        .body_json(&json!({ "name": "Ann", "email": "ann@x.com", "password": "secret1" }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);

    let body = resp.json().await;
    let user = body.value().object();
    assert_eq!(user.get("name").string(), "Ann");
    assert_eq!(user.get("email").string(), "ann@x.com");
    assert!(!user.get("token").string().is_empty());
    assert!(user.get("id").i64() >= 1);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let cli = common::test_client().await;
    register(&cli, "Ann", "ann@x.com", "secret1").await;

    let resp = cli
        .post("/api/auth/register")
        .body_json(&json!({ "name": "Ann Again", "email": "ann@x.com", "password": "secret2" }))
        .send()
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body = resp.json().await;
    assert_eq!(body.value().object().get("message").string(), "User already exists");
}

#[tokio::test]
async fn register_rejects_missing_fields_with_field_errors() {
    let cli = common::test_client().await;

    let resp = cli
        .post("/api/auth/register")
        .body_json(&json!({ "name": "", "email": "not-an-email", "password": "123" }))
        .send()
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body = resp.json().await;
    let errors = body.value().object().get("errors").object_array();
    let fields: Vec<&str> = errors.iter().map(|e| e.get("field").string()).collect();
    assert_eq!(fields, vec!["name", "email", "password"]);
}

#[tokio::test]
async fn login_failure_does_not_reveal_which_part_was_wrong() {
    let cli = common::test_client().await;
    register(&cli, "Ann", "ann@x.com", "secret1").await;

    let wrong_password = cli
        .post("/api/auth/login")
        .body_json(&json!({ "email": "ann@x.com", "password": "wrong!" }))
        .send()
        .await;
    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    let wrong_password = wrong_password.json().await;

    let unknown_email = cli
        .post("/api/auth/login")
        .body_json(&json!({ "email": "ghost@x.com", "password": "secret1" }))
        .send()
        .await;
    unknown_email.assert_status(StatusCode::UNAUTHORIZED);
    let unknown_email = unknown_email.json().await;

    // Identical bodies: the caller cannot probe for account existence.
    assert_eq!(
        wrong_password.value().object().get("message").string(),
        "Invalid credentials"
    );
    assert_eq!(
        unknown_email.value().object().get("message").string(),
        "Invalid credentials"
    );
}

#[tokio::test]
async fn login_returns_a_usable_token() {
    let cli = common::test_client().await;
    register(&cli, "Ann", "ann@x.com", "secret1").await;

    let resp = cli
        .post("/api/auth/login")
        .body_json(&json!({ "email": "ann@x.com", "password": "secret1" }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    let token = body.value().object().get("token").string().to_string();

    let me = cli
        .get("/api/auth/me")
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await;
    me.assert_status_is_ok();
    let me = me.json().await;
    let user = me.value().object();
    assert_eq!(user.get("email").string(), "ann@x.com");
    assert!(user.get("created_at").i64() > 0);
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let cli = common::test_client().await;

    let resp = cli.get("/api/auth/me").send().await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    resp.assert_json(json!({ "message": "Missing authentication token" }))
        .await;
}

#[tokio::test]
async fn me_with_garbage_token_is_unauthorized() {
    let cli = common::test_client().await;

    let resp = cli
        .get("/api/auth/me")
        .header("Authorization", "Bearer not-a-jwt")
        .send()
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body = resp.json().await;
    assert_eq!(
        body.value().object().get("message").string(),
        "Invalid or malformed token"
    );
}

#[tokio::test]
async fn health_needs_no_auth() {
    let cli = common::test_client().await;

    let resp = cli.get("/api/health").send().await;

    resp.assert_status_is_ok();
    let body = resp.json().await;
    assert_eq!(body.value().object().get("status").string(), "OK");
}

#[tokio::test]
async fn unknown_routes_return_a_json_404() {
    let cli = common::test_client().await;

    let resp = cli.get("/api/nope").send().await;

    resp.assert_status(StatusCode::NOT_FOUND);
    resp.assert_json(json!({ "message": "Route not found" })).await;
}
