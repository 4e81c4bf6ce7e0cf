mod common;

use poem::http::StatusCode;
use poem::test::TestClient;
use poem::Endpoint;
use serde_json::json;

async fn register(cli: &TestClient<impl Endpoint>, name: &str, email: &str) -> String {
    let resp = cli
        .post("/api/auth/register")
        .body_json(&json!({ "name": name, "email": email, "password": "secret1" }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);

    let body = resp.json().await;
    body.value().object().get("token").string().to_string()
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[tokio::test]
async fn create_then_stats_end_to_end() {
    let cli = common::test_client().await;
    let token = register(&cli, "Ann", "ann@x.com").await;

    let resp = cli
        .post("/api/issues")
        .header("Authorization", bearer(&token))
        .body_json(&json!({ "title": "Bug", "description": "Crash on load" }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);

    let body = resp.json().await;
    let issue = body.value().object();
    assert_eq!(issue.get("title").string(), "Bug");
    assert_eq!(issue.get("status").string(), "Open");
    assert_eq!(issue.get("priority").string(), "Medium");
    assert_eq!(issue.get("severity").string(), "Major");
    assert_eq!(issue.get("creator_name").string(), "Ann");

    let stats = cli
        .get("/api/issues/stats")
        .header("Authorization", bearer(&token))
        .send()
        .await;
    stats.assert_status_is_ok();
    stats
        .assert_json(json!({ "Open": 1, "In Progress": 0, "Resolved": 0, "Closed": 0 }))
        .await;
}

#[tokio::test]
async fn issues_routes_require_a_token() {
    let cli = common::test_client().await;

    let list = cli.get("/api/issues").send().await;
    list.assert_status(StatusCode::UNAUTHORIZED);
    // The 401 carries the standard {message} body even when no token was sent.
    list.assert_json(json!({ "message": "Missing authentication token" }))
        .await;

    let create = cli
        .post("/api/issues")
        .body_json(&json!({ "title": "Bug", "description": "body" }))
        .send()
        .await;
    create.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn get_by_id_includes_creator_email() {
    let cli = common::test_client().await;
    let token = register(&cli, "Ann", "ann@x.com").await;

    let resp = cli
        .post("/api/issues")
        .header("Authorization", bearer(&token))
        .body_json(&json!({ "title": "Bug", "description": "body" }))
        .send()
        .await;
    let created = resp.json().await;
    let id = created.value().object().get("id").i64();

    let resp = cli
        .get(format!("/api/issues/{id}"))
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    let issue = body.value().object();
    assert_eq!(issue.get("creator_name").string(), "Ann");
    assert_eq!(issue.get("creator_email").string(), "ann@x.com");
}

#[tokio::test]
async fn missing_issue_is_404() {
    let cli = common::test_client().await;
    let token = register(&cli, "Ann", "ann@x.com").await;

    let resp = cli
        .get("/api/issues/9999")
        .header("Authorization", bearer(&token))
        .send()
        .await;

    resp.assert_status(StatusCode::NOT_FOUND);
    let body = resp.json().await;
    assert_eq!(body.value().object().get("message").string(), "Issue not found");
}

#[tokio::test]
async fn put_applies_a_partial_update() {
    let cli = common::test_client().await;
    let token = register(&cli, "Ann", "ann@x.com").await;

    let resp = cli
        .post("/api/issues")
        .header("Authorization", bearer(&token))
        .body_json(&json!({ "title": "A", "description": "B" }))
        .send()
        .await;
    let created = resp.json().await;
    let id = created.value().object().get("id").i64();

    let resp = cli
        .put(format!("/api/issues/{id}"))
        .header("Authorization", bearer(&token))
        .body_json(&json!({ "status": "Resolved" }))
        .send()
        .await;
    resp.assert_status_is_ok();

    let body = resp.json().await;
    let issue = body.value().object();
    assert_eq!(issue.get("title").string(), "A");
    assert_eq!(issue.get("description").string(), "B");
    assert_eq!(issue.get("status").string(), "Resolved");
    assert_eq!(issue.get("priority").string(), "Medium");
}

#[tokio::test]
async fn update_missing_issue_is_404() {
    let cli = common::test_client().await;
    let token = register(&cli, "Ann", "ann@x.com").await;

    let resp = cli
        .put("/api/issues/9999")
        .header("Authorization", bearer(&token))
        .body_json(&json!({ "status": "Closed" }))
        .send()
        .await;

    resp.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_confirms_then_404s() {
    let cli = common::test_client().await;
    let token = register(&cli, "Ann", "ann@x.com").await;

    let resp = cli
        .post("/api/issues")
        .header("Authorization", bearer(&token))
        .body_json(&json!({ "title": "Bug", "description": "body" }))
        .send()
        .await;
    let created = resp.json().await;
    let id = created.value().object().get("id").i64();

    let resp = cli
        .delete(format!("/api/issues/{id}"))
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status_is_ok();
    resp.assert_json(json!({ "message": "Issue deleted successfully" }))
        .await;

    let resp = cli
        .delete(format!("/api/issues/{id}"))
        .header("Authorization", bearer(&token))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_supports_pagination_filters_and_search() {
    let cli = common::test_client().await;
    let token = register(&cli, "Ann", "ann@x.com").await;

    for n in 1..=15 {
        let resp = cli
            .post("/api/issues")
            .header("Authorization", bearer(&token))
            .body_json(&json!({
                "title": format!("Issue {n}"),
                "description": if n % 2 == 0 { "crash report" } else { "feature request" },
            }))
            .send()
            .await;
        resp.assert_status(StatusCode::CREATED);
    }

    let page2 = cli
        .get("/api/issues")
        .header("Authorization", bearer(&token))
        .query("page", &2)
        .query("limit", &10)
        .send()
        .await;
    page2.assert_status_is_ok();
    let body = page2.json().await;
    let listing = body.value().object();
    assert_eq!(listing.get("total").i64(), 15);
    assert_eq!(listing.get("page").i64(), 2);
    assert_eq!(listing.get("totalPages").i64(), 2);
    assert_eq!(listing.get("issues").array().len(), 5);

    let searched = cli
        .get("/api/issues")
        .header("Authorization", bearer(&token))
        .query("search", &"crash")
        .send()
        .await;
    searched.assert_status_is_ok();
    let body = searched.json().await;
    assert_eq!(body.value().object().get("total").i64(), 7);

    let filtered = cli
        .get("/api/issues")
        .header("Authorization", bearer(&token))
        .query("status", &"Closed")
        .send()
        .await;
    filtered.assert_status_is_ok();
    let body = filtered.json().await;
    assert_eq!(body.value().object().get("total").i64(), 0);
}

#[tokio::test]
async fn create_without_required_fields_is_rejected() {
    let cli = common::test_client().await;
    let token = register(&cli, "Ann", "ann@x.com").await;

    // Present but blank fields produce the field-level error list.
    let blank = cli
        .post("/api/issues")
        .header("Authorization", bearer(&token))
        .body_json(&json!({ "title": "  ", "description": "" }))
        .send()
        .await;
    blank.assert_status(StatusCode::BAD_REQUEST);
    let body = blank.json().await;
    let errors = body.value().object().get("errors").object_array();
    assert_eq!(errors.len(), 2);

    // A missing field fails typed deserialization, still a 400.
    let missing = cli
        .post("/api/issues")
        .header("Authorization", bearer(&token))
        .body_json(&json!({ "title": "Bug" }))
        .send()
        .await;
    missing.assert_status(StatusCode::BAD_REQUEST);

    // Unknown enum values are rejected the same way.
    let bad_enum = cli
        .post("/api/issues")
        .header("Authorization", bearer(&token))
        .body_json(&json!({ "title": "Bug", "description": "body", "status": "Imaginary" }))
        .send()
        .await;
    bad_enum.assert_status(StatusCode::BAD_REQUEST);
}
