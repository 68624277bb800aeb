use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use yesgem_studio_server::{config::Config, create_app, handlers::AppState, store::Stores};

fn test_config() -> Config {
    Config {
        port: 0,
        store_backend: "memory".to_string(),
        database_url: String::new(),
        jwt_secret: "test-secret".to_string(),
        admin_uids: vec!["admin-uid".to_string()],
        genai_api_key: None,
    }
}

fn test_app() -> Router {
    let state = AppState::new(test_config(), Stores::in_memory()).expect("failed to build state");
    create_app(state)
}

#[derive(serde::Serialize)]
struct TestClaims {
    sub: String,
    email: Option<String>,
    name: Option<String>,
    admin: bool,
    exp: i64,
    iat: i64,
}

fn bearer(uid: &str, admin_claim: bool) -> String {
    let now = Utc::now();
    let claims = TestClaims {
        sub: uid.to_string(),
        email: Some(format!("{}@example.com", uid)),
        name: Some("Test User".to_string()),
        admin: admin_claim,
        exp: (now + Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap();
    format!("Bearer {}", token)
}

fn post_json(uri: &str, auth: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn lookup(app: &Router, uid: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/admin/lookup-user",
            Some(&bearer("admin-uid", false)),
            json!({ "targetUid": uid }),
        ))
        .await
        .unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

#[tokio::test]
async fn bootstrap_requires_bearer_token() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/user/bootstrap")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bootstrap_creates_a_guest_account_once() {
    let app = test_app();
    let token = bearer("user-1", false);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/user/bootstrap")
                .header("authorization", &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "ok": true }));

    let (status, first) = lookup(&app, "user-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["plan"]["id"], "guest");
    assert_eq!(first["quota"]["imagesRemaining"], 10);
    assert_eq!(first["email"], "user-1@example.com");

    // Second bootstrap is a no-op; the account comes back byte-identical.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/user/bootstrap")
                .header("authorization", &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, second) = lookup(&app, "user-1").await;
    assert_eq!(second, first);
}

#[tokio::test]
async fn admin_routes_reject_missing_and_non_admin_tokens() {
    let app = test_app();
    let body = json!({ "targetUid": "user-1", "deltaImages": 5 });

    let response = app
        .clone()
        .oneshot(post_json("/api/v1/admin/add-credits", None, body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/admin/add-credits",
            Some(&bearer("user-1", false)),
            body.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(post_json(
            "/api/v1/admin/add-credits",
            Some("Bearer not-a-token"),
            body,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_capability_can_come_from_the_token_claim() {
    let app = test_app();

    // "ops-2" is not in ADMIN_UIDS; its token carries the admin claim.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/admin/set-plan",
            Some(&bearer("ops-2", true)),
            json!({ "targetUid": "user-9", "planId": "basic" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, account) = lookup(&app, "user-9").await;
    assert_eq!(account["plan"]["id"], "basic");
}

#[tokio::test]
async fn add_credits_requires_an_existing_account() {
    let app = test_app();

    let response = app
        .oneshot(post_json(
            "/api/v1/admin/add-credits",
            Some(&bearer("admin-uid", false)),
            json!({ "targetUid": "ghost", "deltaImages": 5 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_credits_clamps_at_zero() {
    let app = test_app();
    let admin = bearer("admin-uid", false);

    // Bootstrap to the guest allotment of 10, then raise to 50.
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/user/bootstrap")
                .header("authorization", bearer("user-2", false))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/admin/add-credits",
            Some(&admin),
            json!({ "targetUid": "user-2", "deltaImages": 40 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, account) = lookup(&app, "user-2").await;
    assert_eq!(account["quota"]["imagesRemaining"], 50);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/admin/add-credits",
            Some(&admin),
            json!({ "targetUid": "user-2", "deltaImages": -1000 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, account) = lookup(&app, "user-2").await;
    assert_eq!(account["quota"]["imagesRemaining"], 0);
}

#[tokio::test]
async fn add_credits_validates_its_fields() {
    let app = test_app();
    let admin = bearer("admin-uid", false);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/admin/add-credits",
            Some(&admin),
            json!({ "targetUid": "user-1", "deltaImages": "ten" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post_json(
            "/api/v1/admin/add-credits",
            Some(&admin),
            json!({ "deltaImages": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn set_plan_assigns_deluxe_and_resets_quota() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/admin/set-plan",
            Some(&bearer("admin-uid", false)),
            json!({ "targetUid": "user-3", "planId": "deluxe" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "ok": true }));

    let (_, account) = lookup(&app, "user-3").await;
    assert_eq!(account["plan"]["id"], "deluxe");
    assert_eq!(account["plan"]["activated"], true);
    assert_eq!(account["quota"]["imagesRemaining"], 3300);
    assert!(account["quota"]["resetsAt"].is_string());
}

#[tokio::test]
async fn set_plan_rejects_unknown_plan_ids_without_writing() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/admin/set-plan",
            Some(&bearer("admin-uid", false)),
            json!({ "targetUid": "user-4", "planId": "mega" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, _) = lookup(&app, "user-4").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chat_send_relays_messages_for_authenticated_users() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/chat/send",
            None,
            json!({ "chatId": "room-1", "content": "hello" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/chat/send",
            Some(&bearer("user-5", false)),
            json!({ "chatId": "room-1", "content": "  " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post_json(
            "/api/v1/chat/send",
            Some(&bearer("user-5", false)),
            json!({ "chatId": "room-1", "content": "hello" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));
}

#[tokio::test]
async fn styles_endpoint_always_serves_a_catalog() {
    let app = test_app();

    // The memory style collection starts empty, so the built-in list serves.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/storyboard/styles")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let styles = body["styles"].as_array().unwrap();
    assert_eq!(styles.len(), 6);
    assert_eq!(styles[0]["id"], "cinematic-noir");
    assert!(styles.iter().all(|s| s["active"] == true));
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health/live")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/ready")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["backend"], "memory");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_text() {
    let app = test_app();

    // Drive one counted request first.
    app.clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/storyboard/styles")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("http_requests_total"));
    assert!(text.contains("style_fallbacks_total 1"));
}
