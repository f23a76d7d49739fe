//! Router-level tests: drive the auth routes through `tower::ServiceExt`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::user_name::UserName;
use crate::infra::memory::InMemoryAuthRepository;
use crate::presentation::handlers::AuthAppState;
use crate::presentation::middleware::{AuthenticatedUser, require_operator};
use crate::{AuthConfig, auth_router};

fn test_config() -> AuthConfig {
    AuthConfig {
        operators: ["root".to_string()].into_iter().collect(),
        ..AuthConfig::with_random_secret()
    }
}

fn app_with(config: AuthConfig) -> (Router, InMemoryAuthRepository) {
    let repo = InMemoryAuthRepository::new();
    let state = AuthAppState::new(repo.clone(), config);

    let operator_only = Router::new()
        .route(
            "/ops",
            get(|axum::Extension(user): axum::Extension<AuthenticatedUser>| async move {
                format!("hello {}", user.user_name)
            }),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            require_operator::<InMemoryAuthRepository>,
        ));

    (auth_router(state).merge(operator_only), repo)
}

fn app() -> (Router, InMemoryAuthRepository) {
    app_with(test_config())
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_cookie(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn set_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()
        .unwrap()
        .to_string()
}

/// `session=<token>` pair from a Set-Cookie value
fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().to_string()
}

async fn register(app: &Router, user_name: &str, password: &str) -> Response<Body> {
    let body = format!("username={user_name}&password={password}");
    app.clone().oneshot(form_post("/register", &body)).await.unwrap()
}

async fn login(app: &Router, user_name: &str, password: &str) -> Response<Body> {
    let body = format!("username={user_name}&password={password}");
    app.clone().oneshot(form_post("/login", &body)).await.unwrap()
}

// ============================================================================
// Register
// ============================================================================

#[tokio::test]
async fn test_register_success() {
    let (app, repo) = app();
    let response = register(&app, "alice", "S3cret%21").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "register success");

    let alice = UserName::new("alice").unwrap();
    assert!(repo.find_by_user_name(&alice).await.unwrap().is_some());
}

#[tokio::test]
async fn test_register_missing_fields() {
    let (app, _) = app();
    for body in ["username=alice", "password=x", "", "username=&password="] {
        let response = app
            .clone()
            .oneshot(form_post("/register", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body:?}");
    }
}

#[tokio::test]
async fn test_register_wrong_content_type() {
    let (app, _) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"username":"alice","password":"x"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_concurrent_registrations() {
    const N: usize = 8;
    let (app, repo) = app();

    let tasks: Vec<_> = (0..N)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let body = format!("username=user{i}&password=pw{i}");
                app.oneshot(form_post("/register", &body)).await.unwrap().status()
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }

    assert_eq!(repo.identity_count().await, N);
    for i in 0..N {
        let user_name = UserName::new(&format!("user{i}")).unwrap();
        assert!(repo.find_by_user_name(&user_name).await.unwrap().is_some());
    }
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let (app, _) = app();
    register(&app, "alice", "S3cret%21").await;

    let response = login(&app, "alice", "S3cret%21").await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=600"));
    assert!(cookie.contains("Expires="));

    assert_eq!(body_string(response).await, "login success");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (app, _) = app();
    register(&app, "alice", "S3cret%21").await;

    let wrong = login(&app, "alice", "wrong").await;
    let unknown = login(&app, "mallory", "S3cret%21").await;
    let empty = app
        .clone()
        .oneshot(form_post("/login", "username=alice"))
        .await
        .unwrap();

    for response in [wrong, unknown, empty] {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(body_string(response).await, "invalid credentials");
    }
}

// ============================================================================
// Session lifecycle
// ============================================================================

#[tokio::test]
async fn test_session_status_and_logout() {
    let (app, _) = app();
    register(&app, "alice", "S3cret%21").await;
    let cookie = cookie_pair(&set_cookie(&login(&app, "alice", "S3cret%21").await));

    let response = app
        .clone()
        .oneshot(get_with_cookie("/session", Some(&cookie)))
        .await
        .unwrap();
    let status: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(status["authenticated"], true);
    assert_eq!(status["userName"], "alice");
    assert!(status["expiresAtMs"].as_i64().unwrap() > chrono::Utc::now().timestamp_millis());

    let logout = Request::builder()
        .method("POST")
        .uri("/logout")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(logout).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(set_cookie(&response).contains("Max-Age=0"));

    let response = app
        .clone()
        .oneshot(get_with_cookie("/session", Some(&cookie)))
        .await
        .unwrap();
    let status: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(status["authenticated"], false);
    assert!(status["userName"].is_null());
}

#[tokio::test]
async fn test_logout_without_cookie() {
    let (app, _) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/logout")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ============================================================================
// Operator gate
// ============================================================================

#[tokio::test]
async fn test_operator_gate_without_session() {
    let (app, _) = app();

    let response = app
        .clone()
        .oneshot(get_with_cookie("/ops", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(get_with_cookie("/ops", Some("session=forged.token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_operator_gate_rejects_non_operator() {
    let (app, _) = app();
    register(&app, "alice", "S3cret%21").await;
    let cookie = cookie_pair(&set_cookie(&login(&app, "alice", "S3cret%21").await));

    let response = app
        .oneshot(get_with_cookie("/ops", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_operator_gate_admits_operator() {
    let (app, _) = app();
    register(&app, "root", "toor").await;
    let cookie = cookie_pair(&set_cookie(&login(&app, "root", "toor").await));

    let response = app
        .oneshot(get_with_cookie("/ops", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "hello root");
}

#[tokio::test]
async fn test_session_from_other_instance_rejected() {
    let (app_a, _) = app();
    let (app_b, _) = app();
    register(&app_a, "root", "toor").await;
    let cookie = cookie_pair(&set_cookie(&login(&app_a, "root", "toor").await));

    let response = app_b
        .oneshot(get_with_cookie("/ops", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
