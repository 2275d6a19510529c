//! End-to-end tests for the edge auth gate
//!
//! Page requests are checked against the gate policy table; allowed pages
//! are served through a `wiremock` UI renderer.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use wiremock::matchers::{header as header_eq, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{generate_expired_token, generate_session_token, json_body, session_cookie, TestApp};

fn page(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn page_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, session_cookie(token))
        .body(Body::empty())
        .unwrap()
}

fn location(response: &axum::http::Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn mount_page(app: &TestApp, page_path: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/ui{page_path}")))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html"))
        .mount(&app.upstream)
        .await;
}

// ============================================================================
// Unauthenticated requests
// ============================================================================

#[tokio::test]
async fn test_protected_pages_without_session_redirect_to_login() {
    let app = TestApp::new().await;

    for (uri, expected) in [
        ("/", "/login?callbackUrl=%2F"),
        ("/dashboard", "/login?callbackUrl=%2Fdashboard"),
        ("/projects/3/board", "/login?callbackUrl=%2Fprojects%2F3%2Fboard"),
        ("/sprints?active=true", "/login?callbackUrl=%2Fsprints%3Factive%3Dtrue"),
        ("/approvals/leaves", "/login?callbackUrl=%2Fapprovals%2Fleaves"),
    ] {
        let response = app.send(page(uri)).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{uri}");
        assert_eq!(location(&response), expected, "{uri}");
    }

    assert!(app.upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_expired_session_redirects_to_login() {
    let app = TestApp::new().await;

    let response = app.send(page_with_token("/tasks", &generate_expired_token())).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert!(location(&response).starts_with("/login"));
}

#[tokio::test]
async fn test_missing_secret_treats_tokens_as_absent() {
    let app = TestApp::without_secret().await;

    let response = app.send(page_with_token("/dashboard", &generate_session_token())).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert!(location(&response).starts_with("/login"));
}

#[tokio::test]
async fn test_login_and_register_are_served_without_session() {
    let app = TestApp::new().await;
    mount_page(&app, "/login").await;
    mount_page(&app, "/register").await;

    for uri in ["/login", "/register"] {
        let response = app.send(page(uri)).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "text/html");
    }
}

// ============================================================================
// Authenticated requests
// ============================================================================

#[tokio::test]
async fn test_login_with_session_redirects_to_landing() {
    let app = TestApp::new().await;

    let response = app.send(page_with_token("/login", &generate_session_token())).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_register_with_session_is_allowed() {
    let app = TestApp::new().await;
    mount_page(&app, "/register").await;

    let response = app.send(page_with_token("/register", &generate_session_token())).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_page_with_session_is_served_with_cookie() {
    let app = TestApp::new().await;
    let token = generate_session_token();
    Mock::given(method("GET"))
        .and(path("/ui/projects/3/board"))
        .and(header_eq("cookie", session_cookie(&token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>board</html>", "text/html"))
        .expect(1)
        .mount(&app.upstream)
        .await;

    let response = app.send(page_with_token("/projects/3/board", &token)).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_renderer_errors_are_relayed_verbatim() {
    let app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/ui/teams"))
        .respond_with(ResponseTemplate::new(500).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&app.upstream)
        .await;

    let response = app.send(page_with_token("/teams", &generate_session_token())).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "text/html");
}

#[tokio::test]
async fn test_renderer_redirects_keep_location_and_cookies() {
    let app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/ui/projects"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", "/projects/1")
                .append_header("set-cookie", "last-project=1; Path=/")
                .append_header("set-cookie", "theme=dark; Path=/"),
        )
        .expect(1)
        .mount(&app.upstream)
        .await;

    let response = app.send(page_with_token("/projects", &generate_session_token())).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/projects/1");
    let cookies: Vec<_> = response.headers().get_all(header::SET_COOKIE).iter().collect();
    assert_eq!(cookies, ["last-project=1; Path=/", "theme=dark; Path=/"]);
}

#[tokio::test]
async fn test_head_page_is_forwarded_as_head() {
    let app = TestApp::new().await;
    Mock::given(method("HEAD"))
        .and(path("/ui/dashboard"))
        .respond_with(ResponseTemplate::new(200).insert_header("etag", "\"page-v3\""))
        .expect(1)
        .mount(&app.upstream)
        .await;

    let request = Request::builder()
        .method("HEAD")
        .uri("/dashboard")
        .header(header::COOKIE, session_cookie(&generate_session_token()))
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::ETAG).unwrap(), "\"page-v3\"");
}

#[tokio::test]
async fn test_allowed_page_without_renderer_is_not_found() {
    let app = TestApp::without_frontend().await;

    let response = app.send(page_with_token("/dashboard", &generate_session_token())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Bypassed paths
// ============================================================================

#[tokio::test]
async fn test_health_bypasses_gate() {
    let app = TestApp::new().await;

    let response = app.send(page("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn test_api_paths_are_not_redirected() {
    let app = TestApp::new().await;

    let response = app.send(page("/api/v2/dashboard")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::LOCATION).is_none());
}

#[tokio::test]
async fn test_redirects_carry_request_id() {
    let app = TestApp::new().await;

    let response = app.send(page("/dashboard")).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert!(response.headers().get("x-request-id").is_some());
}
