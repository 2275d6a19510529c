#![allow(dead_code)]

//! Common test utilities for e2e tests
//!
//! Provides a gateway router wired to a `wiremock` upstream, plus helpers
//! for minting session tokens and sending requests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tower::util::ServiceExt;
use wiremock::MockServer;

use taskboard_gateway::infrastructure::driven_adapters::config::AppConfig;
use taskboard_gateway::infrastructure::driven_adapters::http_upstream::HttpUpstreamClient;
use taskboard_gateway::infrastructure::driving_adapters::api_rest::{self, AppState};

/// Test session secret
pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-e2e-testing-only";

/// Upstream access token carried by test sessions
pub const TEST_ACCESS_TOKEN: &str = "upstream-access-token-123";

/// Session claims for test tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct TestClaims {
    pub sub: String,
    pub email: String,
    pub access_token: String,
    pub iat: i64,
    pub exp: i64,
}

/// Test application context
pub struct TestApp {
    pub router: Router,
    pub upstream: MockServer,
}

impl TestApp {
    /// Gateway whose upstreams all point at a fresh mock server
    pub async fn new() -> Self {
        Self::with_options(true, true).await
    }

    /// Gateway without a session secret
    pub async fn without_secret() -> Self {
        Self::with_options(false, true).await
    }

    /// Gateway without a UI renderer
    pub async fn without_frontend() -> Self {
        Self::with_options(true, false).await
    }

    async fn with_options(with_secret: bool, with_frontend: bool) -> Self {
        let upstream = MockServer::start().await;
        let config = create_test_config(&upstream.uri(), with_secret, with_frontend);
        let client = HttpUpstreamClient::new(config.upstream.timeout_secs)
            .expect("Failed to build upstream client");
        let router = api_rest::router(AppState::new(config, Arc::new(client)));

        Self { router, upstream }
    }

    /// Gateway whose upstreams point at a closed port
    pub fn unreachable() -> Router {
        let config = create_test_config("http://127.0.0.1:9", true, false);
        let client = HttpUpstreamClient::new(config.upstream.timeout_secs)
            .expect("Failed to build upstream client");
        api_rest::router(AppState::new(config, Arc::new(client)))
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        send(&self.router, request).await
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("Router should not fail")
}

/// Read a response body as JSON
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&body).expect("Body is not JSON")
}

/// Create a test configuration
fn create_test_config(upstream: &str, with_secret: bool, with_frontend: bool) -> AppConfig {
    let secret = if with_secret { TEST_SESSION_SECRET } else { "" };
    let frontend = if with_frontend {
        format!(r#"frontend_url = "{upstream}/ui""#)
    } else {
        String::new()
    };

    let config_str = format!(
        r#"
[server]
host = "127.0.0.1"
port = 0

[upstream]
base_url = "{upstream}/api"
base_v2_url = "{upstream}/api/v2"
{frontend}
timeout_secs = 5

[session]
secret = "{secret}"
cookie_name = "session-token"

[gate]
login_path = "/login"
register_path = "/register"
landing_path = "/dashboard"
callback_param = "callbackUrl"
"#
    );

    AppConfig::from_toml(&config_str).expect("Failed to build test config")
}

/// Generate a valid session token for testing
pub fn generate_session_token() -> String {
    token_with_expiry(3600)
}

/// Generate an expired session token for testing unauthenticated scenarios
pub fn generate_expired_token() -> String {
    token_with_expiry(-7200)
}

fn token_with_expiry(offset_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = TestClaims {
        sub: "test-user-id".to_string(),
        email: "test@example.com".to_string(),
        access_token: TEST_ACCESS_TOKEN.to_string(),
        iat: now,
        exp: now + offset_secs,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SESSION_SECRET.as_bytes()),
    )
    .expect("Failed to generate test session token")
}

/// `Cookie` header value carrying a session token
pub fn session_cookie(token: &str) -> String {
    format!("session-token={token}")
}
