//! REST API Module
//!
//! Contains HTTP handlers and middleware for the gateway, and the router
//! wiring them together.

pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::{middleware as axum_middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::application::use_cases::{EvaluateGateUseCase, ForwardRequestUseCase};
use crate::domain::gateways::{SessionVerifier, UpstreamClient};
use crate::infrastructure::driven_adapters::config::AppConfig;
use crate::infrastructure::driven_adapters::jwt_session::JwtSessionVerifier;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub session_verifier: Arc<dyn SessionVerifier>,
    pub evaluate_gate_use_case: Arc<EvaluateGateUseCase>,
    pub forward_request_use_case: Arc<ForwardRequestUseCase>,
}

impl AppState {
    /// Wire the use cases for a configuration and an upstream transport
    #[must_use]
    pub fn new(config: AppConfig, upstream_client: Arc<dyn UpstreamClient>) -> Self {
        let session_verifier = Arc::new(JwtSessionVerifier::new(&config.session));
        let evaluate_gate_use_case = Arc::new(EvaluateGateUseCase::new(
            config.gate.policy_table(),
            config.gate.callback_param.clone(),
        ));
        let forward_request_use_case = Arc::new(ForwardRequestUseCase::new(
            upstream_client,
            config.upstream.origins(),
        ));

        Self {
            config: Arc::new(config),
            session_verifier,
            evaluate_gate_use_case,
            forward_request_use_case,
        }
    }
}

/// Build the full gateway router
///
/// Layers, outermost first: CORS, HTTP tracing, request ID, edge auth gate.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.allowed_origins);

    Router::new()
        .merge(handlers::proxy::router())
        .route("/health", get(handlers::health::health))
        .fallback(handlers::pages::serve_page)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::gate::auth_gate,
        ))
        .layer(axum_middleware::from_fn(middleware::request_id::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
