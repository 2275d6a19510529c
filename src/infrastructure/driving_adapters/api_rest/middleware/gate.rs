//! Edge Auth Gate Middleware
//!
//! Redirects page requests according to the gate policy table.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::application::use_cases::gate::GateOutcome;
use crate::infrastructure::driving_adapters::api_rest::middleware::session::session_from_headers;
use crate::infrastructure::driving_adapters::api_rest::AppState;

/// Middleware applying the edge auth gate to every request
///
/// Paths the policy table marks as bypassed (API, assets, health) pass
/// through untouched.
pub async fn auth_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let has_session = session_from_headers(&state, request.headers()).is_some();
    let outcome = state.evaluate_gate_use_case.execute(
        request.uri().path(),
        request.uri().query(),
        has_session,
    );

    match outcome {
        GateOutcome::Allow => next.run(request).await,
        GateOutcome::Redirect(location) => Redirect::temporary(&location).into_response(),
    }
}
