//! Session Extraction
//!
//! Reads the session token from the session cookie or a bearer header and
//! validates it through the configured session verifier.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        HeaderMap,
    },
};
use std::convert::Infallible;

use crate::domain::models::session::Session;
use crate::infrastructure::driving_adapters::api_rest::AppState;

/// Optional session of the caller; `None` when absent or invalid
pub struct MaybeSession(pub Option<Session>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(session_from_headers(state, &parts.headers)))
    }
}

/// Resolve and verify the session carried by a request's headers
#[must_use]
pub fn session_from_headers(state: &AppState, headers: &HeaderMap) -> Option<Session> {
    let token = extract_session_token(headers, &state.config.session.cookie_name)?;
    state.session_verifier.verify(&token)
}

/// Find the raw session token, preferring the session cookie over a bearer header
#[must_use]
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    extract_cookie(headers, cookie_name).or_else(|| extract_bearer_token(headers))
}

fn extract_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            let val = val.trim();
            (key.trim() == cookie_name && !val.is_empty()).then(|| val.to_string())
        })
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();
    (!token.is_empty()).then(|| token.to_string())
}
