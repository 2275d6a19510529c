//! Page Handler
//!
//! Fallback for every path without an API route. Pages the gate allowed are
//! forwarded to the UI renderer and relayed verbatim.

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, Uri},
    response::Response,
    Extension,
};

use crate::application::use_cases::forward::CallerContext;
use crate::domain::models::forward_request::ForwardRequest;
use crate::domain::models::proxy_route::{HttpVerb, UpstreamBase};
use crate::infrastructure::driving_adapters::api_rest::handlers::proxy::relay_response;
use crate::infrastructure::driving_adapters::api_rest::middleware::{ClientIp, RequestId};
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// Headers passed through to the UI renderer
const FORWARDED_HEADERS: [header::HeaderName; 3] =
    [header::COOKIE, header::ACCEPT, header::ACCEPT_LANGUAGE];

/// GET/HEAD * - Serve a page through the UI renderer
///
/// # Responses
///
/// * Whatever the renderer answers, status and body intact
/// * 404 Not Found - No renderer configured, the path is under `/api`, or the method is not GET/HEAD
pub async fn serve_page(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    request_id: Option<Extension<RequestId>>,
    ClientIp(client_ip): ClientIp,
) -> Result<Response, ApiError> {
    let path = uri.path();
    let verb = match HttpVerb::parse(method.as_str()) {
        Some(verb @ (HttpVerb::Get | HttpVerb::Head)) => verb,
        _ => return Err(ApiError::NotFound(path.to_string())),
    };

    let origins = state.forward_request_use_case.origins();
    if origins.base_for(UpstreamBase::Frontend).is_none() || path == "/api" || path.starts_with("/api/") {
        return Err(ApiError::NotFound(path.to_string()));
    }

    let mut request = ForwardRequest::new(UpstreamBase::Frontend, verb, path)
        .with_query(uri.query().map(str::to_string))
        .requires_auth(false)
        .forward_client_ip(true);
    for name in &FORWARDED_HEADERS {
        if let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) {
            request = request.with_header(name.as_str(), value);
        }
    }

    let caller = CallerContext {
        session: None,
        client_ip,
        request_id: request_id.map(|Extension(id)| id.0),
    };

    let response = state.forward_request_use_case.relay(request, &caller).await?;
    Ok(relay_response(response))
}
