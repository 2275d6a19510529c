//! Proxy Handlers
//!
//! One route per entry of the proxy route table. Each forwards the inbound
//! request to its upstream path and relays the answer.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{MethodFilter, MethodRouter},
    Extension, Router,
};
use serde_json::Value;

use crate::application::use_cases::forward::CallerContext;
use crate::domain::models::forward_request::{ForwardRequest, UpstreamResponse};
use crate::domain::models::proxy_route::{HttpVerb, ProxyRoute, PROXY_ROUTES};
use crate::infrastructure::driving_adapters::api_rest::middleware::{ClientIp, MaybeSession, RequestId};
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::{ApiError, ProxyError};

/// Create the router for every proxied API route
pub fn router() -> Router<AppState> {
    PROXY_ROUTES
        .iter()
        .fold(Router::new(), |router, route| router.route(route.inbound, method_router(route)))
}

/// One handler per allowed verb; other methods get 405 from the method router
fn method_router(route: &'static ProxyRoute) -> MethodRouter<AppState> {
    route.verbs.iter().fold(MethodRouter::new(), |methods, &verb| {
        methods.on(
            method_filter(verb),
            move |State(state): State<AppState>,
                  uri: Uri,
                  request_id: Option<Extension<RequestId>>,
                  MaybeSession(session): MaybeSession,
                  ClientIp(client_ip): ClientIp,
                  body: Bytes| async move {
                let caller = CallerContext {
                    session,
                    client_ip,
                    request_id: request_id.map(|Extension(id)| id.0),
                };
                forward(route, verb, &state, &uri, caller, body).await
            },
        )
    })
}

fn method_filter(verb: HttpVerb) -> MethodFilter {
    match verb {
        HttpVerb::Get => MethodFilter::GET,
        HttpVerb::Head => MethodFilter::HEAD,
        HttpVerb::Post => MethodFilter::POST,
        HttpVerb::Put => MethodFilter::PUT,
        HttpVerb::Patch => MethodFilter::PATCH,
        HttpVerb::Delete => MethodFilter::DELETE,
    }
}

async fn forward(
    route: &'static ProxyRoute,
    verb: HttpVerb,
    state: &AppState,
    uri: &Uri,
    caller: CallerContext,
    body: Bytes,
) -> Result<Response, ApiError> {
    let upstream_path = route
        .upstream_path(uri.path())
        .ok_or_else(|| ApiError::NotFound(uri.path().to_string()))?;

    let request = ForwardRequest::new(route.base, verb, upstream_path)
        .with_query(uri.query().map(str::to_string))
        .with_body(parse_json_body(&body)?)
        .requires_auth(route.requires_auth)
        .forward_client_ip(route.forward_client_ip);

    let response = state
        .forward_request_use_case
        .execute(request, &caller)
        .await?;

    Ok(relay_response(response))
}

/// Empty bodies are absent; anything else must be JSON
fn parse_json_body(body: &Bytes) -> Result<Option<Value>, ProxyError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| ProxyError::BadRequest(format!("Request body must be valid JSON: {e}")))
}

/// Turn an upstream response into an outbound response
///
/// Status, body and end-to-end headers are kept, so redirects keep their
/// `Location` and every `Set-Cookie` survives.
pub(crate) fn relay_response(upstream: UpstreamResponse) -> Response {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut response = (status, Body::from(upstream.body)).into_response();
    let headers = response.headers_mut();

    for (name, value) in &upstream.headers {
        match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                headers.append(name, value);
            }
            _ => tracing::debug!(header = %name, "Dropping unrepresentable upstream header"),
        }
    }
    if !headers.contains_key(CONTENT_TYPE) {
        if let Some(content_type) = upstream.content_type.and_then(|ct| ct.parse().ok()) {
            headers.insert(CONTENT_TYPE, content_type);
        }
    }
    response
}
