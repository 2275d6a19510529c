//! Forward Request Use Case
//!
//! Builds the outbound upstream call for a forward request and normalizes
//! the upstream's answer.

use std::sync::Arc;

use crate::domain::gateways::UpstreamClient;
use crate::domain::models::forward_request::{ForwardRequest, UpstreamCall, UpstreamResponse};
use crate::domain::models::proxy_route::UpstreamBase;
use crate::domain::models::session::Session;
use crate::shared::errors::ProxyError;

/// Header carrying the request correlation ID upstream
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Resolved upstream origins
#[derive(Debug, Clone)]
pub struct UpstreamOrigins {
    pub v1: String,
    pub v2: String,
    pub frontend: Option<String>,
    pub client_ip_header: String,
}

impl UpstreamOrigins {
    /// Base URL for an upstream, without a trailing slash
    #[must_use]
    pub fn base_for(&self, base: UpstreamBase) -> Option<&str> {
        let url = match base {
            UpstreamBase::V1 => Some(self.v1.as_str()),
            UpstreamBase::V2 => Some(self.v2.as_str()),
            UpstreamBase::Frontend => self.frontend.as_deref(),
        }?;
        let url = url.trim_end_matches('/');
        (!url.is_empty()).then_some(url)
    }
}

/// Who is calling: derived from the inbound request
#[derive(Debug, Clone, Default)]
pub struct CallerContext {
    pub session: Option<Session>,
    pub client_ip: Option<String>,
    pub request_id: Option<String>,
}

/// Use case for forwarding a request to the upstream service
pub struct ForwardRequestUseCase {
    upstream_client: Arc<dyn UpstreamClient>,
    origins: UpstreamOrigins,
}

impl ForwardRequestUseCase {
    /// Create a new ForwardRequestUseCase
    #[must_use]
    pub fn new(upstream_client: Arc<dyn UpstreamClient>, origins: UpstreamOrigins) -> Self {
        Self {
            upstream_client,
            origins,
        }
    }

    #[must_use]
    pub fn origins(&self) -> &UpstreamOrigins {
        &self.origins
    }

    /// Resolve the outbound call for a forward request
    ///
    /// # Errors
    ///
    /// Returns `ProxyError::Configuration` if the upstream base is not configured.
    /// Returns `ProxyError::Unauthorized` if auth is required and there is no session.
    /// Returns `ProxyError::BadRequest` if the body cannot be serialized.
    pub fn build_call(
        &self,
        request: ForwardRequest,
        caller: &CallerContext,
    ) -> Result<UpstreamCall, ProxyError> {
        let base = self.origins.base_for(request.base).ok_or_else(|| {
            ProxyError::Configuration(format!("no base URL configured for {:?}", request.base))
        })?;

        let mut url = format!("{base}{}", request.path);
        if let Some(query) = &request.query {
            url.push('?');
            url.push_str(query);
        }

        let mut headers = vec![("content-type".to_string(), "application/json".to_string())];

        if request.requires_auth {
            let session = caller
                .session
                .as_ref()
                .ok_or_else(|| ProxyError::Unauthorized("A valid session is required".to_string()))?;
            headers.push(("authorization".to_string(), session.access_token().bearer()));
        }

        if request.forward_client_ip {
            if let Some(ip) = &caller.client_ip {
                headers.push((self.origins.client_ip_header.clone(), ip.clone()));
            }
        }

        if let Some(request_id) = &caller.request_id {
            headers.push((REQUEST_ID_HEADER.to_string(), request_id.clone()));
        }

        headers.extend(request.extra_headers);

        let body = request
            .body
            .as_ref()
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| ProxyError::BadRequest(format!("body is not serializable: {e}")))?;

        Ok(UpstreamCall {
            method: request.method,
            url,
            headers,
            body,
        })
    }

    /// Forward and return the upstream response on success or redirection
    ///
    /// Redirects are not followed; they reach the caller with their
    /// `Location` intact.
    ///
    /// # Errors
    ///
    /// Returns `ProxyError::Upstream` carrying the upstream status and message
    /// when the upstream answers with a 4xx or 5xx status, and transport
    /// errors from the upstream client as-is.
    pub async fn execute(
        &self,
        request: ForwardRequest,
        caller: &CallerContext,
    ) -> Result<UpstreamResponse, ProxyError> {
        let method = request.method;
        let response = self.relay(request, caller).await?;

        if response.is_success() || response.is_redirection() {
            return Ok(response);
        }

        let reason = axum::http::StatusCode::from_u16(response.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Upstream error");
        let message = response.error_message(reason);
        tracing::debug!(%method, status = response.status, %message, "Upstream returned error");

        Err(ProxyError::Upstream {
            status_code: response.status,
            message,
        })
    }

    /// Forward and return the upstream response whatever its status
    ///
    /// # Errors
    ///
    /// Returns errors from [`Self::build_call`] and transport errors.
    pub async fn relay(
        &self,
        request: ForwardRequest,
        caller: &CallerContext,
    ) -> Result<UpstreamResponse, ProxyError> {
        let call = self.build_call(request, caller)?;
        tracing::debug!(method = %call.method, url = %call.url, "Forwarding request upstream");
        self.upstream_client.send(call).await
    }
}
