//! HTTP Upstream Client
//!
//! `reqwest`-backed implementation of the upstream client gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderName, CONNECTION, CONTENT_LENGTH, CONTENT_TYPE, PROXY_AUTHENTICATE,
    PROXY_AUTHORIZATION, TE, TRAILER, TRANSFER_ENCODING, UPGRADE,
};
use reqwest::{Client, Method};

use crate::domain::gateways::UpstreamClient;
use crate::domain::models::forward_request::{UpstreamCall, UpstreamResponse};
use crate::domain::models::proxy_route::HttpVerb;
use crate::shared::errors::ProxyError;

impl From<HttpVerb> for Method {
    fn from(verb: HttpVerb) -> Self {
        match verb {
            HttpVerb::Get => Method::GET,
            HttpVerb::Head => Method::HEAD,
            HttpVerb::Post => Method::POST,
            HttpVerb::Put => Method::PUT,
            HttpVerb::Patch => Method::PATCH,
            HttpVerb::Delete => Method::DELETE,
        }
    }
}

/// Upstream client over a pooled `reqwest::Client`
#[derive(Clone)]
pub struct HttpUpstreamClient {
    client: Client,
}

impl HttpUpstreamClient {
    /// Build a client whose calls time out after `timeout_secs`
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            // Redirects are relayed to the caller, not followed
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self { client })
    }
}

/// Headers that describe the upstream connection rather than the response
const HOP_BY_HOP: [HeaderName; 8] = [
    CONNECTION,
    PROXY_AUTHENTICATE,
    PROXY_AUTHORIZATION,
    TE,
    TRAILER,
    TRANSFER_ENCODING,
    UPGRADE,
    // Recomputed from the relayed body
    CONTENT_LENGTH,
];

fn end_to_end_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter(|(name, _)| !HOP_BY_HOP.contains(*name) && name.as_str() != "keep-alive")
        .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
        .collect()
}

fn map_transport_error(err: &reqwest::Error) -> ProxyError {
    if err.is_timeout() {
        ProxyError::UpstreamTimeout
    } else {
        ProxyError::UpstreamUnreachable(err.to_string())
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn send(&self, call: UpstreamCall) -> Result<UpstreamResponse, ProxyError> {
        let mut request = self.client.request(call.method.into(), &call.url);
        for (name, value) in &call.headers {
            request = request.header(name, value);
        }
        if let Some(body) = call.body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(url = %call.url, error = %e, "Upstream request failed");
            map_transport_error(&e)
        })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let headers = end_to_end_headers(response.headers());
        let body = response
            .bytes()
            .await
            .map_err(|e| map_transport_error(&e))?
            .to_vec();

        tracing::debug!(url = %call.url, status, "Upstream responded");

        Ok(UpstreamResponse {
            status,
            content_type,
            headers,
            body,
        })
    }
}
