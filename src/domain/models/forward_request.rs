//! Forward Request Domain Model
//!
//! Describes one call to forward upstream, and the outbound call and
//! response shapes exchanged with the upstream client.

use serde_json::Value;

use super::proxy_route::{HttpVerb, UpstreamBase};

/// A request to forward to an upstream path
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub base: UpstreamBase,
    pub method: HttpVerb,
    /// Upstream path, starting with `/`
    pub path: String,
    /// Raw query string, without the leading `?`
    pub query: Option<String>,
    pub body: Option<Value>,
    pub extra_headers: Vec<(String, String)>,
    pub forward_client_ip: bool,
    pub requires_auth: bool,
}

impl ForwardRequest {
    /// Create a request with no body that requires auth
    #[must_use]
    pub fn new(base: UpstreamBase, method: HttpVerb, path: impl Into<String>) -> Self {
        Self {
            base,
            method,
            path: path.into(),
            query: None,
            body: None,
            extra_headers: Vec::new(),
            forward_client_ip: false,
            requires_auth: true,
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query.filter(|q| !q.is_empty());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn forward_client_ip(mut self, forward: bool) -> Self {
        self.forward_client_ip = forward;
        self
    }

    #[must_use]
    pub fn requires_auth(mut self, requires: bool) -> Self {
        self.requires_auth = requires;
        self
    }
}

/// A fully resolved outbound HTTP call
#[derive(Debug, Clone)]
pub struct UpstreamCall {
    pub method: HttpVerb,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl UpstreamCall {
    /// Look up a header value by case-insensitive name
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Upstream response as received, whatever its status
#[derive(Debug, Clone, Default)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    /// End-to-end response headers, in upstream order, repeats kept
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn is_redirection(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// Look up the first header value with a case-insensitive name
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Extract a human-readable error message from the body
    ///
    /// Tries a JSON object's `message` then `error` field, then a bare JSON
    /// string, then the raw text. Falls back to `fallback` for empty bodies.
    #[must_use]
    pub fn error_message(&self, fallback: &str) -> String {
        if let Ok(json) = serde_json::from_slice::<Value>(&self.body) {
            match &json {
                Value::Object(map) => {
                    for key in ["message", "error"] {
                        match map.get(key) {
                            Some(Value::String(s)) if !s.is_empty() => return s.clone(),
                            Some(Value::Object(inner)) => {
                                if let Some(Value::String(s)) = inner.get("message") {
                                    return s.clone();
                                }
                            }
                            _ => {}
                        }
                    }
                }
                Value::String(s) if !s.is_empty() => return s.clone(),
                _ => {}
            }
        }

        let text = String::from_utf8_lossy(&self.body).trim().to_string();
        if text.is_empty() {
            fallback.to_string()
        } else {
            text
        }
    }
}
