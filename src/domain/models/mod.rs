//! Domain Models
//!
//! Pure domain types: sessions, gate policies, and proxy route descriptions.

pub mod forward_request;
pub mod proxy_route;
pub mod route_policy;
pub mod session;

pub use forward_request::{ForwardRequest, UpstreamCall, UpstreamResponse};
pub use proxy_route::{HttpVerb, ProxyRoute, UpstreamBase, PROXY_ROUTES};
pub use route_policy::{GateDecision, PathPattern, PolicyTable, RoutePolicy};
pub use session::{AccessToken, Session};
