//! Domain Layer
//!
//! Contains the gate and routing rules, domain models, and gateway traits (ports).
//! This layer has no dependencies on infrastructure.

pub mod gateways;
pub mod models;

pub use gateways::{SessionVerifier, UpstreamClient};
pub use models::{
    ForwardRequest, GateDecision, HttpVerb, PolicyTable, ProxyRoute, RoutePolicy, Session,
    UpstreamBase, UpstreamCall, UpstreamResponse,
};
