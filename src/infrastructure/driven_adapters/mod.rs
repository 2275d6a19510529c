//! Driven Adapters
//!
//! Implementations of gateway traits for external systems:
//! - Configuration
//! - Session token verification
//! - Upstream HTTP client

pub mod config;
pub mod http_upstream;
pub mod jwt_session;

pub use config::AppConfig;
pub use http_upstream::HttpUpstreamClient;
pub use jwt_session::JwtSessionVerifier;
