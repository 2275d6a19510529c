//! Gateway Traits (Ports)
//!
//! Abstract interfaces defining contracts for external dependencies.
//! These are implemented by driven adapters in the infrastructure layer.

pub mod session_verifier;
pub mod upstream_client;

pub use session_verifier::SessionVerifier;
pub use upstream_client::UpstreamClient;
