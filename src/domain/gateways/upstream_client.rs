//! Upstream Client Gateway
//!
//! Abstract trait defining the contract for issuing calls to the upstream service.

use async_trait::async_trait;

use crate::domain::models::forward_request::{UpstreamCall, UpstreamResponse};
use crate::shared::errors::ProxyError;

/// Transport used to reach the upstream service
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Issue a single call and return the upstream response whatever its status
    ///
    /// Only transport failures are errors here; mapping non-success statuses
    /// is left to the caller.
    async fn send(&self, call: UpstreamCall) -> Result<UpstreamResponse, ProxyError>;
}
