//! API Middleware
//!
//! Session extraction, the edge auth gate, and request correlation.

pub mod client_ip;
pub mod gate;
pub mod request_id;
pub mod session;

pub use client_ip::ClientIp;
pub use gate::auth_gate;
pub use request_id::{request_id_middleware, RequestId};
pub use session::MaybeSession;
