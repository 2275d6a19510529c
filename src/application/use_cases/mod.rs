//! Use Cases
//!
//! Application-specific rules.
//! Each use case is a single-purpose struct with an execute() method.

pub mod forward;
pub mod gate;

pub use forward::{CallerContext, ForwardRequestUseCase, UpstreamOrigins};
pub use gate::{EvaluateGateUseCase, GateOutcome};
