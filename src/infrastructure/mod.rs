//! Infrastructure Layer
//!
//! Contains all external concerns: driving adapters (HTTP handlers) and
//! driven adapters (configuration, session verification, upstream client).

pub mod driven_adapters;
pub mod driving_adapters;
