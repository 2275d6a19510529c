//! Application Layer
//!
//! Contains the use cases behind the auth gate and the request proxy.
//! Use cases depend on domain gateways (abstractions), not concrete implementations.

pub mod use_cases;
