//! Driving Adapters
//!
//! Entry points that drive the application:
//! - HTTP routes, handlers and middleware

pub mod api_rest;
