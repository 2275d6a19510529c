//! Taskboard Gateway
//!
//! Backend-for-frontend layer of the taskboard web application: an edge
//! auth gate for pages and a pass-through proxy for API calls, following
//! Clean/Hexagonal Architecture principles.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
