//! HTTP Handlers

pub mod health;
pub mod pages;
pub mod proxy;
