//! HTTP API: configuration, routing, and request/response mapping for the
//! storefront catalog.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
