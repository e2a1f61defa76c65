//! # api-adapters
//!
//! HTTP surface of the moments services: wire DTOs, metrics, and (feature
//! `web-axum`) the public and admin routers.

pub mod dto;
pub mod metrics;
#[cfg(feature = "web-axum")]
pub mod web;

pub use metrics::Metrics;
