//! # Bomato API
//!
//! HTTP surface of the Bomato auth subsystem: routes under `/api/auth`,
//! request middleware and the application factory used by the binary and
//! the integration tests.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
