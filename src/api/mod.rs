//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into service calls and projects the
//! results into response objects.
//!
//! # Modules
//!
//! - [`dto`] - Request DTOs and response RDOs
//! - [`handlers`] - HTTP request handlers, one module per aggregate
//! - [`middleware`] - Authentication, route guards, rate limiting and tracing
//! - [`routes`] - Route tables and guard chains

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
