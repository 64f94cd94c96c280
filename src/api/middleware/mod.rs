//! HTTP middleware for request processing and protection.
//!
//! Route guards run in the order they are declared on a route and either pass
//! the request on or terminate it with an [`AppError`](crate::error::AppError):
//!
//! - [`authenticate`] - attaches the caller decoded from a Bearer token (global)
//! - [`private_route`] - rejects requests without an authenticated caller
//! - [`validate_dto`] - parses and validates a JSON body into a typed DTO
//! - [`validate_object_id`] - checks that a path parameter is a valid id
//! - [`document_exists`] - checks that the referenced aggregate exists
//!
//! Plus the transport layers: [`rate_limit`] and [`tracing`].

pub mod authenticate;
pub mod document_exists;
pub mod private_route;
pub mod rate_limit;
pub mod tracing;
pub mod validate_dto;
pub mod validate_object_id;

pub use authenticate::AuthUser;
pub use document_exists::DocumentExistsGuard;
