//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one aggregate. Route guards run before
//! the handlers, so handlers only see authenticated callers, well-formed ids
//! and validated DTOs where their routes require them.

pub mod comments;
pub mod health;
pub mod offers;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

pub use health::health_handler;
