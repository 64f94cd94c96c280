//! Data Transfer Objects for API requests and responses.
//!
//! Inbound DTOs use Serde for JSON deserialization and validator for
//! constraints; outbound RDOs are projected from domain entities with `From`.
//! JSON field names are camelCase.

pub mod comment;
pub mod health;
pub mod offer;
pub mod user;
