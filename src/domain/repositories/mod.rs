//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Accounts and their favourite offers
//! - [`OfferRepository`] - Rental listings
//! - [`CommentRepository`] - Reviews attached to offers

pub mod comment_repository;
pub mod offer_repository;
pub mod user_repository;

pub use comment_repository::CommentRepository;
pub use offer_repository::OfferRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use comment_repository::MockCommentRepository;
#[cfg(test)]
pub use offer_repository::MockOfferRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
