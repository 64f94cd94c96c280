//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Accounts and favourites
//! - [`PgOfferRepository`] - Offer storage and retrieval
//! - [`PgCommentRepository`] - Comments per offer

pub mod pg_comment_repository;
pub mod pg_offer_repository;
pub mod pg_user_repository;
mod rows;

pub use pg_comment_repository::PgCommentRepository;
pub use pg_offer_repository::PgOfferRepository;
pub use pg_user_repository::PgUserRepository;
