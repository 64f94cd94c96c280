//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers. Each service is the only caller of its repository.
//!
//! # Available Services
//!
//! - [`services::user_service::UserService`] - Accounts, credentials and favourites
//! - [`services::offer_service::OfferService`] - Rental offers
//! - [`services::comment_service::CommentService`] - Offer comments
//! - [`services::jwt_service::JwtService`] - Access token issuing and verification

pub mod services;
