//! Business logic services for the application layer.

pub mod comment_service;
pub mod jwt_service;
pub mod offer_service;
pub mod user_service;

pub use comment_service::CommentService;
pub use jwt_service::{Claims, JwtService};
pub use offer_service::OfferService;
pub use user_service::UserService;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;

/// Existence lookup used by route guards that must reject unknown ids.
#[async_trait]
pub trait DocumentExists: Send + Sync {
    /// Returns whether a document with this id exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists(&self, id: Uuid) -> Result<bool, AppError>;
}
