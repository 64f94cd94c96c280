//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{CommentService, JwtService, OfferService, UserService};
use crate::domain::repositories::{CommentRepository, OfferRepository, UserRepository};
use crate::infrastructure::persistence::{
    PgCommentRepository, PgOfferRepository, PgUserRepository,
};

/// Services wired once at startup and cloned cheaply per request.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub offer_service: Arc<OfferService>,
    pub comment_service: Arc<CommentService>,
    pub jwt_service: Arc<JwtService>,
    /// Key mixed into password hashes.
    pub salt: Arc<str>,
}

impl AppState {
    /// Wires the PostgreSQL repositories into the services.
    pub fn new(pool: Arc<PgPool>, jwt_service: JwtService, salt: impl Into<Arc<str>>) -> Self {
        Self::from_repositories(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgOfferRepository::new(pool.clone())),
            Arc::new(PgCommentRepository::new(pool)),
            jwt_service,
            salt,
        )
    }

    /// Wires arbitrary repository implementations into the services.
    pub fn from_repositories(
        user_repository: Arc<dyn UserRepository>,
        offer_repository: Arc<dyn OfferRepository>,
        comment_repository: Arc<dyn CommentRepository>,
        jwt_service: JwtService,
        salt: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            user_service: Arc::new(UserService::new(user_repository)),
            offer_service: Arc::new(OfferService::new(offer_repository)),
            comment_service: Arc::new(CommentService::new(comment_repository)),
            jwt_service: Arc::new(jwt_service),
            salt: salt.into(),
        }
    }
}
