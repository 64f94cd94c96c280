//! Repository trait for rental offers.

use crate::domain::entities::{City, NewOffer, Offer, OfferPatch};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for offers.
///
/// Every returned [`Offer`] carries its author.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgOfferRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfferRepository: Send + Sync {
    /// Lists offers, newest publication date first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(&self, limit: i64) -> Result<Vec<Offer>, AppError>;

    /// Lists premium offers in a city, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_premium_by_city(&self, city: City, limit: i64) -> Result<Vec<Offer>, AppError>;

    /// Finds an offer by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, AppError>;

    /// Returns whether an offer with this id exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists(&self, id: Uuid) -> Result<bool, AppError>;

    /// Persists a new offer and returns it with its author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors, including an unknown author.
    async fn create(&self, new_offer: NewOffer) -> Result<Offer, AppError>;

    /// Applies a partial update.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Offer))` with the updated offer
    /// - `Ok(None)` if no offer has this id
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: Uuid, patch: OfferPatch) -> Result<Option<Offer>, AppError>;

    /// Deletes an offer. Returns `false` if nothing was deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Increments the denormalised comment counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_comment_count(&self, id: Uuid) -> Result<(), AppError>;
}
