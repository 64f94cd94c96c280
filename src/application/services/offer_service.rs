//! Offer listing and management service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::DocumentExists;
use crate::domain::entities::{City, NewOffer, Offer, OfferPatch};
use crate::domain::repositories::OfferRepository;
use crate::error::AppError;

/// Number of offers returned by the listing when no limit is given.
pub const DEFAULT_OFFER_COUNT: u32 = 60;
/// Upper bound for the listing limit.
pub const MAX_OFFER_COUNT: u32 = 500;
/// Number of premium offers returned per city.
pub const PREMIUM_OFFER_COUNT: i64 = 3;

/// Service owning all access to offers.
pub struct OfferService {
    repository: Arc<dyn OfferRepository>,
}

impl OfferService {
    /// Creates a new offer service.
    pub fn new(repository: Arc<dyn OfferRepository>) -> Self {
        Self { repository }
    }

    /// Lists offers, newest first.
    ///
    /// `limit` defaults to [`DEFAULT_OFFER_COUNT`] and is capped at [`MAX_OFFER_COUNT`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find(&self, limit: Option<u32>) -> Result<Vec<Offer>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_OFFER_COUNT).min(MAX_OFFER_COUNT);
        self.repository.find(i64::from(limit)).await
    }

    /// Lists the latest premium offers in a city.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find_premium_by_city(&self, city: City) -> Result<Vec<Offer>, AppError> {
        self.repository
            .find_premium_by_city(city, PREMIUM_OFFER_COUNT)
            .await
    }

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, AppError> {
        self.repository.find_by_id(id).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        self.repository.exists(id).await
    }

    /// Persists a new offer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create(&self, new_offer: NewOffer) -> Result<Offer, AppError> {
        let offer = self.repository.create(new_offer).await?;
        tracing::info!(offer_id = %offer.id, author_id = %offer.author.id, "New offer created");
        Ok(offer)
    }

    /// Applies a partial update; `None` means the offer no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_by_id(
        &self,
        id: Uuid,
        patch: OfferPatch,
    ) -> Result<Option<Offer>, AppError> {
        self.repository.update(id, patch).await
    }

    /// Deletes an offer; `false` means there was nothing to delete.
    ///
    /// Comments are not touched here.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        let deleted = self.repository.delete(id).await?;
        if deleted {
            tracing::info!(offer_id = %id, "Offer deleted");
        }
        Ok(deleted)
    }

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn increment_comment_count(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.increment_comment_count(id).await
    }
}

#[async_trait]
impl DocumentExists for OfferService {
    async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        OfferService::exists(self, id).await
    }
}
