//! PostgreSQL implementation of offer repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::rows::{AUTHOR_COLUMNS, OFFER_COLUMNS, OfferRow, convert_all};
use crate::domain::entities::{City, NewOffer, Offer, OfferPatch};
use crate::domain::repositories::OfferRepository;
use crate::error::AppError;

/// PostgreSQL repository for offers.
///
/// Writes go through a CTE so the returned row already carries the joined author.
pub struct PgOfferRepository {
    pool: Arc<PgPool>,
}

impl PgOfferRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn facility_names(facilities: &[crate::domain::entities::Facility]) -> Vec<String> {
    facilities.iter().map(|f| f.as_str().to_string()).collect()
}

#[async_trait]
impl OfferRepository for PgOfferRepository {
    async fn find(&self, limit: i64) -> Result<Vec<Offer>, AppError> {
        let sql = format!(
            r#"
            SELECT {OFFER_COLUMNS}, {AUTHOR_COLUMNS}
            FROM offers o
            JOIN users u ON u.id = o.author_id
            ORDER BY o.publication_date DESC
            LIMIT $1
            "#
        );

        let rows = sqlx::query_as::<_, OfferRow>(&sql)
            .bind(limit)
            .fetch_all(self.pool.as_ref())
            .await?;

        convert_all(rows)
    }

    async fn find_premium_by_city(&self, city: City, limit: i64) -> Result<Vec<Offer>, AppError> {
        let sql = format!(
            r#"
            SELECT {OFFER_COLUMNS}, {AUTHOR_COLUMNS}
            FROM offers o
            JOIN users u ON u.id = o.author_id
            WHERE o.city = $1 AND o.is_premium = TRUE
            ORDER BY o.publication_date DESC
            LIMIT $2
            "#
        );

        let rows = sqlx::query_as::<_, OfferRow>(&sql)
            .bind(city.as_str())
            .bind(limit)
            .fetch_all(self.pool.as_ref())
            .await?;

        convert_all(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, AppError> {
        let sql = format!(
            r#"
            SELECT {OFFER_COLUMNS}, {AUTHOR_COLUMNS}
            FROM offers o
            JOIN users u ON u.id = o.author_id
            WHERE o.id = $1
            "#
        );

        let row = sqlx::query_as::<_, OfferRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Offer::try_from).transpose()
    }

    async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM offers WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn create(&self, new_offer: NewOffer) -> Result<Offer, AppError> {
        let sql = format!(
            r#"
            WITH o AS (
                INSERT INTO offers (
                    id, name, description, publication_date, city, preview_image, images,
                    is_premium, is_favorite, rating, housing_type, room_count, guest_count,
                    cost, facilities, author_id, latitude, longitude
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
                RETURNING *
            )
            SELECT {OFFER_COLUMNS}, {AUTHOR_COLUMNS}
            FROM o
            JOIN users u ON u.id = o.author_id
            "#
        );

        let row = sqlx::query_as::<_, OfferRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&new_offer.name)
            .bind(&new_offer.description)
            .bind(new_offer.publication_date)
            .bind(new_offer.city.as_str())
            .bind(&new_offer.preview_image)
            .bind(&new_offer.images)
            .bind(new_offer.is_premium)
            .bind(new_offer.is_favorite)
            .bind(new_offer.rating)
            .bind(new_offer.housing_type.as_str())
            .bind(new_offer.room_count)
            .bind(new_offer.guest_count)
            .bind(new_offer.cost)
            .bind(facility_names(&new_offer.facilities))
            .bind(new_offer.author_id)
            .bind(new_offer.coordinates.latitude)
            .bind(new_offer.coordinates.longitude)
            .fetch_one(self.pool.as_ref())
            .await?;

        row.try_into()
    }

    async fn update(&self, id: Uuid, patch: OfferPatch) -> Result<Option<Offer>, AppError> {
        let sql = format!(
            r#"
            WITH o AS (
                UPDATE offers SET
                    name             = COALESCE($2::TEXT, name),
                    description      = COALESCE($3::TEXT, description),
                    publication_date = COALESCE($4::TIMESTAMPTZ, publication_date),
                    city             = COALESCE($5::TEXT, city),
                    preview_image    = COALESCE($6::TEXT, preview_image),
                    images           = COALESCE($7::TEXT[], images),
                    is_premium       = COALESCE($8::BOOLEAN, is_premium),
                    is_favorite      = COALESCE($9::BOOLEAN, is_favorite),
                    rating           = COALESCE($10::DOUBLE PRECISION, rating),
                    housing_type     = COALESCE($11::TEXT, housing_type),
                    room_count       = COALESCE($12::INTEGER, room_count),
                    guest_count      = COALESCE($13::INTEGER, guest_count),
                    cost             = COALESCE($14::INTEGER, cost),
                    facilities       = COALESCE($15::TEXT[], facilities),
                    latitude         = COALESCE($16::DOUBLE PRECISION, latitude),
                    longitude        = COALESCE($17::DOUBLE PRECISION, longitude)
                WHERE id = $1
                RETURNING *
            )
            SELECT {OFFER_COLUMNS}, {AUTHOR_COLUMNS}
            FROM o
            JOIN users u ON u.id = o.author_id
            "#
        );

        let row = sqlx::query_as::<_, OfferRow>(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.description)
            .bind(patch.publication_date)
            .bind(patch.city.map(|c| c.as_str()))
            .bind(patch.preview_image)
            .bind(patch.images)
            .bind(patch.is_premium)
            .bind(patch.is_favorite)
            .bind(patch.rating)
            .bind(patch.housing_type.map(|h| h.as_str()))
            .bind(patch.room_count)
            .bind(patch.guest_count)
            .bind(patch.cost)
            .bind(patch.facilities.as_deref().map(facility_names))
            .bind(patch.coordinates.map(|c| c.latitude))
            .bind(patch.coordinates.map(|c| c.longitude))
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Offer::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_comment_count(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE offers SET comments_count = comments_count + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
