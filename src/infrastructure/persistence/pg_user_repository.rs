//! PostgreSQL implementation of user repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::rows::{AUTHOR_COLUMNS, OFFER_COLUMNS, OfferRow, USER_COLUMNS, UserRow, convert_all};
use crate::domain::entities::{NewUser, Offer, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// PostgreSQL repository for user accounts.
///
/// Email uniqueness is enforced by the `users_email_key` constraint.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let sql = format!(
            r#"
            INSERT INTO users (id, email, name, password_hash, avatar_url, user_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&new_user.email)
            .bind(&new_user.name)
            .bind(&new_user.password_hash)
            .bind(&new_user.avatar_url)
            .bind(new_user.user_type.as_str())
            .fetch_one(self.pool.as_ref())
            .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn add_favorite(&self, user_id: Uuid, offer_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO favorites (user_id, offer_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, offer_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(offer_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn remove_favorite(&self, user_id: Uuid, offer_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND offer_id = $2")
            .bind(user_id)
            .bind(offer_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn find_favorite_offers(&self, user_id: Uuid) -> Result<Vec<Offer>, AppError> {
        let sql = format!(
            r#"
            SELECT {OFFER_COLUMNS}, {AUTHOR_COLUMNS}
            FROM favorites f
            JOIN offers o ON o.id = f.offer_id
            JOIN users u ON u.id = o.author_id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC
            "#
        );

        let rows = sqlx::query_as::<_, OfferRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        convert_all(rows)
    }
}
