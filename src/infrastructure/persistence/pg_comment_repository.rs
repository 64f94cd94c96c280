//! PostgreSQL implementation of comment repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::rows::{AUTHOR_COLUMNS, COMMENT_COLUMNS, CommentRow, convert_all};
use crate::domain::entities::{Comment, NewComment};
use crate::domain::repositories::CommentRepository;
use crate::error::AppError;

/// PostgreSQL repository for offer comments.
pub struct PgCommentRepository {
    pool: Arc<PgPool>,
}

impl PgCommentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, new_comment: NewComment) -> Result<Comment, AppError> {
        let sql = format!(
            r#"
            WITH c AS (
                INSERT INTO comments (id, text, rating, author_id, offer_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT {COMMENT_COLUMNS}, {AUTHOR_COLUMNS}
            FROM c
            JOIN users u ON u.id = c.author_id
            "#
        );

        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&new_comment.text)
            .bind(new_comment.rating)
            .bind(new_comment.author_id)
            .bind(new_comment.offer_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        row.try_into()
    }

    async fn find_by_offer_id(&self, offer_id: Uuid, limit: i64) -> Result<Vec<Comment>, AppError> {
        let sql = format!(
            r#"
            SELECT {COMMENT_COLUMNS}, {AUTHOR_COLUMNS}
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.offer_id = $1
            ORDER BY c.created_at DESC
            LIMIT $2
            "#
        );

        let rows = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(offer_id)
            .bind(limit)
            .fetch_all(self.pool.as_ref())
            .await?;

        convert_all(rows)
    }

    async fn delete_by_offer_id(&self, offer_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE offer_id = $1")
            .bind(offer_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }
}
