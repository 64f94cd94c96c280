//! Comment service.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Comment, NewComment};
use crate::domain::repositories::CommentRepository;
use crate::error::AppError;

/// Number of comments returned per offer.
pub const DEFAULT_COMMENT_COUNT: i64 = 50;

/// Service owning all access to comments.
pub struct CommentService {
    repository: Arc<dyn CommentRepository>,
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(repository: Arc<dyn CommentRepository>) -> Self {
        Self { repository }
    }

    /// Persists a new comment.
    ///
    /// The parent offer's comment counter is maintained by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create(&self, new_comment: NewComment) -> Result<Comment, AppError> {
        let comment = self.repository.create(new_comment).await?;
        tracing::info!(comment_id = %comment.id, offer_id = %comment.offer_id, "New comment created");
        Ok(comment)
    }

    /// Lists the latest comments of an offer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find_by_offer_id(&self, offer_id: Uuid) -> Result<Vec<Comment>, AppError> {
        self.repository
            .find_by_offer_id(offer_id, DEFAULT_COMMENT_COUNT)
            .await
    }

    /// Deletes every comment of an offer, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_by_offer_id(&self, offer_id: Uuid) -> Result<u64, AppError> {
        let deleted = self.repository.delete_by_offer_id(offer_id).await?;
        tracing::info!(%offer_id, deleted, "Comments deleted");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::fixtures;
    use crate::domain::repositories::MockCommentRepository;

    #[tokio::test]
    async fn test_create_comment() {
        let mut mock_repo = MockCommentRepository::new();
        let offer_id = Uuid::new_v4();
        let author = fixtures::user("guest@b.io");
        let created = fixtures::comment(offer_id, author.clone());

        mock_repo
            .expect_create()
            .withf(move |c| c.offer_id == offer_id && c.rating == 5)
            .times(1)
            .returning(move |_| Ok(created.clone()));

        let service = CommentService::new(Arc::new(mock_repo));
        let comment = service
            .create(NewComment {
                text: "Lovely place, would stay again".to_string(),
                rating: 5,
                author_id: author.id,
                offer_id,
            })
            .await
            .unwrap();

        assert_eq!(comment.offer_id, offer_id);
    }

    #[tokio::test]
    async fn test_find_by_offer_id_uses_default_count() {
        let mut mock_repo = MockCommentRepository::new();
        let offer_id = Uuid::new_v4();

        mock_repo
            .expect_find_by_offer_id()
            .withf(move |id, limit| *id == offer_id && *limit == DEFAULT_COMMENT_COUNT)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = CommentService::new(Arc::new(mock_repo));
        assert!(service.find_by_offer_id(offer_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_offer_id_returns_count() {
        let mut mock_repo = MockCommentRepository::new();

        mock_repo
            .expect_delete_by_offer_id()
            .times(1)
            .returning(|_| Ok(4));

        let service = CommentService::new(Arc::new(mock_repo));
        assert_eq!(service.delete_by_offer_id(Uuid::new_v4()).await.unwrap(), 4);
    }
}
