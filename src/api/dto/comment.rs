//! DTOs for comment endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::user::UserRdo;
use crate::api::middleware::validate_dto::RequiredFields;
use crate::domain::entities::{Comment, NewComment};

/// Request body for `POST /comments`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentDto {
    #[validate(length(min = 5, max = 1024))]
    pub text: String,

    #[validate(range(min = 1, max = 5))]
    pub rating: i32,

    pub offer_id: Uuid,
}

impl RequiredFields for CreateCommentDto {
    const REQUIRED: &'static [&'static str] = &["text", "rating", "offerId"];
}

impl CreateCommentDto {
    /// Builds the creation record for a comment written by `author_id`.
    pub fn into_new_comment(self, author_id: Uuid) -> NewComment {
        NewComment {
            text: self.text,
            rating: self.rating,
            author_id,
            offer_id: self.offer_id,
        }
    }
}

/// Comment as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRdo {
    pub id: Uuid,
    pub text: String,
    pub rating: i32,
    pub offer_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub author: UserRdo,
}

impl From<Comment> for CommentRdo {
    fn from(comment: Comment) -> Self {
        CommentRdo {
            id: comment.id,
            text: comment.text,
            rating: comment.rating,
            offer_id: comment.offer_id,
            created_at: comment.created_at,
            author: comment.author.into(),
        }
    }
}
