//! Comment entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::User;

/// A review left on an offer.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub rating: i32,
    pub author: User,
    pub offer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub rating: i32,
    pub author_id: Uuid,
    pub offer_id: Uuid,
}
