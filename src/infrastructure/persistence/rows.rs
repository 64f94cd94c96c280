//! Database row shapes and their conversion into domain entities.
//!
//! Offer and comment queries join the author from `users`; the author columns
//! are aliased with an `author_` prefix.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{Comment, Coordinates, Offer, User};
use crate::error::AppError;

pub(crate) const USER_COLUMNS: &str =
    "id, email, name, password_hash, avatar_url, user_type, created_at";

pub(crate) const AUTHOR_COLUMNS: &str = "u.id AS author_id, u.email AS author_email, \
     u.name AS author_name, u.password_hash AS author_password_hash, \
     u.avatar_url AS author_avatar_url, u.user_type AS author_user_type, \
     u.created_at AS author_created_at";

pub(crate) const OFFER_COLUMNS: &str = "o.id, o.name, o.description, o.publication_date, \
     o.city, o.preview_image, o.images, o.is_premium, o.is_favorite, o.rating, \
     o.housing_type, o.room_count, o.guest_count, o.cost, o.facilities, \
     o.comments_count, o.latitude, o.longitude";

pub(crate) const COMMENT_COLUMNS: &str = "c.id, c.text, c.rating, c.offer_id, c.created_at";

fn parse_column<T>(value: &str, column: &'static str) -> Result<T, AppError>
where
    T: FromStr<Err = String>,
{
    value.parse().map_err(|reason: String| {
        tracing::error!(column, value, "Unexpected value in database row");
        AppError::internal(
            "Corrupt database row",
            json!({ "column": column, "reason": reason }),
        )
    })
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub avatar_url: Option<String>,
    pub user_type: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            email: row.email,
            name: row.name,
            password_hash: row.password_hash,
            avatar_url: row.avatar_url,
            user_type: parse_column(&row.user_type, "user_type")?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct AuthorRow {
    pub author_id: Uuid,
    pub author_email: String,
    pub author_name: String,
    pub author_password_hash: String,
    pub author_avatar_url: Option<String>,
    pub author_user_type: String,
    pub author_created_at: DateTime<Utc>,
}

impl TryFrom<AuthorRow> for User {
    type Error = AppError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        UserRow {
            id: row.author_id,
            email: row.author_email,
            name: row.author_name,
            password_hash: row.author_password_hash,
            avatar_url: row.author_avatar_url,
            user_type: row.author_user_type,
            created_at: row.author_created_at,
        }
        .try_into()
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct OfferRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub publication_date: DateTime<Utc>,
    pub city: String,
    pub preview_image: String,
    pub images: Vec<String>,
    pub is_premium: bool,
    pub is_favorite: bool,
    pub rating: f64,
    pub housing_type: String,
    pub room_count: i32,
    pub guest_count: i32,
    pub cost: i32,
    pub facilities: Vec<String>,
    pub comments_count: i32,
    pub latitude: f64,
    pub longitude: f64,
    #[sqlx(flatten)]
    pub author: AuthorRow,
}

impl TryFrom<OfferRow> for Offer {
    type Error = AppError;

    fn try_from(row: OfferRow) -> Result<Self, Self::Error> {
        let facilities = row
            .facilities
            .iter()
            .map(|f| parse_column(f, "facilities"))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Offer {
            id: row.id,
            name: row.name,
            description: row.description,
            publication_date: row.publication_date,
            city: parse_column(&row.city, "city")?,
            preview_image: row.preview_image,
            images: row.images,
            is_premium: row.is_premium,
            is_favorite: row.is_favorite,
            rating: row.rating,
            housing_type: parse_column(&row.housing_type, "housing_type")?,
            room_count: row.room_count,
            guest_count: row.guest_count,
            cost: row.cost,
            facilities,
            author: row.author.try_into()?,
            comments_count: row.comments_count,
            coordinates: Coordinates {
                latitude: row.latitude,
                longitude: row.longitude,
            },
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CommentRow {
    pub id: Uuid,
    pub text: String,
    pub rating: i32,
    pub offer_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub author: AuthorRow,
}

impl TryFrom<CommentRow> for Comment {
    type Error = AppError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: row.id,
            text: row.text,
            rating: row.rating,
            author: row.author.try_into()?,
            offer_id: row.offer_id,
            created_at: row.created_at,
        })
    }
}

/// Converts a batch of rows, failing on the first corrupt one.
pub(crate) fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, AppError>
where
    T: TryFrom<R, Error = AppError>,
{
    rows.into_iter().map(T::try_from).collect()
}
