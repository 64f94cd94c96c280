//! Handler for comment creation.

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde_json::json;

use crate::api::dto::comment::{CommentRdo, CreateCommentDto};
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Posts a comment on an offer and bumps the offer's comment counter.
///
/// # Endpoint
///
/// `POST /comments` (authenticated, body validated as [`CreateCommentDto`])
///
/// # Request Body
///
/// ```json
/// { "text": "Quiet street, great host", "rating": 4, "offerId": "..." }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the offer does not exist.
pub async fn create_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Extension(dto): Extension<CreateCommentDto>,
) -> Result<(StatusCode, Json<CommentRdo>), AppError> {
    let offer_id = dto.offer_id;

    if !state.offer_service.exists(offer_id).await? {
        return Err(AppError::not_found(
            format!("Offer with id {offer_id} not found."),
            json!({ "id": offer_id }),
        )
        .with_component("CommentController"));
    }

    let comment = state
        .comment_service
        .create(dto.into_new_comment(user.id))
        .await?;
    state.offer_service.increment_comment_count(offer_id).await?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}
