//! Handlers for offer endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use uuid::Uuid;

use crate::api::dto::comment::CommentRdo;
use crate::api::dto::offer::{CreateOfferDto, OfferRdo, OffersQuery, PremiumQuery, UpdateOfferDto};
use crate::api::middleware::AuthUser;
use crate::domain::entities::{City, Offer};
use crate::error::AppError;
use crate::state::AppState;

const COMPONENT: &str = "OfferController";

/// Lists offers, newest first.
///
/// # Endpoint
///
/// `GET /offers?limit=60`
///
/// `limit` defaults to 60 and is capped at 500.
pub async fn index_handler(
    State(state): State<AppState>,
    Query(query): Query<OffersQuery>,
) -> Result<Json<Vec<OfferRdo>>, AppError> {
    let offers = state.offer_service.find(query.limit).await?;
    Ok(Json(offers.into_iter().map(OfferRdo::from).collect()))
}

/// Lists the latest premium offers of a city.
///
/// # Endpoint
///
/// `GET /offers/premium?city=Amsterdam`
///
/// # Errors
///
/// Returns 400 Bad Request for an unknown city.
pub async fn premium_handler(
    State(state): State<AppState>,
    Query(query): Query<PremiumQuery>,
) -> Result<Json<Vec<OfferRdo>>, AppError> {
    let city: City = query.city.parse().map_err(|e: String| {
        AppError::bad_request(e, json!({ "city": query.city })).with_component(COMPONENT)
    })?;

    let offers = state.offer_service.find_premium_by_city(city).await?;
    Ok(Json(offers.into_iter().map(OfferRdo::from).collect()))
}

/// Creates an offer authored by the caller.
///
/// # Endpoint
///
/// `POST /offers` (authenticated, body validated as [`CreateOfferDto`])
///
/// # Response
///
/// 201 Created with the stored offer, including its generated id and author.
pub async fn create_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Extension(dto): Extension<CreateOfferDto>,
) -> Result<(StatusCode, Json<OfferRdo>), AppError> {
    let offer = state
        .offer_service
        .create(dto.into_new_offer(user.id))
        .await?;

    Ok((StatusCode::CREATED, Json(offer.into())))
}

/// Offer details are not served yet.
///
/// # Endpoint
///
/// `GET /offers/{offerId}`
///
/// Always 501 Not Implemented, whether or not the offer exists.
pub async fn show_handler() -> AppError {
    AppError::not_implemented("Not implemented", json!({})).with_component(COMPONENT)
}

/// Partially updates one of the caller's offers.
///
/// # Endpoint
///
/// `PATCH /offers/{offerId}` (authenticated, id validated, body validated as
/// [`UpdateOfferDto`], offer must exist)
///
/// # Errors
///
/// - 403 Forbidden if the caller is not the author
/// - 404 Not Found if the offer disappeared after the existence check
pub async fn update_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Path(offer_id): Path<Uuid>,
    Extension(dto): Extension<UpdateOfferDto>,
) -> Result<Json<OfferRdo>, AppError> {
    let offer = find_owned_offer(&state, &user, offer_id).await?;

    let updated = state
        .offer_service
        .update_by_id(offer.id, dto.into())
        .await?
        .ok_or_else(|| offer_not_found(offer_id))?;

    Ok(Json(updated.into()))
}

/// Deletes one of the caller's offers together with its comments.
///
/// # Endpoint
///
/// `DELETE /offers/{offerId}` (authenticated, id validated, offer must exist)
///
/// # Response
///
/// 204 No Content. Comments are only removed once the offer itself was deleted.
///
/// # Errors
///
/// - 403 Forbidden if the caller is not the author
/// - 404 Not Found if there was nothing to delete
pub async fn delete_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Path(offer_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    find_owned_offer(&state, &user, offer_id).await?;

    if !state.offer_service.delete_by_id(offer_id).await? {
        return Err(offer_not_found(offer_id));
    }

    state.comment_service.delete_by_offer_id(offer_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Lists the comments of an offer.
///
/// # Endpoint
///
/// `GET /offers/{offerId}/comments` (id validated)
///
/// # Errors
///
/// Returns 404 Not Found if the offer does not exist.
pub async fn comments_handler(
    State(state): State<AppState>,
    Path(offer_id): Path<Uuid>,
) -> Result<Json<Vec<CommentRdo>>, AppError> {
    if !state.offer_service.exists(offer_id).await? {
        return Err(offer_not_found(offer_id));
    }

    let comments = state.comment_service.find_by_offer_id(offer_id).await?;
    Ok(Json(comments.into_iter().map(CommentRdo::from).collect()))
}

async fn find_owned_offer(
    state: &AppState,
    user: &AuthUser,
    offer_id: Uuid,
) -> Result<Offer, AppError> {
    let offer = state
        .offer_service
        .find_by_id(offer_id)
        .await?
        .ok_or_else(|| offer_not_found(offer_id))?;

    if offer.author.id != user.id {
        tracing::warn!(%offer_id, user_id = %user.id, "Offer mutation by non-author rejected");
        return Err(AppError::forbidden(
            "Only the author can modify this offer",
            json!({ "offer_id": offer_id }),
        )
        .with_component(COMPONENT));
    }

    Ok(offer)
}

fn offer_not_found(offer_id: Uuid) -> AppError {
    AppError::not_found(
        format!("Offer with id {offer_id} not found."),
        json!({ "id": offer_id }),
    )
    .with_component(COMPONENT)
}
