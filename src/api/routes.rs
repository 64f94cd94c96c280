//! API route configuration.
//!
//! Every route declares its guard chain with `route_layer`; guards listed
//! first run first. [`authenticate`](crate::api::middleware::authenticate)
//! is applied globally by [`crate::routes::app_router`], so it always runs
//! before these chains.

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post},
};
use tower::ServiceBuilder;

use crate::api::dto::comment::CreateCommentDto;
use crate::api::dto::offer::{CreateOfferDto, UpdateOfferDto};
use crate::api::dto::user::{CreateUserDto, LoginUserDto};
use crate::api::handlers::{comments, offers, users};
use crate::api::middleware::{
    DocumentExistsGuard, document_exists, private_route, validate_dto, validate_object_id,
};
use crate::error::AppError;
use crate::state::AppState;

const OFFER_ID: &str = "offerId";

/// Offer routes.
///
/// # Endpoints
///
/// - `GET    /offers`                    - List offers (`?limit=`)
/// - `POST   /offers`                    - Create an offer (auth)
/// - `GET    /offers/premium`            - Premium offers of a city (`?city=`)
/// - `GET    /offers/{offerId}`          - Not implemented (501)
/// - `PATCH  /offers/{offerId}`          - Update own offer (auth)
/// - `DELETE /offers/{offerId}`          - Delete own offer and its comments (auth)
/// - `GET    /offers/{offerId}/comments` - Comments of an offer
pub fn offer_routes(state: &AppState) -> Router<AppState> {
    let offer_exists = DocumentExistsGuard::new(state.offer_service.clone(), "Offer", OFFER_ID);

    Router::new()
        .route("/offers", get(offers::index_handler))
        .route(
            "/offers",
            post(offers::create_handler).route_layer(
                ServiceBuilder::new()
                    .layer(from_fn(private_route::layer))
                    .layer(from_fn(validate_dto::layer::<CreateOfferDto>)),
            ),
        )
        .route("/offers/premium", get(offers::premium_handler))
        .route(
            "/offers/premium",
            patch(premium_is_not_an_id)
                .delete(premium_is_not_an_id)
                .route_layer(from_fn(private_route::layer)),
        )
        .route("/offers/{offerId}", get(offers::show_handler))
        .route(
            "/offers/{offerId}",
            patch(offers::update_handler).route_layer(
                ServiceBuilder::new()
                    .layer(from_fn(private_route::layer))
                    .layer(from_fn_with_state(OFFER_ID, validate_object_id::layer))
                    .layer(from_fn(validate_dto::layer::<UpdateOfferDto>))
                    .layer(from_fn_with_state(
                        offer_exists.clone(),
                        document_exists::layer,
                    )),
            ),
        )
        .route(
            "/offers/{offerId}",
            delete(offers::delete_handler).route_layer(
                ServiceBuilder::new()
                    .layer(from_fn(private_route::layer))
                    .layer(from_fn_with_state(OFFER_ID, validate_object_id::layer))
                    .layer(from_fn_with_state(offer_exists, document_exists::layer)),
            ),
        )
        .route(
            "/offers/{offerId}/comments",
            get(offers::comments_handler)
                .route_layer(from_fn_with_state(OFFER_ID, validate_object_id::layer)),
        )
}

/// `/offers/premium` shadows `/offers/{offerId}`; mutations on it fail the id
/// check instead of answering 405.
async fn premium_is_not_an_id() -> AppError {
    validate_object_id::shadowed_segment(OFFER_ID, "premium")
}

/// Comment routes.
///
/// # Endpoints
///
/// - `POST /comments` - Comment on an offer (auth)
pub fn comment_routes() -> Router<AppState> {
    Router::new().route(
        "/comments",
        post(comments::create_handler).route_layer(
            ServiceBuilder::new()
                .layer(from_fn(private_route::layer))
                .layer(from_fn(validate_dto::layer::<CreateCommentDto>)),
        ),
    )
}

/// User routes.
///
/// # Endpoints
///
/// - `POST   /users/register`            - Register an account
/// - `POST   /users/login`               - Log in, returns a token
/// - `GET    /users/login`               - Current account (auth)
/// - `GET    /users/favorites`           - Favourite offers (auth)
/// - `POST   /users/favorites/{offerId}` - Add a favourite (auth)
/// - `DELETE /users/favorites/{offerId}` - Remove a favourite (auth)
pub fn user_routes(state: &AppState) -> Router<AppState> {
    let offer_exists = DocumentExistsGuard::new(state.offer_service.clone(), "Offer", OFFER_ID);

    let favorite_guards = ServiceBuilder::new()
        .layer(from_fn(private_route::layer))
        .layer(from_fn_with_state(OFFER_ID, validate_object_id::layer))
        .layer(from_fn_with_state(offer_exists, document_exists::layer));

    Router::new()
        .route(
            "/users/register",
            post(users::register_handler)
                .route_layer(from_fn(validate_dto::layer::<CreateUserDto>)),
        )
        .route(
            "/users/login",
            post(users::login_handler).route_layer(from_fn(validate_dto::layer::<LoginUserDto>)),
        )
        .route(
            "/users/login",
            get(users::check_handler).route_layer(from_fn(private_route::layer)),
        )
        .route(
            "/users/favorites",
            get(users::favorites_handler).route_layer(from_fn(private_route::layer)),
        )
        .route(
            "/users/favorites/{offerId}",
            post(users::add_favorite_handler)
                .delete(users::remove_favorite_handler)
                .route_layer(favorite_guards),
        )
}
