//! Handlers for registration, login and favourites.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use uuid::Uuid;

use crate::api::dto::offer::OfferRdo;
use crate::api::dto::user::{CreateUserDto, LoggedUserRdo, LoginUserDto, UserRdo};
use crate::api::middleware::AuthUser;
use crate::domain::entities::Credentials;
use crate::error::AppError;
use crate::state::AppState;

const COMPONENT: &str = "UserController";

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /users/register` (body validated as [`CreateUserDto`])
///
/// # Errors
///
/// Returns 409 Conflict if the email is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    Extension(dto): Extension<CreateUserDto>,
) -> Result<(StatusCode, Json<UserRdo>), AppError> {
    if state.user_service.find_by_email(&dto.email).await?.is_some() {
        return Err(AppError::conflict(
            format!("User with email {} exists.", dto.email),
            json!({ "email": dto.email }),
        )
        .with_component(COMPONENT));
    }

    let user = state.user_service.create(dto.into(), &state.salt).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Exchanges credentials for an access token.
///
/// # Endpoint
///
/// `POST /users/login` (body validated as [`LoginUserDto`])
///
/// # Response
///
/// ```json
/// { "token": "...", "email": "...", "name": "...", "avatarUrl": null, "type": "regular" }
/// ```
///
/// # Errors
///
/// Returns 401 Unauthorized for an unknown email or a wrong password alike.
pub async fn login_handler(
    State(state): State<AppState>,
    Extension(dto): Extension<LoginUserDto>,
) -> Result<Json<LoggedUserRdo>, AppError> {
    let credentials = Credentials::from(dto);

    let Some(user) = state
        .user_service
        .verify_user(&credentials, &state.salt)
        .await?
    else {
        tracing::warn!(email = %credentials.email, "Failed login attempt");
        return Err(AppError::unauthorized("Unauthorized", json!({})).with_component(COMPONENT));
    };

    let token = state.jwt_service.issue(&user)?;

    Ok(Json(LoggedUserRdo::new(user, token)))
}

/// Returns the account behind the presented token.
///
/// # Endpoint
///
/// `GET /users/login` (authenticated)
///
/// # Errors
///
/// Returns 401 Unauthorized if the account no longer exists.
pub async fn check_handler(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<UserRdo>, AppError> {
    let found = state
        .user_service
        .find_by_email(&user.email)
        .await?
        .ok_or_else(|| {
            AppError::unauthorized("Unauthorized", json!({})).with_component(COMPONENT)
        })?;

    Ok(Json(found.into()))
}

/// Lists the caller's favourite offers.
///
/// # Endpoint
///
/// `GET /users/favorites` (authenticated)
pub async fn favorites_handler(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<OfferRdo>>, AppError> {
    let offers = state.user_service.find_favorite_offers(user.id).await?;

    Ok(Json(
        offers
            .into_iter()
            .map(|offer| OfferRdo {
                is_favorite: true,
                ..OfferRdo::from(offer)
            })
            .collect(),
    ))
}

/// Marks an offer as a favourite of the caller. Idempotent.
///
/// # Endpoint
///
/// `POST /users/favorites/{offerId}` (authenticated, id validated, offer must exist)
pub async fn add_favorite_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Path(offer_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.user_service.add_favorite(user.id, offer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Removes an offer from the caller's favourites. Idempotent.
///
/// # Endpoint
///
/// `DELETE /users/favorites/{offerId}` (authenticated, id validated, offer must exist)
pub async fn remove_favorite_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Path(offer_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.user_service.remove_favorite(user.id, offer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use crate::api::handlers::test_support::{Mocks, TEST_SALT, token_for};
    use crate::application::services::user_service::hash_password;
    use crate::domain::entities::fixtures;

    #[tokio::test]
    async fn test_register_creates_user() {
        let mut mocks = Mocks::default();
        mocks.users.expect_find_by_email().returning(|_| Ok(None));
        mocks
            .users
            .expect_create()
            .withf(|u| {
                u.email == "keks@htmlacademy.ru" && u.password_hash == hash_password("secret1", TEST_SALT)
            })
            .times(1)
            .returning(|u| {
                let mut user = fixtures::user(&u.email);
                user.name = u.name;
                user.password_hash = u.password_hash;
                Ok(user)
            });

        let server = mocks.server();
        let response = server
            .post("/users/register")
            .json(&json!({
                "email": "keks@htmlacademy.ru",
                "name": "Keks",
                "password": "secret1"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body = response.json::<Value>();
        assert_eq!(body["email"], "keks@htmlacademy.ru");
        assert_eq!(body["name"], "Keks");
        assert!(body.get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let mut mocks = Mocks::default();
        mocks
            .users
            .expect_find_by_email()
            .returning(|email| Ok(Some(fixtures::user(email))));
        mocks.users.expect_create().times(0);

        let server = mocks.server();
        let response = server
            .post("/users/register")
            .json(&json!({
                "email": "keks@htmlacademy.ru",
                "name": "Keks",
                "password": "secret1"
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_body() {
        let mut mocks = Mocks::default();
        mocks.users.expect_find_by_email().times(0);
        mocks.users.expect_create().times(0);

        let server = mocks.server();
        let response = server
            .post("/users/register")
            .json(&json!({ "email": "keks", "name": "Keks", "password": "1" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let mut mocks = Mocks::default();
        mocks.users.expect_find_by_email().returning(|email| {
            let mut user = fixtures::user(email);
            user.password_hash = hash_password("secret1", TEST_SALT);
            Ok(Some(user))
        });

        let server = mocks.server();
        let response = server
            .post("/users/login")
            .json(&json!({ "email": "keks@htmlacademy.ru", "password": "secret1" }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["email"], "keks@htmlacademy.ru");
        assert!(!body["token"].as_str().unwrap().is_empty());
        assert_eq!(body["type"], "regular");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_unauthorized() {
        let mut mocks = Mocks::default();
        mocks.users.expect_find_by_email().returning(|email| {
            let mut user = fixtures::user(email);
            user.password_hash = hash_password("secret1", TEST_SALT);
            Ok(Some(user))
        });

        let server = mocks.server();
        let response = server
            .post("/users/login")
            .json(&json!({ "email": "keks@htmlacademy.ru", "password": "wrong1" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_check_returns_current_user() {
        let mut mocks = Mocks::default();
        let user = fixtures::user("keks@htmlacademy.ru");
        let stored = user.clone();
        mocks
            .users
            .expect_find_by_email()
            .withf(|email| email == "keks@htmlacademy.ru")
            .returning(move |_| Ok(Some(stored.clone())));

        let server = mocks.server();
        let response = server
            .get("/users/login")
            .authorization_bearer(token_for(&user))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["id"], user.id.to_string());
    }

    #[tokio::test]
    async fn test_check_requires_token() {
        let server = Mocks::default().server();
        server
            .get("/users/login")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_favorites_are_flagged() {
        let mut mocks = Mocks::default();
        let user = fixtures::user("keks@htmlacademy.ru");
        let offer = fixtures::offer(fixtures::user("host@b.io"));
        mocks
            .users
            .expect_find_favorite_offers()
            .returning(move |_| Ok(vec![offer.clone()]));

        let server = mocks.server();
        let response = server
            .get("/users/favorites")
            .authorization_bearer(token_for(&user))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()[0]["isFavorite"], true);
    }

    #[tokio::test]
    async fn test_add_favorite() {
        let mut mocks = Mocks::default();
        let user = fixtures::user("keks@htmlacademy.ru");
        let offer_id = Uuid::new_v4();

        mocks.offers.expect_exists().returning(|_| Ok(true));
        mocks
            .users
            .expect_add_favorite()
            .withf({
                let user_id = user.id;
                move |u, o| *u == user_id && *o == offer_id
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let server = mocks.server();
        let response = server
            .post(&format!("/users/favorites/{offer_id}"))
            .authorization_bearer(token_for(&user))
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_remove_favorite_of_missing_offer() {
        let mut mocks = Mocks::default();
        let user = fixtures::user("keks@htmlacademy.ru");

        mocks.offers.expect_exists().returning(|_| Ok(false));
        mocks.users.expect_remove_favorite().times(0);

        let server = mocks.server();
        let response = server
            .delete(&format!("/users/favorites/{}", Uuid::new_v4()))
            .authorization_bearer(token_for(&user))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
