//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

const COMPONENT: &str = "AuthenticateMiddleware";

/// Caller identity decoded from a verified access token.
///
/// Inserted into the request extensions by [`layer`]. Handlers take it as an
/// extractor; extraction fails with `401` when the request is anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// Decodes the caller from the `Authorization` header, if any.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// The header value is split on whitespace and the second part is verified
/// as a JWT.
///
/// # Behaviour
///
/// - No header: the request proceeds anonymously
/// - Valid token: an [`AuthUser`] is attached to the request extensions
///
/// # Errors
///
/// Returns `401 Unauthorized` with message `Invalid token` when the header
/// is present but the token is missing, forged, expired or carries a
/// malformed id.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .merge(routes)
///     .layer(middleware::from_fn_with_state(state.clone(), authenticate::layer));
/// ```
pub async fn layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(header) = req.headers().get(AUTHORIZATION) else {
        return Ok(next.run(req).await);
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.split_whitespace().nth(1))
        .ok_or_else(|| invalid_token("Authorization header has no token"))?;

    let claims = state.jwt_service.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "Rejected access token");
        e.with_component(COMPONENT)
    })?;

    let id = Uuid::parse_str(&claims.id).map_err(|_| invalid_token("Token id is not a valid UUID"))?;

    req.extensions_mut().insert(AuthUser {
        id,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

fn invalid_token(reason: &str) -> AppError {
    tracing::warn!(reason, "Rejected access token");
    AppError::unauthorized("Invalid token", json!({ "reason": reason })).with_component(COMPONENT)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(super::private_route::unauthorized)
    }
}
