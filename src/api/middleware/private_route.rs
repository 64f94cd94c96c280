//! Guard restricting a route to authenticated callers.

use axum::{extract::Request, middleware::Next, response::Response};
use serde_json::json;

use super::AuthUser;
use crate::error::AppError;

/// Rejects the request unless [`authenticate`](super::authenticate) attached
/// an [`AuthUser`].
///
/// Must run after `authenticate`, which is applied globally by the router.
///
/// # Errors
///
/// Returns `401 Unauthorized` for anonymous requests. The handler never runs.
pub async fn layer(req: Request, next: Next) -> Result<Response, AppError> {
    if req.extensions().get::<AuthUser>().is_none() {
        return Err(unauthorized());
    }

    Ok(next.run(req).await)
}

pub(crate) fn unauthorized() -> AppError {
    AppError::unauthorized(
        "Unauthorized",
        json!({ "reason": "Authorization header is missing or invalid" }),
    )
    .with_component("PrivateRouteMiddleware")
}
