//! Guard checking that a path parameter is a storage identifier.

use std::collections::HashMap;

use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;

const COMPONENT: &str = "ValidateObjectIdMiddleware";

/// Rejects the request when the path parameter named by the state is not a UUID.
///
/// Never touches storage.
///
/// # Errors
///
/// Returns `400 Bad Request` for a malformed or missing parameter.
///
/// # Example
///
/// ```rust,ignore
/// middleware::from_fn_with_state("offerId", validate_object_id::layer)
/// ```
pub async fn layer(
    State(param): State<&'static str>,
    Path(params): Path<HashMap<String, String>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    parse_param(&params, param).map_err(|e| e.with_component(COMPONENT))?;

    Ok(next.run(req).await)
}

/// Reads the named path parameter as a UUID.
pub(crate) fn parse_param(params: &HashMap<String, String>, param: &str) -> Result<Uuid, AppError> {
    let raw = params.get(param).ok_or_else(|| {
        AppError::bad_request(
            format!("Missing path parameter `{param}`"),
            json!({ "param": param }),
        )
    })?;

    Uuid::parse_str(raw).map_err(|_| invalid_id(param, raw))
}

fn invalid_id(param: &str, raw: &str) -> AppError {
    AppError::bad_request(
        format!("`{raw}` is not a valid id"),
        json!({ "param": param, "value": raw }),
    )
}

/// Rejection for a static segment that shadows an id parameter, such as
/// `PATCH /offers/premium`; answers as the guard would for that value.
pub fn shadowed_segment(param: &'static str, segment: &'static str) -> AppError {
    invalid_id(param, segment).with_component(COMPONENT)
}
