//! Guard checking that the aggregate referenced by a path parameter exists.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use super::validate_object_id::parse_param;
use crate::application::services::DocumentExists;
use crate::error::AppError;

const COMPONENT: &str = "DocumentExistsMiddleware";

/// Existence check bound to a service, an entity label and a path parameter.
#[derive(Clone)]
pub struct DocumentExistsGuard {
    service: Arc<dyn DocumentExists>,
    entity: &'static str,
    param: &'static str,
}

impl DocumentExistsGuard {
    pub fn new(service: Arc<dyn DocumentExists>, entity: &'static str, param: &'static str) -> Self {
        Self {
            service,
            entity,
            param,
        }
    }
}

/// Looks up the id in the guarded parameter and stops the request if it is absent.
///
/// # Errors
///
/// - `400 Bad Request` if the parameter is not a valid id
/// - `404 Not Found` with message `<Entity> with id <id> not found.`
///
/// # Example
///
/// ```rust,ignore
/// let guard = DocumentExistsGuard::new(state.offer_service.clone(), "Offer", "offerId");
/// middleware::from_fn_with_state(guard, document_exists::layer)
/// ```
pub async fn layer(
    State(guard): State<DocumentExistsGuard>,
    Path(params): Path<HashMap<String, String>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let id = parse_param(&params, guard.param).map_err(|e| e.with_component(COMPONENT))?;

    if !guard.service.exists(id).await? {
        return Err(AppError::not_found(
            format!("{} with id {} not found.", guard.entity, id),
            json!({ "id": id }),
        )
        .with_component(COMPONENT));
    }

    Ok(next.run(req).await)
}
