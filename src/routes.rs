//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`  - Health check (public)
//! - `/offers/*`    - Offers and their comments
//! - `/comments`    - Comment creation
//! - `/users/*`     - Registration, login and favourites
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token decoded on every request
//!
//! Rate limiting and path normalization are added by [`crate::server::run`],
//! since they depend on the transport.

use axum::routing::get;
use axum::{Router, middleware};

use crate::api::handlers::health_handler;
use crate::api::middleware::{authenticate, tracing};
use crate::api::routes::{comment_routes, offer_routes, user_routes};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(offer_routes(&state))
        .merge(comment_routes())
        .merge(user_routes(&state))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate::layer,
        ))
        .with_state(state)
        .layer(tracing::layer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::Mocks;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = app_router(Mocks::default().state());

        let response = app
            .oneshot(Request::get("/links").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wrong_method_is_not_allowed() {
        let app = app_router(Mocks::default().state());

        let response = app
            .oneshot(Request::put("/offers").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
