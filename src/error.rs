//! Application error type and its mapping to HTTP responses.
//!
//! Every failure that reaches the HTTP boundary is an [`AppError`]. Each variant
//! carries a human-readable message, free-form JSON details and, optionally, the
//! name of the component that raised it.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    component: Option<&'static str>,
    details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        details: Value,
        component: Option<&'static str>,
    },
    #[error("{message}")]
    Unauthorized {
        message: String,
        details: Value,
        component: Option<&'static str>,
    },
    #[error("{message}")]
    Forbidden {
        message: String,
        details: Value,
        component: Option<&'static str>,
    },
    #[error("{message}")]
    NotFound {
        message: String,
        details: Value,
        component: Option<&'static str>,
    },
    #[error("{message}")]
    Conflict {
        message: String,
        details: Value,
        component: Option<&'static str>,
    },
    #[error("{message}")]
    NotImplemented {
        message: String,
        details: Value,
        component: Option<&'static str>,
    },
    #[error("{message}")]
    Internal {
        message: String,
        details: Value,
        component: Option<&'static str>,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
            component: None,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
            component: None,
        }
    }
    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
            component: None,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
            component: None,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
            component: None,
        }
    }
    pub fn not_implemented(message: impl Into<String>, details: Value) -> Self {
        Self::NotImplemented {
            message: message.into(),
            details,
            component: None,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
            component: None,
        }
    }

    /// Tags the error with the name of the component that raised it.
    pub fn with_component(mut self, name: &'static str) -> Self {
        match &mut self {
            Self::Validation { component, .. }
            | Self::Unauthorized { component, .. }
            | Self::Forbidden { component, .. }
            | Self::NotFound { component, .. }
            | Self::Conflict { component, .. }
            | Self::NotImplemented { component, .. }
            | Self::Internal { component, .. } => *component = Some(name),
        }
        self
    }

    /// Name of the component that raised the error, if tagged.
    pub fn component(&self) -> Option<&'static str> {
        match self {
            Self::Validation { component, .. }
            | Self::Unauthorized { component, .. }
            | Self::Forbidden { component, .. }
            | Self::NotFound { component, .. }
            | Self::Conflict { component, .. }
            | Self::NotImplemented { component, .. }
            | Self::Internal { component, .. } => *component,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::NotImplemented { .. } => StatusCode::NOT_IMPLEMENTED,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message, details, component) = match self {
            AppError::Validation {
                message,
                details,
                component,
            } => ("validation_error", message, details, component),
            AppError::Unauthorized {
                message,
                details,
                component,
            } => ("unauthorized", message, details, component),
            AppError::Forbidden {
                message,
                details,
                component,
            } => ("forbidden", message, details, component),
            AppError::NotFound {
                message,
                details,
                component,
            } => ("not_found", message, details, component),
            AppError::Conflict {
                message,
                details,
                component,
            } => ("conflict", message, details, component),
            AppError::NotImplemented {
                message,
                details,
                component,
            } => ("not_implemented", message, details, component),
            AppError::Internal {
                message,
                details,
                component,
            } => ("internal_error", message, details, component),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                component,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields: BTreeMap<String, Vec<String>> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        AppError::bad_request("Validation failed", json!({ "fields": fields }))
    }
}

/// Maps database errors: unique violations are 409, dangling references
/// (e.g. a token whose account no longer exists) are 404, the rest is 500.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
        if db.is_foreign_key_violation() {
            tracing::warn!(constraint = ?db.constraint(), "Referenced document does not exist");
            return AppError::not_found(
                "Referenced document not found",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    tracing::error!(error = %e, "Database error");
    AppError::internal("Database error", json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct RatedName {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
        #[validate(range(min = 1, max = 5))]
        rating: u8,
    }

    #[derive(Debug)]
    struct FakeDbError {
        foreign_key: bool,
        constraint: &'static str,
    }

    impl std::fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "violates {}", self.constraint)
        }
    }

    impl std::error::Error for FakeDbError {}

    impl sqlx::error::DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "constraint violation"
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            if self.foreign_key {
                sqlx::error::ErrorKind::ForeignKeyViolation
            } else {
                sqlx::error::ErrorKind::UniqueViolation
            }
        }
    }

    fn db_error(foreign_key: bool, constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError {
            foreign_key,
            constraint,
        }))
    }

    #[test]
    fn test_unique_violation_is_conflict() {
        let err = map_sqlx_error(db_error(false, "users_email_key"));

        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_foreign_key_violation_is_not_found() {
        let err = map_sqlx_error(db_error(true, "offers_author_id_fkey"));

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        match err {
            AppError::NotFound { details, .. } => {
                assert_eq!(details["constraint"], "offers_author_id_fkey");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_other_database_errors_are_internal() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unauthorized("x", json!({})).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::forbidden("x", json!({})).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::not_implemented("x", json!({})).status(),
            StatusCode::NOT_IMPLEMENTED
        );
    }

    #[test]
    fn test_with_component() {
        let err = AppError::not_found("Offer not found", json!({})).with_component("OfferController");
        assert_eq!(err.component(), Some("OfferController"));
        assert_eq!(err.to_string(), "Offer not found");
    }

    #[test]
    fn test_validation_errors_list_fields() {
        let rated = RatedName {
            name: "ab".to_string(),
            rating: 9,
        };
        let err: AppError = rated.validate().unwrap_err().into();

        match err {
            AppError::Validation { details, .. } => {
                assert_eq!(details["fields"]["name"][0], "too short");
                assert_eq!(details["fields"]["rating"][0], "range");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
