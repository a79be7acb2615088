use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cineshelf_core::{CatalogError, ValidationErrors};
use serde_json::json;
use std::fmt;

pub type AppResult<T> = Result<T, AppError>;

/// HTTP-facing error: a status, a message, and optionally the per-field
/// map a form needs to redisplay itself.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub fields: Option<ValidationErrors>,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            fields: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn validation(errors: ValidationErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "validation failed".to_string(),
            fields: Some(errors),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut error = json!({
            "message": self.message,
            "status": self.status.as_u16(),
        });
        if let Some(fields) = &self.fields {
            error["fields"] = json!(fields);
        }

        (self.status, Json(json!({ "error": error }))).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(what) => Self::not_found(what),
            CatalogError::Validation(errors) => Self::validation(errors),
            CatalogError::InvalidCredentials => {
                Self::unauthorized("invalid credentials")
            }
            CatalogError::NotAuthorizedAsAdmin => {
                Self::forbidden("not authorized as admin")
            }
            CatalogError::Unauthenticated => {
                Self::unauthorized("authentication required")
            }
            CatalogError::Forbidden => Self::forbidden("admin access required"),
            CatalogError::Database(err) => {
                tracing::error!(error = %err, "database error");
                Self::internal("internal server error")
            }
            CatalogError::Internal(message) => {
                tracing::error!(error = %message, "internal error");
                Self::internal("internal server error")
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(error = %err, "unhandled error");
        Self::internal("internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_map_to_expected_statuses() {
        let cases = [
            (CatalogError::not_found("movie 9"), StatusCode::NOT_FOUND),
            (CatalogError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (CatalogError::NotAuthorizedAsAdmin, StatusCode::FORBIDDEN),
            (CatalogError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (CatalogError::Forbidden, StatusCode::FORBIDDEN),
            (
                CatalogError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status, status);
        }
    }

    #[test]
    fn validation_errors_keep_their_field_map() {
        let err = CatalogError::invalid_field("title", "required");
        let app_err = AppError::from(err);

        assert_eq!(app_err.status, StatusCode::UNPROCESSABLE_ENTITY);
        let fields = app_err.fields.expect("fields preserved");
        assert_eq!(fields.field("title"), Some("required"));
    }

    #[test]
    fn database_errors_hide_details_from_the_client() {
        let err = CatalogError::Database(sqlx::Error::PoolClosed);
        let app_err = AppError::from(err);

        assert_eq!(app_err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(app_err.message, "internal server error");
    }
}
