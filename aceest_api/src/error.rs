//! HTTP error mapping for rejected requests.

use aceest_core::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error returned by request handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body was not sent as JSON
    #[error("Expected application/json")]
    UnsupportedMediaType,

    /// Body was JSON-typed but could not be decoded into a submission
    #[error("{0}")]
    BadPayload(String),

    /// Rejected by the workout store
    #[error(transparent)]
    Core(#[from] Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::BadPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::Core(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Core(Error::InvalidCategory { allowed }) => json!({
                "error": self.to_string(),
                "valid_categories": allowed,
            }),
            ApiError::Core(e) if !e.is_validation() => {
                tracing::error!("Internal error while handling request: {}", e);
                json!({ "error": "Internal server error" })
            }
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aceest_core::Category;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::UnsupportedMediaType.status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            ApiError::BadPayload("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(Error::InvalidCategory {
                allowed: Category::names()
            })
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(Error::MissingField { field: "exercise" }).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(Error::InvalidDuration("abc".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(Error::Config("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
