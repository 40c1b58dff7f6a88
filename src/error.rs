use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::avatar::AvatarError;
use crate::middleware::logging::to_response;
use crate::store::StoreError;

/// Everything a handler can fail with. Rendered as `{"detail": ...}`.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Failed to validate: {0}")]
    Validation(String),
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    BadGateway(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message shown to the caller. Database details stay in the logs.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Database(_) => "Internal server error".to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = (self.status(), Json(json!({ "detail": self.detail() })));
        to_response(body, Err(self))
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::CategoryNotFound(_) | StoreError::ProductNotFound(_) => {
                ApiError::NotFound(value.to_string())
            }
            StoreError::CategoryExists(_) | StoreError::ProductExists(_) => {
                ApiError::Conflict(value.to_string())
            }
            StoreError::UnknownCategory(_) => ApiError::BadRequest(value.to_string()),
            StoreError::Db(err) => ApiError::Database(err.to_string()),
        }
    }
}

impl From<AvatarError> for ApiError {
    fn from(value: AvatarError) -> Self {
        match value {
            AvatarError::NotFound => ApiError::NotFound(value.to_string()),
            AvatarError::FileInfo | AvatarError::MalformedResponse(_) => {
                ApiError::Upstream(value.to_string())
            }
            AvatarError::Download(_) | AvatarError::Transport(_) => {
                ApiError::BadGateway(value.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        ApiError::Validation(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        ApiError::BadRequest(value.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(value: validator::ValidationErrors) -> Self {
        ApiError::Validation(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_http_statuses() {
        let cases = [
            (StoreError::CategoryNotFound("fruit".into()), StatusCode::NOT_FOUND),
            (StoreError::ProductNotFound("apple".into()), StatusCode::NOT_FOUND),
            (StoreError::CategoryExists("fruit".into()), StatusCode::BAD_REQUEST),
            (StoreError::UnknownCategory("fruit".into()), StatusCode::BAD_REQUEST),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn avatar_errors_map_to_http_statuses() {
        assert_eq!(ApiError::from(AvatarError::NotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(AvatarError::FileInfo).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(AvatarError::Download(StatusCode::FORBIDDEN.as_u16())).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn database_detail_is_generic() {
        let err = ApiError::Database("disk I/O error".into());
        assert_eq!(err.detail(), "Internal server error");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
