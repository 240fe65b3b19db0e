//! Error types for the GraphQL API.
//!
//! Storage errors are translated into GraphQL errors carrying an
//! `extensions.code`, or into HTTP responses for the plain endpoints.
//!
//! # Error Mapping
//!
//! | Storage Error | GraphQL code | HTTP Status |
//! |--------------|--------------|-------------|
//! | InvalidCursor | `BAD_USER_INPUT` | 400 |
//! | Criteria | `BAD_USER_INPUT` | 400 |
//! | SearchFailed / Backend | `INTERNAL_SERVER_ERROR` | 500 |
//!
//! Store failures are reported with an opaque message; the details only go
//! to the log.

use async_graphql::ErrorExtensions;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lorebot_persistence::error::{SearchError, StorageError};
use thiserror::Error;
use tracing::error;

/// The error type of the API layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller supplied an argument that cannot be used.
    #[error("{message}")]
    BadUserInput {
        /// Description of the rejected input.
        message: String,
    },

    /// The data store failed while answering.
    #[error("{message}")]
    Internal {
        /// Message shown to the caller.
        message: String,
    },

    /// The data store cannot be reached.
    #[error("service unavailable: {message}")]
    Unavailable {
        /// Reason reported by the health check.
        message: String,
    },
}

/// Result type for GraphQL resolvers.
pub type ApiResult<T> = async_graphql::Result<T>;

impl ApiError {
    /// Returns the GraphQL `extensions.code` of this error.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadUserInput { .. } => "BAD_USER_INPUT",
            ApiError::Internal { .. } => "INTERNAL_SERVER_ERROR",
            ApiError::Unavailable { .. } => "SERVICE_UNAVAILABLE",
        }
    }

    /// Returns the HTTP status of this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadUserInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Search(SearchError::InvalidCursor { cursor }) => ApiError::BadUserInput {
                message: format!("invalid cursor: {}", cursor),
            },
            StorageError::Criteria(e) => ApiError::BadUserInput {
                message: e.to_string(),
            },
            StorageError::Search(SearchError::SearchFailed { .. }) => ApiError::Internal {
                message: "search failed".to_string(),
            },
            other => {
                error!(error = %other, "Storage operation failed");
                ApiError::Internal {
                    message: "internal error".to_string(),
                }
            }
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

/// Converts a storage error straight into a GraphQL error.
pub fn graphql_error(err: StorageError) -> async_graphql::Error {
    ApiError::from(err).extend()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        });
        (self.status_code(), Json(body)).into_response()
    }
}
