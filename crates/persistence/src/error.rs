//! Error types for the persistence layer.
//!
//! The hierarchy separates criteria errors (the flexible-search language
//! rejected the input), search errors (pagination and execution failures seen
//! by callers) and backend errors (whatever the data store reported).

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Criteria language errors
    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    /// Search operation errors
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Reasons a criteria string is rejected as a whole.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    /// Nothing but whitespace was supplied.
    #[error("criteria is empty")]
    Empty,

    /// A clause does not have the `field operator value` shape.
    #[error("malformed criteria clause: '{clause}'")]
    MalformedClause { clause: String },

    /// A clause names a field outside the accepted set.
    #[error("unknown criteria field: '{field}'")]
    UnknownField { field: String },
}

/// A single clause that could not be compiled.
///
/// These never abort a search; the compiler logs them and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedFieldValue {
    /// A numeric field received a value that is not an integer.
    #[error("field '{field}' expects an integer, got '{value}'")]
    NotAnInteger { field: String, value: String },
}

/// Errors related to search operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// A pagination cursor was supplied but could not be decoded.
    #[error("invalid pagination cursor: {cursor}")]
    InvalidCursor { cursor: String },

    /// The data store failed while answering a search.
    #[error("search failed on {table}")]
    SearchFailed {
        table: String,
        #[source]
        source: Box<StorageError>,
    },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Connection pool exhausted.
    #[error("connection pool exhausted for {backend_name}")]
    PoolExhausted { backend_name: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryError { message: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

impl StorageError {
    /// Returns true when the error was caused by a malformed cursor.
    pub fn is_invalid_cursor(&self) -> bool {
        matches!(self, StorageError::Search(SearchError::InvalidCursor { .. }))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Backend(BackendError::SerializationError {
            message: err.to_string(),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(_err: r2d2::Error) -> Self {
        StorageError::Backend(BackendError::PoolExhausted {
            backend_name: "sqlite".to_string(),
        })
    }
}
