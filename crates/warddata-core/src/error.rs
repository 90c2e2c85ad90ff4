use std::fmt;

use thiserror::Error;

/// Boxed driver-level cause carried by [`WardError::DataAccess`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by the executor and the query builders.
///
/// Standardizers never produce these; partial input yields a partial record.
#[derive(Debug, Error)]
pub enum WardError {
    /// A required query template or column mapping is missing or empty.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Statement execution failed (connectivity, SQL error, driver fault).
    #[error("Data access error executing '{query}': {source}")]
    DataAccess {
        /// Query key, or `raw SQL` for composed statements.
        query: String,
        #[source]
        source: BoxError,
    },

    /// The episode does not exist or is excluded by a specialty scope.
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Pagination was requested for a DBMS family without a known dialect.
    #[error("Pagination not implemented for database family '{family}'")]
    UnsupportedDatabase { family: String },

    /// Caller input that can never produce a valid statement.
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

impl WardError {
    /// Create a new `Configuration` error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a new `DataAccess` error wrapping the original cause
    #[must_use]
    pub fn data_access(query: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::DataAccess {
            query: query.into(),
            source: source.into(),
        }
    }

    /// Create a new `NotFound` error
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new `UnsupportedDatabase` error
    #[must_use]
    pub fn unsupported_database(family: impl Into<String>) -> Self {
        Self::UnsupportedDatabase {
            family: family.into(),
        }
    }

    /// Create a new `InvalidRequest` error
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    #[must_use]
    pub fn is_data_access(&self) -> bool {
        matches!(self, Self::DataAccess { .. })
    }

    /// Returns the error category for logging and for status mapping by callers.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::DataAccess { .. } => ErrorCategory::DataAccess,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::UnsupportedDatabase { .. } => ErrorCategory::UnsupportedDatabase,
            Self::InvalidRequest { .. } => ErrorCategory::InvalidRequest,
        }
    }
}

/// Categories of access-layer errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    DataAccess,
    NotFound,
    UnsupportedDatabase,
    InvalidRequest,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration"),
            Self::DataAccess => write!(f, "data_access"),
            Self::NotFound => write!(f, "not_found"),
            Self::UnsupportedDatabase => write!(f, "unsupported_database"),
            Self::InvalidRequest => write!(f, "invalid_request"),
        }
    }
}

/// Result type alias for access-layer operations.
pub type Result<T> = std::result::Result<T, WardError>;
