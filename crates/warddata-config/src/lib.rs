//! Configuration for the WardData access layer.
//!
//! Two layers live here:
//!
//! - [`AppConfig`]: the process configuration (logging, database pool and
//!   the hospital document), loaded from a TOML file plus `WARDDATA__*`
//!   environment overrides by [`loader::load_config`].
//! - [`HospitalConfig`]: the runtime document that makes the query layer
//!   schema-agnostic. It holds the named SQL templates (`queries.*`), the
//!   logical-field to vendor-column mapping (`columns.*`), sort-key tables
//!   (`sorting.*`), semantic constants (`parameters.*`), table aliases
//!   (`aliases.*`) and the DBMS selector (`dbms.*`). It is built once at
//!   startup and handed to the executor and builders by `Arc`.

pub mod app;
pub mod hospital;
pub mod loader;
pub mod template;

pub use app::{AppConfig, DatabaseConfig, LoggingConfig};
pub use hospital::{ColumnMap, HospitalConfig, is_identifier};
pub use loader::load_config;
pub use template::QueryTemplate;

/// Error types for configuration loading and validation
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Load error: {0}")]
    Load(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
