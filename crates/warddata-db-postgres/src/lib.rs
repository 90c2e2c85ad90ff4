//! PostgreSQL data source for the ward query layer.
//!
//! Connections are opened with `default_transaction_read_only = on`, so the
//! pool can only ever read from the hospital database.

pub mod config;
pub mod error;
pub mod pool;
pub mod source;

pub use config::PostgresConfig;
pub use error::{PostgresError, Result};
pub use pool::create_pool;
pub use source::PostgresSource;
