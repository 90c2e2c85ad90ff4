//! Execution seam of the ward query layer.
//!
//! [`DataSource`] is the read-only connection a backend provides;
//! [`QueryExecutor`] is the single chokepoint every statement goes through.
//! [`MemorySource`] answers statements from scripted rows and records what it
//! was asked, for tests and offline demos.

pub mod executor;
pub mod memory;
pub mod source;

pub use executor::QueryExecutor;
pub use memory::{MemorySource, RecordedCall, row};
pub use source::{DataSource, SourceError};
