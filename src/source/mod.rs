//! External source seams
//!
//! - [`QueryTransport`]: fetches schemas and rows (implemented outside this crate)
//! - [`ConfigAccessor`]: supplies configured database identifiers
//! - [`SyncSource`]: composes both with the schema and decode subsystems

mod config;
mod service;
mod transport;

pub use config::{ConfigAccessor, DatabaseKey, FileConfig, StaticConfig};
pub use service::{pending_filter, resolve_data_source_id, SyncSource};
pub use transport::{QueryTransport, SourceError};
