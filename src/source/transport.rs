//! Query transport seam.
//!
//! The HTTP client for the external document database lives outside this
//! crate. It plugs in through [`QueryTransport`] and reports every failure
//! (auth, rate limit, not found, network) as [`SourceError::Unavailable`].

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::errors::SyncError;

/// Transport failure, opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("{0}")]
    Unavailable(String),
}

impl SourceError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        SourceError::Unavailable(reason.into())
    }
}

impl From<SourceError> for SyncError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Unavailable(reason) => SyncError::SourceUnavailable { reason },
        }
    }
}

/// Read access to the external document database.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    /// Fetches the schema-bearing object for `id`: a database (which may list
    /// its data sources) or a data source (which carries `properties`).
    async fn fetch_schema(&self, id: &str) -> Result<Value, SourceError>;

    /// Queries rows of a data source. Returns `{"results": [...]}`.
    async fn fetch_records(
        &self,
        source_id: &str,
        filter: Option<&Value>,
    ) -> Result<Value, SourceError>;

    /// Cheap authenticated round trip.
    async fn check_health(&self) -> Result<(), SourceError>;
}
