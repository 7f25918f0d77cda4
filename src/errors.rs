//! Crate-level error taxonomy.
//!
//! Error codes:
//! - SYNC_SCHEMA_INVALID (fix the external schema, not retryable as-is)
//! - SYNC_UNKNOWN_STATUS (label drift, not retryable)
//! - SYNC_UNKNOWN_ROLE (label drift, not retryable)
//! - SYNC_MISSING_SOURCE_ID (malformed row, not retryable)
//! - SYNC_NOT_CONFIGURED (missing configuration, not retryable)
//! - SYNC_SOURCE_UNAVAILABLE (transport failure, retryable with backoff)
//!
//! Missing or malformed optional data is never an error; the decoder absorbs
//! it into zero values.

use thiserror::Error;

use crate::schema::Violation;
use crate::source::DatabaseKey;
use crate::vocab::EntityKind;

/// Result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Live schema does not satisfy the contract; carries every violation
    #[error(
        "{kind} database schema is invalid ({} violation(s)):\n{}",
        .violations.len(),
        render_violations(.violations)
    )]
    SchemaInvalid {
        kind: EntityKind,
        violations: Vec<Violation>,
    },

    /// Status label outside the vocabulary for this entity kind
    #[error("{kind} row '{source_id}' has unknown sync status '{label}'")]
    UnknownStatus {
        kind: EntityKind,
        source_id: String,
        label: String,
    },

    /// Role label outside the vocabulary, under a rejecting role policy
    #[error("member row '{source_id}' has unknown role '{label}'")]
    UnknownRole { source_id: String, label: String },

    /// Row without a usable source identifier
    #[error("row{} has no source identifier", render_row_index(.row_index))]
    MissingSourceId { row_index: Option<usize> },

    /// Database identifier required for the operation is not configured
    #[error("database id {key} is not configured")]
    NotConfigured { key: DatabaseKey },

    /// Transport-level failure, opaque to this crate
    #[error("external source unavailable: {reason}")]
    SourceUnavailable { reason: String },
}

impl SyncError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SyncError::SchemaInvalid { .. } => "SYNC_SCHEMA_INVALID",
            SyncError::UnknownStatus { .. } => "SYNC_UNKNOWN_STATUS",
            SyncError::UnknownRole { .. } => "SYNC_UNKNOWN_ROLE",
            SyncError::MissingSourceId { .. } => "SYNC_MISSING_SOURCE_ID",
            SyncError::NotConfigured { .. } => "SYNC_NOT_CONFIGURED",
            SyncError::SourceUnavailable { .. } => "SYNC_SOURCE_UNAVAILABLE",
        }
    }

    /// Only transport failures may be retried; everything else reproduces
    /// until the data or configuration changes.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::SourceUnavailable { .. })
    }

    /// Violations carried by a `SchemaInvalid` error, empty otherwise
    pub fn violations(&self) -> &[Violation] {
        match self {
            SyncError::SchemaInvalid { violations, .. } => violations,
            _ => &[],
        }
    }
}

fn render_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {}", v))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_row_index(row_index: &Option<usize>) -> String {
    match row_index {
        Some(i) => format!(" {}", i),
        None => String::new(),
    }
}
