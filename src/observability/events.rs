//! Observable events for rostersync.
//!
//! Events are explicit and typed; each log line carries one of these names in
//! its `event` field.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Schema validation
    /// Validation of a live schema begins
    SchemaValidationStart,
    /// Live schema satisfies the contract
    SchemaValidationPassed,
    /// Live schema violates the contract
    SchemaValidationFailed,
    /// Relation target not configured; check skipped
    RelationCheckRelaxed,

    // Decoding
    /// Query result decoded
    RecordsDecoded,
    /// A row could not be decoded
    RecordDecodeFailed,

    // Source
    /// Request sent to the external source
    SourceFetch,
    /// External source failed
    SourceUnavailable,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::SchemaValidationStart => "SCHEMA_VALIDATION_START",
            Event::SchemaValidationPassed => "SCHEMA_VALIDATION_PASSED",
            Event::SchemaValidationFailed => "SCHEMA_VALIDATION_FAILED",
            Event::RelationCheckRelaxed => "RELATION_CHECK_RELAXED",

            Event::RecordsDecoded => "RECORDS_DECODED",
            Event::RecordDecodeFailed => "RECORD_DECODE_FAILED",

            Event::SourceFetch => "SOURCE_FETCH",
            Event::SourceUnavailable => "SOURCE_UNAVAILABLE",
        }
    }

    /// Default severity for this event
    pub fn severity(&self) -> Severity {
        match self {
            Event::SchemaValidationStart | Event::SourceFetch | Event::RecordsDecoded => {
                Severity::Debug
            }
            Event::ConfigLoaded | Event::SchemaValidationPassed => Severity::Info,
            Event::RelationCheckRelaxed | Event::SourceUnavailable => Severity::Warn,
            Event::SchemaValidationFailed | Event::RecordDecodeFailed => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}
