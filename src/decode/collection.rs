//! Query result decoding.

use serde_json::Value;

use super::decoder::Decoder;
use super::records::DomainRecord;
use crate::bag::Prop;
use crate::errors::{SyncError, SyncResult};
use crate::observability::{log_event_with_fields, Event};
use crate::vocab::EntityKind;

impl Decoder {
    /// Decodes every row of `query_result.results`, in input order.
    ///
    /// An absent or empty `results` list yields an empty vector. The first
    /// failing row aborts the batch; a `MissingSourceId` error carries the
    /// row's index.
    pub fn decode_all(&self, kind: EntityKind, query_result: &Value) -> SyncResult<Vec<DomainRecord>> {
        let rows = Prop::of(query_result).get("results").as_slice();

        let records = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                self.decode(kind, row).map_err(|err| {
                    let err = match err {
                        SyncError::MissingSourceId { .. } => {
                            SyncError::MissingSourceId { row_index: Some(index) }
                        }
                        other => other,
                    };
                    let index = index.to_string();
                    log_event_with_fields(
                        Event::RecordDecodeFailed,
                        &[("kind", kind.as_str()), ("row", index.as_str()), ("code", err.code())],
                    );
                    err
                })
            })
            .collect::<SyncResult<Vec<_>>>()?;

        let count = records.len().to_string();
        log_event_with_fields(
            Event::RecordsDecoded,
            &[("kind", kind.as_str()), ("count", count.as_str())],
        );
        Ok(records)
    }
}

/// Decodes a query result with the default policy.
pub fn decode_all(kind: EntityKind, query_result: &Value) -> SyncResult<Vec<DomainRecord>> {
    Decoder::default().decode_all(kind, query_result)
}

/// Keeps only records that still need outward reconciliation.
pub fn retain_pending(records: Vec<DomainRecord>) -> Vec<DomainRecord> {
    records.into_iter().filter(DomainRecord::is_pending).collect()
}
