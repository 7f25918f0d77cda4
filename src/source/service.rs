//! Sync source: fetch, verify, decode.
//!
//! [`SyncSource`] owns an explicitly constructed transport and configuration
//! accessor. Nothing is cached between calls: every operation rebuilds the
//! contract from the current configuration and re-verifies the live schema
//! before trusting rows.

use serde_json::{json, Value};

use super::config::{ConfigAccessor, DatabaseKey};
use super::transport::QueryTransport;
use crate::bag::Prop;
use crate::decode::{retain_pending, DecodePolicy, Decoder, DomainRecord};
use crate::errors::{SyncError, SyncResult};
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{contract_for, property, SchemaContract, SchemaValidator};
use crate::vocab::{EntityKind, SyncStatus};

pub struct SyncSource<T, C> {
    transport: T,
    config: C,
    decoder: Decoder,
}

impl<T: QueryTransport, C: ConfigAccessor> SyncSource<T, C> {
    pub fn new(transport: T, config: C) -> Self {
        Self {
            transport,
            config,
            decoder: Decoder::default(),
        }
    }

    pub fn with_policy(mut self, policy: DecodePolicy) -> Self {
        self.decoder = Decoder::new(policy);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// The contract for `kind` under the current configuration.
    pub fn contract(&self, kind: EntityKind) -> SchemaContract {
        contract_for(kind, &self.config)
    }

    fn database_id(&self, kind: EntityKind) -> SyncResult<String> {
        let key = DatabaseKey::for_kind(kind);
        self.config
            .configured_id(key)
            .ok_or(SyncError::NotConfigured { key })
    }

    /// Fetches the live schema for `kind` and checks it against the
    /// contract.
    ///
    /// Returns the data source id rows should be queried from.
    pub async fn verify(&self, kind: EntityKind) -> SyncResult<String> {
        let database_id = self.database_id(kind)?;
        let database = self.fetch_schema(kind, &database_id).await?;

        let source_id = resolve_data_source_id(&database).unwrap_or_else(|| database_id.clone());
        let schema = if Prop::of(&database).get("properties").is_present() || source_id == database_id
        {
            database
        } else {
            self.fetch_schema(kind, &source_id).await?
        };

        SchemaValidator::new(&self.contract(kind)).validate(&schema)?;
        Ok(source_id)
    }

    /// Verifies the schema, then fetches and decodes rows matching `filter`.
    pub async fn pull(&self, kind: EntityKind, filter: Option<&Value>) -> SyncResult<Vec<DomainRecord>> {
        let source_id = self.verify(kind).await?;

        log_event_with_fields(
            Event::SourceFetch,
            &[("kind", kind.as_str()), ("source_id", source_id.as_str())],
        );
        let result = self
            .transport
            .fetch_records(&source_id, filter)
            .await
            .map_err(|e| self.unavailable(kind, e.into()))?;

        self.decoder.decode_all(kind, &result)
    }

    /// Rows whose status requires outward action.
    pub async fn pull_pending(&self, kind: EntityKind) -> SyncResult<Vec<DomainRecord>> {
        let filter = pending_filter();
        let records = self.pull(kind, Some(&filter)).await?;
        Ok(retain_pending(records))
    }

    pub async fn check_health(&self) -> SyncResult<()> {
        self.transport.check_health().await.map_err(SyncError::from)
    }

    async fn fetch_schema(&self, kind: EntityKind, id: &str) -> SyncResult<Value> {
        log_event_with_fields(Event::SourceFetch, &[("kind", kind.as_str()), ("schema", id)]);
        self.transport
            .fetch_schema(id)
            .await
            .map_err(|e| self.unavailable(kind, e.into()))
    }

    fn unavailable(&self, kind: EntityKind, err: SyncError) -> SyncError {
        log_event_with_fields(
            Event::SourceUnavailable,
            &[("kind", kind.as_str()), ("error", err.to_string().as_str())],
        );
        err
    }
}

/// First data source id listed on a database object.
pub fn resolve_data_source_id(database: &Value) -> Option<String> {
    Prop::of(database)
        .get("data_sources")
        .first()
        .get("id")
        .as_str()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Query filter matching every pending status label.
pub fn pending_filter() -> Value {
    let clauses: Vec<Value> = SyncStatus::pending()
        .map(|status| {
            json!({
                "property": property::SYNC_STATUS,
                "select": { "equals": status.label() }
            })
        })
        .collect();
    json!({ "or": clauses })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{SourceError, StaticConfig};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeTransport {
        schemas: Vec<(String, Value)>,
        records: Value,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl QueryTransport for FakeTransport {
        async fn fetch_schema(&self, id: &str) -> Result<Value, SourceError> {
            self.calls.lock().unwrap().push(format!("schema:{}", id));
            self.schemas
                .iter()
                .find(|(k, _)| k == id)
                .map(|(_, v)| v.clone())
                .ok_or_else(|| SourceError::unavailable(format!("404 {}", id)))
        }

        async fn fetch_records(&self, source_id: &str, _filter: Option<&Value>) -> Result<Value, SourceError> {
            self.calls.lock().unwrap().push(format!("records:{}", source_id));
            Ok(self.records.clone())
        }

        async fn check_health(&self) -> Result<(), SourceError> {
            Ok(())
        }
    }

    fn config() -> StaticConfig {
        StaticConfig::new().with(DatabaseKey::Group, "grp-db")
    }

    #[test]
    fn test_resolve_data_source_id() {
        assert_eq!(
            resolve_data_source_id(&json!({ "data_sources": [{ "id": "ds-1" }, { "id": "ds-2" }] })),
            Some("ds-1".into())
        );
        assert_eq!(resolve_data_source_id(&json!({ "data_sources": [] })), None);
        assert_eq!(resolve_data_source_id(&json!({})), None);
    }

    #[test]
    fn test_pending_filter_lists_pending_labels() {
        let filter = pending_filter();
        let labels: Vec<_> = filter["or"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["select"]["equals"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["Update", "Delete"]);
        assert_eq!(filter["or"][0]["property"], "Sync Status");
    }

    #[tokio::test]
    async fn test_verify_follows_data_source() {
        let contract_bag = contract_for(EntityKind::Group, &config()).to_property_bag();
        let transport = FakeTransport {
            schemas: vec![
                ("grp-db".into(), json!({ "object": "database", "data_sources": [{ "id": "grp-ds" }] })),
                ("grp-ds".into(), json!({ "object": "data_source", "properties": contract_bag })),
            ],
            ..FakeTransport::default()
        };
        let source = SyncSource::new(transport, config());

        assert_eq!(source.verify(EntityKind::Group).await.unwrap(), "grp-ds");
        assert_eq!(
            *source.transport().calls.lock().unwrap(),
            vec!["schema:grp-db".to_string(), "schema:grp-ds".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unconfigured_database() {
        let source = SyncSource::new(FakeTransport::default(), StaticConfig::new());
        let err = source.verify(EntityKind::Member).await.unwrap_err();
        assert_eq!(err, SyncError::NotConfigured { key: DatabaseKey::Member });
        assert!(source.transport().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_source_unavailable() {
        let source = SyncSource::new(FakeTransport::default(), config());
        let err = source.pull(EntityKind::Group, None).await.unwrap_err();
        assert_eq!(err.code(), "SYNC_SOURCE_UNAVAILABLE");
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_invalid_schema_blocks_record_fetch() {
        let transport = FakeTransport {
            schemas: vec![("grp-db".into(), json!({ "properties": {} }))],
            records: json!({ "results": [{ "id": "g-1" }] }),
            ..FakeTransport::default()
        };
        let source = SyncSource::new(transport, config());

        let err = source.pull(EntityKind::Group, None).await.unwrap_err();
        assert_eq!(err.code(), "SYNC_SCHEMA_INVALID");
        assert!(!source
            .transport()
            .calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.starts_with("records:")));
    }
}
