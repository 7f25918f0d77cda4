//! Sync Source Tests
//!
//! Tests for the fetch/verify/decode pipeline over a fake transport:
//! - Schema is verified before any row is fetched
//! - Data source resolution from database objects
//! - Transport failures surface as retryable errors

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use rostersync::schema::contract_for;
use rostersync::source::{
    pending_filter, DatabaseKey, QueryTransport, SourceError, StaticConfig, SyncSource,
};
use rostersync::{EntityKind, SyncError, SyncStatus, ViolationKind};
use serde_json::{json, Value};

// =============================================================================
// Fake Transport
// =============================================================================

#[derive(Default)]
struct FakeNotion {
    schemas: HashMap<String, Value>,
    results: Value,
    healthy: bool,
    calls: Mutex<Vec<String>>,
    filters: Mutex<Vec<Option<Value>>>,
}

impl FakeNotion {
    fn with_schema(mut self, id: &str, schema: Value) -> Self {
        self.schemas.insert(id.to_string(), schema);
        self
    }

    fn with_results(mut self, rows: Vec<Value>) -> Self {
        self.results = json!({ "object": "list", "results": rows });
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryTransport for FakeNotion {
    async fn fetch_schema(&self, id: &str) -> Result<Value, SourceError> {
        self.calls.lock().unwrap().push(format!("schema:{id}"));
        self.schemas
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::unavailable(format!("object_not_found: {id}")))
    }

    async fn fetch_records(
        &self,
        source_id: &str,
        filter: Option<&Value>,
    ) -> Result<Value, SourceError> {
        self.calls.lock().unwrap().push(format!("records:{source_id}"));
        self.filters.lock().unwrap().push(filter.cloned());
        Ok(self.results.clone())
    }

    async fn check_health(&self) -> Result<(), SourceError> {
        if self.healthy {
            Ok(())
        } else {
            Err(SourceError::unavailable("401 unauthorized"))
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn config() -> StaticConfig {
    StaticConfig::new()
        .with(DatabaseKey::Member, "db-members")
        .with(DatabaseKey::Group, "db-groups")
        .with(DatabaseKey::Event, "db-events")
}

fn group_schema() -> Value {
    json!({
        "object": "data_source",
        "properties": contract_for(EntityKind::Group, &config()).to_property_bag()
    })
}

fn group_row(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "properties": {
            "Sync Status": { "type": "select", "select": { "name": status } }
        }
    })
}

// =============================================================================
// Verification
// =============================================================================

/// A database listing a data source is verified against that source.
#[tokio::test]
async fn test_verify_follows_data_source() {
    let transport = FakeNotion::default()
        .with_schema(
            "db-groups",
            json!({ "object": "database", "data_sources": [{ "id": "ds-groups", "name": "Groups" }] }),
        )
        .with_schema("ds-groups", group_schema());
    let source = SyncSource::new(transport, config());

    let id = source.verify(EntityKind::Group).await.unwrap();
    assert_eq!(id, "ds-groups");
    assert_eq!(
        source.transport().calls(),
        vec!["schema:db-groups", "schema:ds-groups"]
    );
}

/// A database carrying its own properties is validated directly.
#[tokio::test]
async fn test_verify_database_with_properties() {
    let transport = FakeNotion::default().with_schema("db-groups", group_schema());
    let source = SyncSource::new(transport, config());

    assert_eq!(source.verify(EntityKind::Group).await.unwrap(), "db-groups");
    assert_eq!(source.transport().calls(), vec!["schema:db-groups"]);
}

/// No rows are fetched when the live schema is invalid.
#[tokio::test]
async fn test_invalid_schema_blocks_pull() {
    let mut schema = group_schema();
    schema["properties"]
        .as_object_mut()
        .unwrap()
        .remove("Description");
    let transport = FakeNotion::default()
        .with_schema("db-groups", schema)
        .with_results(vec![group_row("g-1", "Synced")]);
    let source = SyncSource::new(transport, config());

    let err = source.pull(EntityKind::Group, None).await.unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].kind, ViolationKind::MissingField);
    assert!(source
        .transport()
        .calls()
        .iter()
        .all(|c| !c.starts_with("records:")));
}

/// Missing database configuration fails before any fetch.
#[tokio::test]
async fn test_unconfigured_database() {
    let source = SyncSource::new(FakeNotion::default(), StaticConfig::new());

    let err = source.verify(EntityKind::Event).await.unwrap_err();
    assert_eq!(err, SyncError::NotConfigured { key: DatabaseKey::Event });
    assert!(source.transport().calls().is_empty());
}

// =============================================================================
// Pulling Records
// =============================================================================

/// pull decodes every returned row in order.
#[tokio::test]
async fn test_pull_decodes_rows() {
    let transport = FakeNotion::default()
        .with_schema("db-groups", group_schema())
        .with_results(vec![group_row("g-2", "Synced"), group_row("g-1", "Update")]);
    let source = SyncSource::new(transport, config());

    let records = source.pull(EntityKind::Group, None).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].source_id(), "g-2");
    assert_eq!(records[1].status(), SyncStatus::Update);
    assert_eq!(source.transport().filters.lock().unwrap()[0], None);
}

/// pull_pending sends the pending filter and drops settled rows.
#[tokio::test]
async fn test_pull_pending() {
    let transport = FakeNotion::default()
        .with_schema("db-groups", group_schema())
        .with_results(vec![
            group_row("g-1", "Update"),
            group_row("g-2", "Synced"),
            group_row("g-3", "Delete"),
        ]);
    let source = SyncSource::new(transport, config());

    let records = source.pull_pending(EntityKind::Group).await.unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.source_id().to_string()).collect();
    assert_eq!(ids, vec!["g-1", "g-3"]);

    let filters = source.transport().filters.lock().unwrap();
    assert_eq!(filters[0].as_ref(), Some(&pending_filter()));
}

// =============================================================================
// Transport Failures
// =============================================================================

/// Missing objects surface as retryable SourceUnavailable.
#[tokio::test]
async fn test_transport_failure_is_retryable() {
    let source = SyncSource::new(FakeNotion::default(), config());

    let err = source.verify(EntityKind::Member).await.unwrap_err();
    assert_eq!(err.code(), "SYNC_SOURCE_UNAVAILABLE");
    assert!(err.is_retryable());
    assert!(err.to_string().contains("db-members"));
}

/// Health check reports the transport state.
#[tokio::test]
async fn test_check_health() {
    let healthy = FakeNotion {
        healthy: true,
        ..FakeNotion::default()
    };
    assert!(SyncSource::new(healthy, config()).check_health().await.is_ok());

    let err = SyncSource::new(FakeNotion::default(), config())
        .check_health()
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::SourceUnavailable { .. }));
}
