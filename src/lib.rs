//! rostersync - schema validation and typed record decoding for a club roster
//!
//! Members, groups and events are authored in an external document database.
//! Before any row is trusted, the database's live schema is checked against a
//! contract; matching rows are then decoded into typed records carrying a
//! [`SyncStatus`] that tells downstream reconciliation what still has to be
//! pushed.
//!
//! ```
//! use rostersync::{decode, EntityKind, SyncStatus};
//! use serde_json::json;
//!
//! let row = json!({
//!     "id": "g-1",
//!     "properties": {
//!         "Sync Status": { "type": "select", "select": { "name": "Update" } }
//!     }
//! });
//! let record = decode(EntityKind::Group, &row).unwrap();
//! assert_eq!(record.status(), SyncStatus::Update);
//! assert_eq!(record.as_group().unwrap().description, "");
//! ```

pub mod bag;
pub mod cli;
pub mod decode;
pub mod errors;
pub mod observability;
pub mod schema;
pub mod source;
pub mod vocab;

pub use decode::{decode, decode_all, DomainRecord};
pub use errors::{SyncError, SyncResult};
pub use schema::{contract_for, validate, SchemaContract, Violation, ViolationKind};
pub use vocab::{EntityKind, Role, SyncStatus};
