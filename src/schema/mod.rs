//! Schema contract subsystem
//!
//! Every external database must match its entity kind's contract before any
//! of its rows are trusted.
//!
//! # Design Principles
//!
//! - Contracts are value objects, rebuilt from configuration on each use
//! - The contract drives validation; extra live fields are ignored
//! - Every violation is reported in one pass, never only the first
//! - Deterministic violation order

mod contract;
mod errors;
mod types;
mod validator;

pub use contract::{
    contract_for, event_contract, group_contract, member_contract, property, SchemaContract,
};
pub use errors::{Violation, ViolationKind};
pub use types::{FieldConstraint, FieldSpec, RelationTarget};
pub use validator::{validate, SchemaValidator};
