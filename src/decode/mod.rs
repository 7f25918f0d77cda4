//! Record decoding subsystem
//!
//! Turns raw rows returned by the external document database into typed
//! [`DomainRecord`]s. Drafts are expected to be incomplete, so missing data
//! becomes zero values instead of errors.

mod collection;
mod decoder;
mod records;

pub use collection::{decode_all, retain_pending};
pub use decoder::{decode, DecodePolicy, Decoder, RolePolicy};
pub use records::{
    parse_external_date, DomainRecord, EventRecord, GroupRecord, MemberRecord,
};
