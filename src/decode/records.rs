//! Typed domain records.
//!
//! Absent or malformed properties decode to zero values (`""`, `0`, empty
//! set), so a default record is exactly what a row with no properties
//! produces, apart from its source identifier.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::vocab::{EntityKind, MembershipStatus, Role, SyncStatus};

/// Club member
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MemberRecord {
    pub status: SyncStatus,
    pub source_id: String,
    pub log: String,
    pub name: String,
    pub student_id: i64,
    pub email: String,
    pub role: Role,
    /// Source ids of the groups this member belongs to
    pub group_refs: BTreeSet<String>,
    pub phone: String,
    /// Member's user id on the chat platform
    pub chat_platform_id: String,
    pub membership: Option<MembershipStatus>,
}

/// Club group, mirrored as a chat platform role
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GroupRecord {
    pub status: SyncStatus,
    pub source_id: String,
    pub log: String,
    pub name: String,
    pub description: String,
    pub chat_platform_role_id: String,
}

/// Scheduled event
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EventRecord {
    pub status: SyncStatus,
    pub source_id: String,
    pub log: String,
    pub title: String,
    /// Raw start date as stored externally
    pub start_date: String,
    /// Raw end date as stored externally; empty for single-point events
    pub end_date: String,
    pub location: String,
    pub description: String,
    /// Source ids of attending members
    pub attendee_refs: BTreeSet<String>,
    /// Source ids of participating groups
    pub group_refs: BTreeSet<String>,
}

impl EventRecord {
    pub fn starts_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_external_date(&self.start_date)
    }

    pub fn ends_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_external_date(&self.end_date)
    }
}

/// Parses an RFC 3339 timestamp, or a bare `YYYY-MM-DD` as midnight UTC.
pub fn parse_external_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().fixed_offset())
    })
}

/// A decoded record of any kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DomainRecord {
    Member(MemberRecord),
    Group(GroupRecord),
    Event(EventRecord),
}

impl DomainRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            DomainRecord::Member(_) => EntityKind::Member,
            DomainRecord::Group(_) => EntityKind::Group,
            DomainRecord::Event(_) => EntityKind::Event,
        }
    }

    pub fn status(&self) -> SyncStatus {
        match self {
            DomainRecord::Member(r) => r.status,
            DomainRecord::Group(r) => r.status,
            DomainRecord::Event(r) => r.status,
        }
    }

    pub fn source_id(&self) -> &str {
        match self {
            DomainRecord::Member(r) => &r.source_id,
            DomainRecord::Group(r) => &r.source_id,
            DomainRecord::Event(r) => &r.source_id,
        }
    }

    pub fn log(&self) -> &str {
        match self {
            DomainRecord::Member(r) => &r.log,
            DomainRecord::Group(r) => &r.log,
            DomainRecord::Event(r) => &r.log,
        }
    }

    /// Whether the record still needs outward reconciliation
    pub fn is_pending(&self) -> bool {
        self.status().is_pending()
    }

    pub fn as_member(&self) -> Option<&MemberRecord> {
        match self {
            DomainRecord::Member(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&GroupRecord> {
        match self {
            DomainRecord::Group(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_event(&self) -> Option<&EventRecord> {
        match self {
            DomainRecord::Event(r) => Some(r),
            _ => None,
        }
    }
}
