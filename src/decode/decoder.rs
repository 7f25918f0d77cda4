//! Row decoding.
//!
//! A row is `{"id": ..., "properties": {...}}` where each property is
//! `{"type": T, T: payload}`. Extraction reads the payload under the declared
//! type; anything absent or shaped differently decodes to the zero value.
//! The only failures are a missing row id, a status label outside the
//! vocabulary, and (under [`RolePolicy::Reject`]) an unknown role label.

use serde_json::Value;
use std::collections::BTreeSet;

use super::records::{DomainRecord, EventRecord, GroupRecord, MemberRecord};
use crate::bag::Prop;
use crate::errors::{SyncError, SyncResult};
use crate::schema::property;
use crate::vocab::{EntityKind, MembershipStatus, PropType, Role, SyncStatus, UnknownRole};

/// What to do with a role label outside the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolePolicy {
    /// Substitute this role
    Fallback(Role),
    /// Fail with `UnknownRole`
    Reject,
}

impl Default for RolePolicy {
    fn default() -> Self {
        RolePolicy::Fallback(Role::Guest)
    }
}

/// Decoding policy knobs. Unknown statuses are always rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodePolicy {
    pub unknown_role: RolePolicy,
}

impl DecodePolicy {
    /// Policy that rejects unknown role labels
    pub fn strict() -> Self {
        Self {
            unknown_role: RolePolicy::Reject,
        }
    }
}

/// Decodes raw rows into typed records.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    policy: DecodePolicy,
}

impl Decoder {
    pub fn new(policy: DecodePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// Decodes one row as `kind`.
    pub fn decode(&self, kind: EntityKind, row: &Value) -> SyncResult<DomainRecord> {
        let row = Row::new(row)?;
        let status = row.status(kind)?;

        let record = match kind {
            EntityKind::Member => DomainRecord::Member(MemberRecord {
                status,
                source_id: row.source_id.to_string(),
                log: row.text(property::LOG, PropType::RichText),
                name: row.text(property::NAME, PropType::Title),
                student_id: row
                    .text(property::STUDENT_ID, PropType::RichText)
                    .trim()
                    .parse()
                    .unwrap_or(0),
                email: row.scalar(property::EMAIL, PropType::Email),
                role: self.role(&row)?,
                group_refs: row.refs(property::GROUPS),
                phone: row.scalar(property::PHONE, PropType::PhoneNumber),
                chat_platform_id: row.text(property::DISCORD_ID, PropType::RichText),
                membership: row
                    .select_label(property::MEMBER_STATUS)
                    .and_then(MembershipStatus::from_label),
            }),
            EntityKind::Group => DomainRecord::Group(GroupRecord {
                status,
                source_id: row.source_id.to_string(),
                log: row.text(property::LOG, PropType::RichText),
                name: row.text(property::NAME, PropType::Title),
                description: row.text(property::DESCRIPTION, PropType::RichText),
                chat_platform_role_id: row.text(property::DISCORD_ROLE_ID, PropType::RichText),
            }),
            EntityKind::Event => {
                let (start_date, end_date) = row.date(property::DATE);
                DomainRecord::Event(EventRecord {
                    status,
                    source_id: row.source_id.to_string(),
                    log: row.text(property::LOG, PropType::RichText),
                    title: row.text(property::TITLE, PropType::Title),
                    start_date,
                    end_date,
                    location: row.text(property::LOCATION, PropType::RichText),
                    description: row.text(property::DESCRIPTION, PropType::RichText),
                    attendee_refs: row.refs(property::ATTENDEES),
                    group_refs: row.refs(property::GROUPS),
                })
            }
        };

        Ok(record)
    }

    fn role(&self, row: &Row<'_>) -> SyncResult<Role> {
        let Some(label) = row.select_label(property::ROLE) else {
            return Ok(Role::default());
        };

        match (Role::from_label(label), self.policy.unknown_role) {
            (Ok(role), _) => Ok(role),
            (Err(_), RolePolicy::Fallback(role)) => {
                tracing::debug!(source_id = row.source_id, label, %role, "unknown role label, using fallback");
                Ok(role)
            }
            (Err(UnknownRole(label)), RolePolicy::Reject) => Err(SyncError::UnknownRole {
                source_id: row.source_id.to_string(),
                label,
            }),
        }
    }
}

/// Decodes one row with the default policy.
pub fn decode(kind: EntityKind, row: &Value) -> SyncResult<DomainRecord> {
    Decoder::default().decode(kind, row)
}

/// A row with a known source id.
struct Row<'a> {
    source_id: &'a str,
    properties: Prop<'a>,
}

impl<'a> Row<'a> {
    fn new(row: &'a Value) -> SyncResult<Self> {
        let row = Prop::of(row);
        let source_id = row
            .get("id")
            .as_str()
            .filter(|id| !id.is_empty())
            .ok_or(SyncError::MissingSourceId { row_index: None })?;

        Ok(Self {
            source_id,
            properties: row.get("properties"),
        })
    }

    /// Payload of `name` under its declared type key.
    fn payload(&self, name: &str, prop_type: PropType) -> Prop<'a> {
        self.properties.get(name).get(prop_type.as_str())
    }

    /// Plain text of the first fragment of a title or rich-text property.
    fn text(&self, name: &str, prop_type: PropType) -> String {
        let fragment = self.payload(name, prop_type).first();
        fragment
            .get("plain_text")
            .as_str()
            .or_else(|| fragment.get("text").get("content").as_str())
            .unwrap_or_default()
            .to_string()
    }

    /// Scalar string property such as email or phone number.
    fn scalar(&self, name: &str, prop_type: PropType) -> String {
        self.payload(name, prop_type).text()
    }

    fn refs(&self, name: &str) -> BTreeSet<String> {
        self.payload(name, PropType::Relation)
            .items()
            .filter_map(|item| item.get("id").as_str())
            .map(str::to_string)
            .collect()
    }

    fn date(&self, name: &str) -> (String, String) {
        let date = self.payload(name, PropType::Date);
        (date.get("start").text(), date.get("end").text())
    }

    fn select_label(&self, name: &str) -> Option<&'a str> {
        self.payload(name, PropType::Select).get("name").as_str()
    }

    /// `Writing` when absent; unknown or inapplicable labels fail.
    fn status(&self, kind: EntityKind) -> SyncResult<SyncStatus> {
        let Some(label) = self.select_label(property::SYNC_STATUS) else {
            return Ok(SyncStatus::Writing);
        };

        SyncStatus::from_label(label)
            .ok()
            .filter(|s| s.applies_to(kind))
            .ok_or_else(|| SyncError::UnknownStatus {
                kind,
                source_id: self.source_id.to_string(),
                label: label.to_string(),
            })
    }
}
