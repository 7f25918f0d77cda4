//! Synchronisation lifecycle vocabulary.
//!
//! A record's status tells the reconciliation layer whether it still has to
//! push the record outward. `Update` and `Delete` are pending; everything
//! else is settled. `Writing` marks a draft and is settled on purpose so that
//! automation never touches a half-written record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::EntityKind;

/// Lookup failure for a status label outside the closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sync status label '{0}'")]
pub struct UnknownStatus(pub String);

/// Lifecycle status shared by all entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SyncStatus {
    /// Draft authored in the external system, not yet picked up
    #[default]
    Writing,
    /// Edited, waiting to be pushed
    Update,
    /// Push in progress
    Updating,
    /// Pushed and consistent
    Synced,
    /// Marked for removal, waiting to be pushed
    Delete,
    /// Removed downstream
    Deleted,
    /// Last push attempt failed
    Error,
    /// Member-only: invitation sent, not yet joined
    Invited,
}

impl SyncStatus {
    pub const ALL: [SyncStatus; 8] = [
        SyncStatus::Writing,
        SyncStatus::Update,
        SyncStatus::Updating,
        SyncStatus::Synced,
        SyncStatus::Delete,
        SyncStatus::Deleted,
        SyncStatus::Error,
        SyncStatus::Invited,
    ];

    /// Canonical label as configured on the external select field
    pub fn label(&self) -> &'static str {
        match self {
            SyncStatus::Writing => "Writing",
            SyncStatus::Update => "Update",
            SyncStatus::Updating => "Updating",
            SyncStatus::Synced => "Synced",
            SyncStatus::Delete => "Delete",
            SyncStatus::Deleted => "Deleted",
            SyncStatus::Error => "Error",
            SyncStatus::Invited => "Invited",
        }
    }

    /// Exact, case-sensitive label lookup.
    pub fn from_label(label: &str) -> Result<Self, UnknownStatus> {
        Self::ALL
            .into_iter()
            .find(|s| s.label() == label)
            .ok_or_else(|| UnknownStatus(label.to_string()))
    }

    /// Whether the record needs outward action.
    pub fn is_pending(&self) -> bool {
        matches!(self, SyncStatus::Update | SyncStatus::Delete)
    }

    /// Whether no outward action is required.
    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    /// Whether records of `kind` may carry this status.
    pub fn applies_to(&self, kind: EntityKind) -> bool {
        match self {
            SyncStatus::Invited => kind == EntityKind::Member,
            _ => true,
        }
    }

    /// Statuses valid for `kind`, in vocabulary order.
    pub fn for_kind(kind: EntityKind) -> impl Iterator<Item = SyncStatus> {
        Self::ALL.into_iter().filter(move |s| s.applies_to(kind))
    }

    /// Pending statuses, in vocabulary order.
    pub fn pending() -> impl Iterator<Item = SyncStatus> {
        Self::ALL.into_iter().filter(SyncStatus::is_pending)
    }
}

/// Free-function form of [`SyncStatus::from_label`].
pub fn status_from_label(label: &str) -> Result<SyncStatus, UnknownStatus> {
    SyncStatus::from_label(label)
}

impl FromStr for SyncStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_lookup() {
        assert_eq!(status_from_label("Synced"), Ok(SyncStatus::Synced));
        assert_eq!(status_from_label("Invited"), Ok(SyncStatus::Invited));
    }

    #[test]
    fn test_unknown_label_fails() {
        let err = status_from_label("Bogus").unwrap_err();
        assert_eq!(err, UnknownStatus("Bogus".into()));
        assert!(err.to_string().contains("Bogus"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(status_from_label("synced").is_err());
        assert!(status_from_label(" Synced").is_err());
    }

    #[test]
    fn test_pending_and_settled_partition() {
        let pending: Vec<_> = SyncStatus::pending().collect();
        assert_eq!(pending, vec![SyncStatus::Update, SyncStatus::Delete]);

        for s in SyncStatus::ALL {
            assert_ne!(s.is_pending(), s.is_settled(), "{s}");
        }
        assert!(SyncStatus::Writing.is_settled());
    }

    #[test]
    fn test_invited_is_member_only() {
        assert!(SyncStatus::Invited.applies_to(EntityKind::Member));
        assert!(!SyncStatus::Invited.applies_to(EntityKind::Group));
        assert!(!SyncStatus::Invited.applies_to(EntityKind::Event));
        assert_eq!(SyncStatus::for_kind(EntityKind::Group).count(), 7);
        assert_eq!(SyncStatus::for_kind(EntityKind::Member).count(), 8);
    }

    #[test]
    fn test_default_is_writing() {
        assert_eq!(SyncStatus::default(), SyncStatus::Writing);
    }
}
