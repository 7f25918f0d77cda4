//! Member role and membership labels.

use serde::{Deserialize, Serialize};
use std::fmt;

use thiserror::Error;

/// Lookup failure for a role label outside the closed vocabulary.
///
/// Callers choose their own fallback (usually [`Role::Guest`]); the lookup
/// itself never substitutes one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role label '{0}'")]
pub struct UnknownRole(pub String);

/// Member role within the club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Member,
    #[default]
    Guest,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Member, Role::Guest];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Member => "Member",
            Role::Guest => "Guest",
        }
    }

    /// Exact, case-sensitive label lookup.
    pub fn from_label(label: &str) -> Result<Self, UnknownRole> {
        Self::ALL
            .into_iter()
            .find(|r| r.label() == label)
            .ok_or_else(|| UnknownRole(label.to_string()))
    }
}

/// Free-function form of [`Role::from_label`].
pub fn role_from_label(label: &str) -> Result<Role, UnknownRole> {
    Role::from_label(label)
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Club membership state, independent of synchronisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipStatus {
    Pending,
    Active,
}

impl MembershipStatus {
    pub const ALL: [MembershipStatus; 2] = [MembershipStatus::Pending, MembershipStatus::Active];

    pub fn label(&self) -> &'static str {
        match self {
            MembershipStatus::Pending => "Pending",
            MembershipStatus::Active => "Active",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }
}
