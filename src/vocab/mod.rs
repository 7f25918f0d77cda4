//! Closed vocabularies shared by the schema and decode subsystems.
//!
//! Everything here is a plain value type with exact, case-sensitive label
//! lookups. Nothing in this module has side effects.

mod presentation;
mod prop_type;
mod role;
mod status;

pub use presentation::{status_color, Color};
pub use prop_type::PropType;
pub use role::{role_from_label, MembershipStatus, Role, UnknownRole};
pub use status::{status_from_label, SyncStatus, UnknownStatus};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three kinds of entity kept in external databases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Member,
    Group,
    Event,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Member, EntityKind::Group, EntityKind::Event];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Member => "member",
            EntityKind::Group => "group",
            EntityKind::Event => "event",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown entity kind '{}' (expected member, group or event)", s))
    }
}
