//! Property type tags used by the external document database.
//!
//! Every property in a live schema or a record carries a `type` tag; the tag
//! determines the nested shape of the value stored under the key of the same
//! name (e.g. `{"type": "select", "select": {"name": "Synced"}}`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of property types this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropType {
    /// Record title; list of text fragments
    Title,
    /// Free text; list of text fragments
    RichText,
    /// Scalar email string
    Email,
    /// Scalar phone string
    PhoneNumber,
    /// Single select; `{name}` on records, `{options: [{name}]}` on schemas
    Select,
    /// Links to rows of another database; list of `{id}`
    Relation,
    /// `{start, end}` pair of date strings
    Date,
}

impl PropType {
    /// All known tags, in declaration order.
    pub const ALL: [PropType; 7] = [
        PropType::Title,
        PropType::RichText,
        PropType::Email,
        PropType::PhoneNumber,
        PropType::Select,
        PropType::Relation,
        PropType::Date,
    ];

    /// Returns the wire tag for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            PropType::Title => "title",
            PropType::RichText => "rich_text",
            PropType::Email => "email",
            PropType::PhoneNumber => "phone_number",
            PropType::Select => "select",
            PropType::Relation => "relation",
            PropType::Date => "date",
        }
    }

    /// Looks up a wire tag. Tags outside the closed set return `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for PropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
