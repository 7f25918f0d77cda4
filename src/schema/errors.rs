//! Schema violation types
//!
//! Violation kinds:
//! - missing-field
//! - type-mismatch
//! - relation-target-mismatch
//! - missing-select-option

use serde::Serialize;
use std::fmt;

/// Category of a schema violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    /// Contract field absent from the live schema
    MissingField,
    /// Live field has a different type tag
    TypeMismatch,
    /// Relation points into a different database
    RelationTargetMismatch,
    /// Select is missing a required option label
    MissingSelectOption,
}

impl ViolationKind {
    /// Returns the stable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::MissingField => "missing-field",
            ViolationKind::TypeMismatch => "type-mismatch",
            ViolationKind::RelationTargetMismatch => "relation-target-mismatch",
            ViolationKind::MissingSelectOption => "missing-select-option",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One problem found in a live schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Violation category
    pub kind: ViolationKind,
    /// Offending field name
    pub field: String,
    /// Expected type, target or option
    pub expected: String,
    /// What the live schema has instead
    pub actual: String,
}

impl Violation {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::MissingField,
            field: field.into(),
            expected: "field to be present".into(),
            actual: "missing".into(),
        }
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            kind: ViolationKind::TypeMismatch,
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// `key` names the relation attribute compared (e.g. `database_id`).
    /// An absent live target is reported as `<absent>`.
    pub fn relation_target_mismatch(
        field: impl Into<String>,
        key: &str,
        expected: &str,
        actual: Option<&str>,
    ) -> Self {
        Self {
            kind: ViolationKind::RelationTargetMismatch,
            field: field.into(),
            expected: format!("{} {}", key, expected),
            actual: format!("{} {}", key, actual.unwrap_or("<absent>")),
        }
    }

    pub fn missing_select_option(
        field: impl Into<String>,
        option: impl Into<String>,
        available: &[String],
    ) -> Self {
        Self {
            kind: ViolationKind::MissingSelectOption,
            field: field.into(),
            expected: format!("option '{}'", option.into()),
            actual: format!("options [{}]", available.join(", ")),
        }
    }

    /// Human-readable reason, without the field name
    pub fn detail(&self) -> String {
        match self.kind {
            ViolationKind::MissingField => "property does not exist".to_string(),
            ViolationKind::TypeMismatch => {
                format!("type must be {}, found {}", self.expected, self.actual)
            }
            ViolationKind::RelationTargetMismatch => {
                format!("relation must link {}, found {}", self.expected, self.actual)
            }
            ViolationKind::MissingSelectOption => {
                format!("select is missing {}; has {}", self.expected, self.actual)
            }
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] field '{}': {}", self.kind, self.field, self.detail())
    }
}
