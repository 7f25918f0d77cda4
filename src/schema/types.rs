//! Field specifications for schema contracts.
//!
//! A [`FieldSpec`] names a property, its expected type tag, and any
//! type-specific constraint:
//! - relation: the database each relation attribute must point into
//! - select: option labels that must all exist on the live field

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use crate::source::DatabaseKey;
use crate::vocab::PropType;

/// Expected relation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationTarget {
    /// Configuration key the identifier was read from
    pub config_key: DatabaseKey,
    /// Configured identifier; `None` when not configured, in which case the
    /// check is skipped
    pub id: Option<String>,
}

/// Type-specific constraint on a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "constraint", rename_all = "snake_case")]
pub enum FieldConstraint {
    /// Type tag only
    None,
    /// Relation attributes (e.g. `database_id`) and their expected targets
    Relation {
        targets: BTreeMap<String, RelationTarget>,
    },
    /// Option labels that must be present
    Select { options: Vec<String> },
}

/// Expected shape of one property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Property name as shown in the external database
    pub name: String,
    /// Expected type tag
    #[serde(rename = "type")]
    pub prop_type: PropType,
    /// Type-specific constraint
    #[serde(flatten)]
    pub constraint: FieldConstraint,
}

impl FieldSpec {
    /// Create a field with no constraint beyond its type
    pub fn new(name: impl Into<String>, prop_type: PropType) -> Self {
        Self {
            name: name.into(),
            prop_type,
            constraint: FieldConstraint::None,
        }
    }

    pub fn title(name: impl Into<String>) -> Self {
        Self::new(name, PropType::Title)
    }

    pub fn rich_text(name: impl Into<String>) -> Self {
        Self::new(name, PropType::RichText)
    }

    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, PropType::Email)
    }

    pub fn phone_number(name: impl Into<String>) -> Self {
        Self::new(name, PropType::PhoneNumber)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, PropType::Date)
    }

    /// Create a select field requiring every label in `options`
    pub fn select<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            prop_type: PropType::Select,
            constraint: FieldConstraint::Select {
                options: options.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Create a relation field whose `database_id` must match `id`
    pub fn relation(name: impl Into<String>, config_key: DatabaseKey, id: Option<String>) -> Self {
        let mut targets = BTreeMap::new();
        targets.insert("database_id".to_string(), RelationTarget { config_key, id });
        Self {
            name: name.into(),
            prop_type: PropType::Relation,
            constraint: FieldConstraint::Relation { targets },
        }
    }

    /// Required select options, empty for non-select fields
    pub fn select_options(&self) -> &[String] {
        match &self.constraint {
            FieldConstraint::Select { options } => options,
            _ => &[],
        }
    }

    /// Renders this spec in the live-schema shape the external API returns.
    ///
    /// Unconfigured relation targets are omitted.
    pub fn to_schema_value(&self) -> Value {
        let tag = self.prop_type.as_str();
        let body = match &self.constraint {
            FieldConstraint::None => json!({}),
            FieldConstraint::Select { options } => json!({
                "options": options.iter().map(|o| json!({ "name": o })).collect::<Vec<_>>()
            }),
            FieldConstraint::Relation { targets } => {
                let mut relation = Map::new();
                for (key, target) in targets {
                    if let Some(id) = &target.id {
                        relation.insert(key.clone(), Value::String(id.clone()));
                    }
                }
                Value::Object(relation)
            }
        };

        let mut field = Map::new();
        field.insert("name".into(), Value::String(self.name.clone()));
        field.insert("type".into(), Value::String(tag.into()));
        field.insert(tag.into(), body);
        Value::Object(field)
    }
}
