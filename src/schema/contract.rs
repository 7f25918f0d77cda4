//! Schema contracts per entity kind.
//!
//! Field names and types are fixed. Relation targets come from the
//! configuration accessor at build time, so build a fresh contract for each
//! validation instead of holding one.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::types::FieldSpec;
use crate::source::{ConfigAccessor, DatabaseKey};
use crate::vocab::{EntityKind, MembershipStatus, Role, SyncStatus};

/// Property names used by the external databases.
pub mod property {
    pub const NAME: &str = "Name";
    pub const TITLE: &str = "Title";
    pub const LOG: &str = "Log";
    pub const SYNC_STATUS: &str = "Sync Status";

    pub const DISCORD_ID: &str = "Discord ID";
    pub const EMAIL: &str = "Email";
    pub const GROUPS: &str = "Groups";
    pub const MEMBER_STATUS: &str = "Member Status";
    pub const PHONE: &str = "Phone";
    pub const ROLE: &str = "Role";
    pub const STUDENT_ID: &str = "Student ID";

    pub const DESCRIPTION: &str = "Description";
    pub const DISCORD_ROLE_ID: &str = "Discord Role ID";

    pub const ATTENDEES: &str = "Attendees";
    pub const DATE: &str = "Date";
    pub const LOCATION: &str = "Location";
}

/// Expected schema for one entity kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaContract {
    kind: EntityKind,
    /// Ordered by field name so validation output is deterministic
    fields: BTreeMap<String, FieldSpec>,
}

impl SchemaContract {
    pub fn new(kind: EntityKind, specs: impl IntoIterator<Item = FieldSpec>) -> Self {
        Self {
            kind,
            fields: specs.into_iter().map(|s| (s.name.clone(), s)).collect(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldSpec> {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Renders the contract as a live-schema property map, e.g. for showing
    /// an operator what the external database should look like.
    pub fn to_property_bag(&self) -> Value {
        let mut bag = Map::new();
        for (name, spec) in &self.fields {
            bag.insert(name.clone(), spec.to_schema_value());
        }
        Value::Object(bag)
    }
}

fn status_labels(kind: EntityKind) -> Vec<&'static str> {
    SyncStatus::for_kind(kind).map(|s| s.label()).collect()
}

/// Member database contract
pub fn member_contract<C: ConfigAccessor>(config: &C) -> SchemaContract {
    use property::*;

    SchemaContract::new(
        EntityKind::Member,
        [
            FieldSpec::rich_text(DISCORD_ID),
            FieldSpec::email(EMAIL),
            FieldSpec::relation(
                GROUPS,
                DatabaseKey::Group,
                config.configured_id(DatabaseKey::Group),
            ),
            FieldSpec::rich_text(LOG),
            FieldSpec::select(MEMBER_STATUS, MembershipStatus::ALL.map(|m| m.label())),
            FieldSpec::title(NAME),
            FieldSpec::phone_number(PHONE),
            FieldSpec::select(ROLE, Role::ALL.map(|r| r.label())),
            FieldSpec::rich_text(STUDENT_ID),
            FieldSpec::select(SYNC_STATUS, status_labels(EntityKind::Member)),
        ],
    )
}

/// Group database contract
pub fn group_contract<C: ConfigAccessor>(_config: &C) -> SchemaContract {
    use property::*;

    SchemaContract::new(
        EntityKind::Group,
        [
            FieldSpec::rich_text(DESCRIPTION),
            FieldSpec::rich_text(DISCORD_ROLE_ID),
            FieldSpec::rich_text(LOG),
            FieldSpec::title(NAME),
            FieldSpec::select(SYNC_STATUS, status_labels(EntityKind::Group)),
        ],
    )
}

/// Event database contract
pub fn event_contract<C: ConfigAccessor>(config: &C) -> SchemaContract {
    use property::*;

    SchemaContract::new(
        EntityKind::Event,
        [
            FieldSpec::relation(
                ATTENDEES,
                DatabaseKey::Member,
                config.configured_id(DatabaseKey::Member),
            ),
            FieldSpec::date(DATE),
            FieldSpec::rich_text(DESCRIPTION),
            FieldSpec::relation(
                GROUPS,
                DatabaseKey::Group,
                config.configured_id(DatabaseKey::Group),
            ),
            FieldSpec::rich_text(LOCATION),
            FieldSpec::rich_text(LOG),
            FieldSpec::select(SYNC_STATUS, status_labels(EntityKind::Event)),
            FieldSpec::title(TITLE),
        ],
    )
}

/// Contract for `kind`
pub fn contract_for<C: ConfigAccessor>(kind: EntityKind, config: &C) -> SchemaContract {
    match kind {
        EntityKind::Member => member_contract(config),
        EntityKind::Group => group_contract(config),
        EntityKind::Event => event_contract(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldConstraint;
    use crate::source::StaticConfig;
    use crate::vocab::PropType;

    #[test]
    fn test_member_contract_fields() {
        let contract = member_contract(&StaticConfig::new());
        assert_eq!(contract.kind(), EntityKind::Member);
        assert_eq!(contract.len(), 10);
        assert_eq!(contract.get("Name").unwrap().prop_type, PropType::Title);
        assert_eq!(contract.get("Phone").unwrap().prop_type, PropType::PhoneNumber);
        assert!(contract
            .get("Sync Status")
            .unwrap()
            .select_options()
            .contains(&"Invited".to_string()));
    }

    #[test]
    fn test_group_status_options_exclude_invited() {
        let contract = group_contract(&StaticConfig::new());
        let options = contract.get("Sync Status").unwrap().select_options();
        assert_eq!(options.len(), 7);
        assert!(!options.contains(&"Invited".to_string()));
    }

    #[test]
    fn test_relation_targets_follow_config() {
        let config = StaticConfig::new()
            .with(DatabaseKey::Member, "mem-1")
            .with(DatabaseKey::Group, "grp-1");
        let contract = event_contract(&config);

        let FieldConstraint::Relation { targets } = &contract.get("Attendees").unwrap().constraint
        else {
            panic!("Attendees must be a relation");
        };
        assert_eq!(targets["database_id"].id.as_deref(), Some("mem-1"));
        assert_eq!(targets["database_id"].config_key, DatabaseKey::Member);
    }

    #[test]
    fn test_contract_is_rebuilt_from_current_config() {
        let mut config = StaticConfig::new().with(DatabaseKey::Group, "old");
        let before = group_relation_id(&member_contract(&config));
        config.set(DatabaseKey::Group, "new");
        let after = group_relation_id(&member_contract(&config));

        assert_eq!(before.as_deref(), Some("old"));
        assert_eq!(after.as_deref(), Some("new"));
    }

    #[test]
    fn test_contract_building_is_idempotent() {
        let config = StaticConfig::new().with(DatabaseKey::Group, "g");
        for kind in EntityKind::ALL {
            assert_eq!(contract_for(kind, &config), contract_for(kind, &config));
        }
    }

    fn group_relation_id(contract: &SchemaContract) -> Option<String> {
        match &contract.get("Groups")?.constraint {
            FieldConstraint::Relation { targets } => targets.get("database_id")?.id.clone(),
            _ => None,
        }
    }
}
