//! Live schema validation against a contract.
//!
//! Validation semantics:
//! - The contract drives the pass; live-only fields are ignored
//! - A missing field or wrong type ends the checks for that field
//! - Relation attributes are compared hyphen-insensitively, every mismatch
//!   reported
//! - Every required select option must exist on the live field
//! - All violations across all fields are collected in one pass
//!
//! Validation is deterministic: the contract is ordered by field name and each
//! check walks its constraint in a fixed order.

use serde_json::Value;

use super::contract::SchemaContract;
use super::errors::Violation;
use super::types::{FieldConstraint, FieldSpec};
use crate::bag::{normalize_id, Prop};
use crate::errors::{SyncError, SyncResult};
use crate::observability::{log_event_with_fields, Event};

/// Validates live database schemas against one contract.
///
/// Accepts either a database object (with a top-level `properties` map) or
/// the properties map itself.
pub struct SchemaValidator<'a> {
    contract: &'a SchemaContract,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(contract: &'a SchemaContract) -> Self {
        Self { contract }
    }

    /// Collects every violation in `live`. Empty means valid.
    pub fn violations(&self, live: &Value) -> Vec<Violation> {
        let kind = self.contract.kind().as_str();
        log_event_with_fields(Event::SchemaValidationStart, &[("kind", kind)]);

        let root = Prop::of(live);
        let properties = match root.get("properties") {
            nested if nested.is_present() => nested,
            _ => root,
        };

        let mut violations = Vec::new();
        for spec in self.contract.iter() {
            self.check_field(spec, properties.get(&spec.name), &mut violations);
        }
        violations
    }

    /// Validates `live`, failing with `SchemaInvalid` carrying every
    /// violation.
    pub fn validate(&self, live: &Value) -> SyncResult<()> {
        let violations = self.violations(live);
        let kind = self.contract.kind();

        if violations.is_empty() {
            log_event_with_fields(Event::SchemaValidationPassed, &[("kind", kind.as_str())]);
            return Ok(());
        }

        let count = violations.len().to_string();
        log_event_with_fields(
            Event::SchemaValidationFailed,
            &[("kind", kind.as_str()), ("violations", count.as_str())],
        );
        Err(SyncError::SchemaInvalid { kind, violations })
    }

    fn check_field(&self, spec: &FieldSpec, live: Prop<'_>, out: &mut Vec<Violation>) {
        let Some(tag) = live.get("type").as_str() else {
            out.push(Violation::missing_field(&spec.name));
            return;
        };

        if tag != spec.prop_type.as_str() {
            out.push(Violation::type_mismatch(&spec.name, spec.prop_type.as_str(), tag));
            return;
        }

        match &spec.constraint {
            FieldConstraint::None => {}
            FieldConstraint::Relation { targets } => {
                let relation = live.get("relation");
                for (key, target) in targets {
                    let Some(expected) = target.id.as_deref() else {
                        log_event_with_fields(
                            Event::RelationCheckRelaxed,
                            &[
                                ("field", spec.name.as_str()),
                                ("config_key", target.config_key.as_str()),
                            ],
                        );
                        continue;
                    };

                    let actual = relation.get(key).as_str();
                    let matches = actual
                        .map(|a| normalize_id(a) == normalize_id(expected))
                        .unwrap_or(false);
                    if !matches {
                        out.push(Violation::relation_target_mismatch(
                            &spec.name, key, expected, actual,
                        ));
                    }
                }
            }
            FieldConstraint::Select { options } => {
                let available: Vec<String> = live
                    .get("select")
                    .get("options")
                    .items()
                    .filter_map(|o| o.get("name").as_str())
                    .map(str::to_string)
                    .collect();

                for option in options {
                    if !available.contains(option) {
                        out.push(Violation::missing_select_option(&spec.name, option, &available));
                    }
                }
            }
        }
    }
}

/// Collects every violation of `contract` in `live`.
pub fn validate(live: &Value, contract: &SchemaContract) -> Vec<Violation> {
    SchemaValidator::new(contract).violations(live)
}
