//! CLI command implementations
//!
//! Commands work offline on saved JSON: a live schema or a query result
//! previously fetched from the external database. Configuration is loaded
//! once per invocation, before logging is initialised.

use std::path::Path;

use serde_json::json;

use crate::decode::{retain_pending, DecodePolicy, Decoder};
use crate::observability::{init_logging, log_event_with_fields, Event};
use crate::schema::{contract_for, SchemaValidator};
use crate::source::FileConfig;
use crate::vocab::EntityKind;

use super::args::{Cli, Command};
use super::errors::{CliErrorCode, CliResult};
use super::io::{read_json_file, write_error, write_response, write_sync_error};

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_cli(cli)
}

/// Load configuration, initialise logging, dispatch
///
/// Sync failures have already been reported with their violations; any other
/// failure is reported here as a plain error object.
pub fn run_cli(cli: Cli) -> CliResult<()> {
    let result = FileConfig::load_or_default(cli.config.as_deref()).and_then(|config| {
        init_logging(&config.log_level);

        let configured = config.database_ids.len().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("database_ids", configured.as_str())]);

        run_command(cli.command, &config)
    });

    if let Err(e) = &result {
        if e.code() != &CliErrorCode::CommandFailed {
            write_error(e.code_str(), e.message())?;
        }
    }
    result
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, config: &FileConfig) -> CliResult<()> {
    match cmd {
        Command::Contract { kind } => contract(kind, config),
        Command::Validate { kind, schema } => validate(kind, &schema, config),
        Command::Decode {
            kind,
            input,
            pending_only,
            strict_roles,
        } => decode(kind, &input, pending_only, strict_roles),
    }
}

/// Print the expected schema for `kind`
pub fn contract(kind: EntityKind, config: &FileConfig) -> CliResult<()> {
    let contract = contract_for(kind, config);
    write_response(json!({
        "kind": kind,
        "fields": contract.iter().collect::<Vec<_>>(),
        "schema": contract.to_property_bag(),
    }))
}

/// Validate a saved live schema
pub fn validate(kind: EntityKind, schema_path: &Path, config: &FileConfig) -> CliResult<()> {
    let live = read_json_file(schema_path)?;
    let contract = contract_for(kind, config);

    match SchemaValidator::new(&contract).validate(&live) {
        Ok(()) => write_response(json!({ "kind": kind, "fields": contract.len() })),
        Err(err) => {
            write_sync_error(&err)?;
            Err(err.into())
        }
    }
}

/// Decode a saved query result
pub fn decode(
    kind: EntityKind,
    input_path: &Path,
    pending_only: bool,
    strict_roles: bool,
) -> CliResult<()> {
    let query_result = read_json_file(input_path)?;
    let policy = if strict_roles {
        DecodePolicy::strict()
    } else {
        DecodePolicy::default()
    };

    let records = match Decoder::new(policy).decode_all(kind, &query_result) {
        Ok(records) => records,
        Err(err) => {
            write_sync_error(&err)?;
            return Err(err.into());
        }
    };
    let records = if pending_only {
        retain_pending(records)
    } else {
        records
    };

    write_response(json!({
        "kind": kind,
        "count": records.len(),
        "records": records,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DatabaseKey;
    use std::fs;
    use tempfile::TempDir;

    fn config() -> FileConfig {
        let mut config = FileConfig::default();
        config.database_ids.insert(DatabaseKey::Group, "grp-db".into());
        config
    }

    #[test]
    fn test_validate_rendered_contract_passes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.json");
        let bag = contract_for(EntityKind::Member, &config()).to_property_bag();
        fs::write(&path, json!({ "properties": bag }).to_string()).unwrap();

        assert!(validate(EntityKind::Member, &path, &config()).is_ok());
    }

    #[test]
    fn test_validate_invalid_schema_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.json");
        fs::write(&path, r#"{"properties": {}}"#).unwrap();

        let err = validate(EntityKind::Group, &path, &config()).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::CommandFailed);
        assert!(err.message().contains("SYNC_SCHEMA_INVALID"));
    }

    #[test]
    fn test_decode_strict_roles() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rows.json");
        fs::write(
            &path,
            json!({
                "results": [{
                    "id": "m-1",
                    "properties": { "Role": { "type": "select", "select": { "name": "Owner" } } }
                }]
            })
            .to_string(),
        )
        .unwrap();

        assert!(decode(EntityKind::Member, &path, false, false).is_ok());
        let err = decode(EntityKind::Member, &path, false, true).unwrap_err();
        assert!(err.message().contains("SYNC_UNKNOWN_ROLE"));
    }

    #[test]
    fn test_missing_input_file() {
        let dir = TempDir::new().unwrap();
        let err = decode(EntityKind::Event, &dir.path().join("absent.json"), false, false)
            .unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::IoError);
    }
}
