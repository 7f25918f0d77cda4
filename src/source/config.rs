//! Configuration accessor for external database identifiers.
//!
//! Contracts read relation targets through [`ConfigAccessor`] each time they
//! are built, so a change of configured database is picked up on the next
//! validation without restarting anything.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::cli::{CliError, CliResult};
use crate::vocab::EntityKind;

/// Configured identifier of one external database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DatabaseKey {
    #[serde(rename = "NOTION_MEMBER_DB_ID")]
    Member,
    #[serde(rename = "NOTION_GROUP_DB_ID")]
    Group,
    #[serde(rename = "NOTION_EVENT_DB_ID")]
    Event,
}

impl DatabaseKey {
    pub const ALL: [DatabaseKey; 3] = [DatabaseKey::Member, DatabaseKey::Group, DatabaseKey::Event];

    /// Canonical configuration key name
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseKey::Member => "NOTION_MEMBER_DB_ID",
            DatabaseKey::Group => "NOTION_GROUP_DB_ID",
            DatabaseKey::Event => "NOTION_EVENT_DB_ID",
        }
    }

    /// The database holding rows of `kind`.
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Member => DatabaseKey::Member,
            EntityKind::Group => DatabaseKey::Group,
            EntityKind::Event => DatabaseKey::Event,
        }
    }
}

impl fmt::Display for DatabaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read access to configured database identifiers.
///
/// A `None` (or blank) value means the identifier is not configured.
pub trait ConfigAccessor {
    fn configured_id(&self, key: DatabaseKey) -> Option<String>;
}

impl<C: ConfigAccessor + ?Sized> ConfigAccessor for &C {
    fn configured_id(&self, key: DatabaseKey) -> Option<String> {
        (**self).configured_id(key)
    }
}

/// In-memory configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    ids: BTreeMap<DatabaseKey, String>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, key: DatabaseKey, id: impl Into<String>) -> Self {
        self.ids.insert(key, id.into());
        self
    }

    pub fn set(&mut self, key: DatabaseKey, id: impl Into<String>) {
        self.ids.insert(key, id.into());
    }
}

impl ConfigAccessor for StaticConfig {
    fn configured_id(&self, key: DatabaseKey) -> Option<String> {
        self.ids.get(&key).filter(|v| !v.trim().is_empty()).cloned()
    }
}

/// Configuration file structure.
///
/// ```json
/// { "database_ids": { "NOTION_MEMBER_DB_ID": "..." }, "log_level": "info" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// Database identifiers keyed by configuration key
    #[serde(default)]
    pub database_ids: BTreeMap<DatabaseKey, String>,

    /// Log filter directive for the binary (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            database_ids: BTreeMap::new(),
            log_level: default_log_level(),
        }
    }
}

impl FileConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: FileConfig = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` if given, otherwise start empty; then apply
    /// environment overrides.
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overlay values from an environment lookup. Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in DatabaseKey::ALL {
            if let Some(value) = lookup(key.as_str()).filter(|v| !v.trim().is_empty()) {
                self.database_ids.insert(key, value);
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        for (key, id) in &self.database_ids {
            if id.trim().is_empty() {
                return Err(CliError::config_error(format!("{} must not be empty", key)));
            }
        }
        if self.log_level.trim().is_empty() {
            return Err(CliError::config_error("log_level must not be empty"));
        }
        Ok(())
    }
}

impl ConfigAccessor for FileConfig {
    fn configured_id(&self, key: DatabaseKey) -> Option<String> {
        self.database_ids.get(&key).filter(|v| !v.trim().is_empty()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_static_config_blank_is_missing() {
        let config = StaticConfig::new()
            .with(DatabaseKey::Group, "grp-1")
            .with(DatabaseKey::Member, "  ");

        assert_eq!(config.configured_id(DatabaseKey::Group).as_deref(), Some("grp-1"));
        assert_eq!(config.configured_id(DatabaseKey::Member), None);
        assert_eq!(config.configured_id(DatabaseKey::Event), None);
    }

    #[test]
    fn test_load_config_file() {
        let file = write_config(
            r#"{"database_ids": {"NOTION_GROUP_DB_ID": "abc-123"}, "log_level": "debug"}"#,
        );
        let config = FileConfig::load(file.path()).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.configured_id(DatabaseKey::Group).as_deref(), Some("abc-123"));
        assert_eq!(config.configured_id(DatabaseKey::Member), None);
    }

    #[test]
    fn test_log_level_defaults_to_info() {
        let file = write_config(r#"{}"#);
        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.log_level, "info");
        assert!(config.database_ids.is_empty());
    }

    #[test]
    fn test_empty_id_rejected() {
        let file = write_config(r#"{"database_ids": {"NOTION_MEMBER_DB_ID": ""}}"#);
        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(err.message().contains("NOTION_MEMBER_DB_ID"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let file = write_config(r#"{"database_ids": {"NOTION_CHANNEL_DB_ID": "x"}}"#);
        assert!(FileConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = FileConfig::default();
        config.database_ids.insert(DatabaseKey::Member, "from-file".into());

        config.apply_env(|key| match key {
            "NOTION_MEMBER_DB_ID" => Some("from-env".into()),
            "NOTION_EVENT_DB_ID" => Some("   ".into()),
            _ => None,
        });

        assert_eq!(config.configured_id(DatabaseKey::Member).as_deref(), Some("from-env"));
        assert_eq!(config.configured_id(DatabaseKey::Event), None);
    }
}
