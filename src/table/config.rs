//! Table construction options and file configuration
//!
//! `TableOptions` is the in-process construction type. `TableConfig` is
//! the JSON file form used by the CLI:
//!
//! ```json
//! {"primary_key": "id", "log_level": "info"}
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{TableError, TableResult};
use crate::observability::Severity;

/// Transform applied to a result page when meta is requested
pub type PostProcess = Box<dyn Fn(Vec<Value>) -> Vec<Value>>;

/// Options a table is built with
#[derive(Default)]
pub struct TableOptions {
    /// Field used by insert to reject duplicates
    pub primary_key: Option<String>,
    pub post_process: Option<PostProcess>,
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary_key(mut self, field: impl Into<String>) -> Self {
        self.primary_key = Some(field.into());
        self
    }

    pub fn post_process<F>(mut self, transform: F) -> Self
    where
        F: Fn(Vec<Value>) -> Vec<Value> + 'static,
    {
        self.post_process = Some(Box::new(transform));
        self
    }

    /// Options described by a file config
    pub fn from_config(config: &TableConfig) -> Self {
        Self {
            primary_key: config.primary_key.clone(),
            post_process: None,
        }
    }
}

impl fmt::Debug for TableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableOptions")
            .field("primary_key", &self.primary_key)
            .field("post_process", &self.post_process.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    /// Primary key field (optional)
    #[serde(default)]
    pub primary_key: Option<String>,

    /// Minimum log severity (optional, default warn)
    #[serde(default)]
    pub log_level: Option<Severity>,
}

impl TableConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> TableResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| TableError::InvalidConfig(format!("Failed to read config: {}", e)))?;

        Self::from_json_str(&content)
    }

    /// Parse and validate configuration text
    pub fn from_json_str(content: &str) -> TableResult<Self> {
        let config: TableConfig = serde_json::from_str(content)
            .map_err(|e| TableError::InvalidConfig(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> TableResult<()> {
        if let Some(key) = &self.primary_key {
            if key.trim().is_empty() {
                return Err(TableError::InvalidConfig(
                    "primary_key must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Effective minimum log severity
    pub fn log_level(&self) -> Severity {
        self.log_level.unwrap_or(Severity::Warn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_options_builder() {
        let opts = TableOptions::new()
            .primary_key("id")
            .post_process(|rows| rows.into_iter().rev().collect());

        assert_eq!(opts.primary_key.as_deref(), Some("id"));
        let transform = opts.post_process.as_ref().unwrap();
        assert_eq!(transform(vec![json!(1), json!(2)]), vec![json!(2), json!(1)]);
        assert!(format!("{:?}", opts).contains("<fn>"));
    }

    #[test]
    fn test_parse_config() {
        let config =
            TableConfig::from_json_str(r#"{"primary_key": "id", "log_level": "trace"}"#).unwrap();
        assert_eq!(config.primary_key.as_deref(), Some("id"));
        assert_eq!(config.log_level(), Severity::Trace);

        let config = TableConfig::from_json_str("{}").unwrap();
        assert_eq!(config, TableConfig::default());
        assert_eq!(config.log_level(), Severity::Warn);
    }

    #[test]
    fn test_invalid_config() {
        for bad in [
            r#"{"primary_key": ""}"#,
            r#"{"log_level": "loud"}"#,
            r#"{"primry_key": "id"}"#,
            "not json",
        ] {
            assert!(
                matches!(TableConfig::from_json_str(bad), Err(TableError::InvalidConfig(_))),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"primary_key": "sku"}}"#).unwrap();

        let config = TableConfig::load(file.path()).unwrap();
        assert_eq!(
            TableOptions::from_config(&config).primary_key.as_deref(),
            Some("sku")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = TableConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(TableError::InvalidConfig(_))));
    }
}
