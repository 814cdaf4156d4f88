//! Filter configuration.
//!
//! A `FilterConfig` carries the role table (role name → positional index)
//! and the formatting used by the export action. It is plain TOML:
//!
//! ```toml
//! [roles]
//! guest = 0
//! user = 1
//! admin = 2
//!
//! [export]
//! date_format = "%d-%m-%Y"
//! true_label = "Yes"
//! false_label = "No"
//! ```
//!
//! Every section is optional; missing values take their defaults.

use crate::error::{Error, Result};
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default export date format (day-month-year).
pub const DEFAULT_EXPORT_DATE_FORMAT: &str = "%d-%m-%Y";

/// Formatting applied under [`Action::Export`](crate::Action::Export).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// `chrono` format string for dates and timestamps.
    pub date_format: String,
    /// Text rendered for `true`.
    pub true_label: String,
    /// Text rendered for `false`.
    pub false_label: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_EXPORT_DATE_FORMAT.to_string(),
            true_label: "Yes".to_string(),
            false_label: "No".to_string(),
        }
    }
}

impl ExportConfig {
    /// Label for a boolean value.
    pub fn bool_label(&self, value: bool) -> &str {
        if value {
            &self.true_label
        } else {
            &self.false_label
        }
    }
}

/// Configuration for a field filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Role names mapped to their positional index.
    pub roles: BTreeMap<String, u8>,
    /// Export formatting.
    pub export: ExportConfig,
}

impl FilterConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FilterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading filter config from {}", path.display());
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_toml_str(&content)
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Adds a role to the table, builder style.
    pub fn with_role(mut self, name: impl Into<String>, index: u8) -> Self {
        self.roles.insert(name.into(), index);
        self
    }

    /// Resolves a role name from the table.
    ///
    /// The returned role carries both the index and the name, so it works
    /// with positional and keyed specifiers alike.
    pub fn role(&self, name: &str) -> Result<Role> {
        self.roles
            .get(name)
            .map(|&index| Role::named(index, name))
            .ok_or_else(|| Error::UnknownRole(name.to_string()))
    }

    /// Checks that the configuration is usable.
    ///
    /// Rejects an empty export date format, empty role names, and two roles
    /// sharing one index.
    pub fn validate(&self) -> Result<()> {
        if self.export.date_format.trim().is_empty() {
            return Err(Error::config("export.date_format must not be empty"));
        }
        let mut seen: BTreeMap<u8, &str> = BTreeMap::new();
        for (name, &index) in &self.roles {
            if name.trim().is_empty() {
                return Err(Error::config("role names must not be empty"));
            }
            if let Some(other) = seen.insert(index, name) {
                return Err(Error::config(format!(
                    "roles '{other}' and '{name}' share index {index}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[roles]
guest = 0
user = 1
admin = 2

[export]
date_format = "%Y/%m/%d"
true_label = "Y"
"#;

    #[test]
    fn test_default_config() {
        let config = FilterConfig::default();
        assert!(config.roles.is_empty());
        assert_eq!(config.export.date_format, "%d-%m-%Y");
        assert_eq!(config.export.bool_label(true), "Yes");
        assert_eq!(config.export.bool_label(false), "No");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_str() {
        let config = FilterConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.roles.len(), 3);
        assert_eq!(config.export.date_format, "%Y/%m/%d");
        assert_eq!(config.export.true_label, "Y");
        // Missing keys fall back to defaults
        assert_eq!(config.export.false_label, "No");
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = FilterConfig::from_toml_str("").unwrap();
        assert_eq!(config, FilterConfig::default());
    }

    #[test]
    fn test_role_lookup() {
        let config = FilterConfig::from_toml_str(SAMPLE).unwrap();
        let admin = config.role("admin").unwrap();
        assert_eq!(admin.index(), 2);
        assert_eq!(admin.name(), Some("admin"));
        assert!(matches!(config.role("root"), Err(Error::UnknownRole(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_index() {
        let config = FilterConfig::default()
            .with_role("user", 1)
            .with_role("member", 1);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("share index 1"));
    }

    #[test]
    fn test_validate_rejects_empty_date_format() {
        let err = FilterConfig::from_toml_str("[export]\ndate_format = \"\"\n").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let err = FilterConfig::from_toml_str("[roles\n").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = FilterConfig::load(file.path()).unwrap();
        assert_eq!(config.role("user").unwrap().index(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = FilterConfig::load("/nonexistent/fieldpex.toml").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = FilterConfig::default().with_role("admin", 2);
        let text = config.to_toml_string().unwrap();
        assert_eq!(FilterConfig::from_toml_str(&text).unwrap(), config);
    }
}
