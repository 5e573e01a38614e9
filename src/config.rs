//! Configuration file support for evaluated-model.
//!
//! Provides YAML-based configuration through `evaluated-model.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use evaluated_model::application::dto::OutputFormat;
use evaluated_model::model_building::domain::{
    Excludes, IssueResolution, PathExclude, RepositoryConfiguration, Resolutions,
    RuleViolationResolution, ScopeExclude, Severity,
};
use evaluated_model::shared::security::read_checked_file;
use evaluated_model::shared::Result;

pub const CONFIG_FILENAME: &str = "evaluated-model.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub pretty: Option<bool>,
    pub severe_issue_threshold: Option<String>,
    pub severe_rule_violation_threshold: Option<String>,
    pub path_excludes: Option<Vec<PathExclude>>,
    pub scope_excludes: Option<Vec<ScopeExclude>>,
    pub issue_resolutions: Option<Vec<IssueResolution>>,
    pub rule_violation_resolutions: Option<Vec<RuleViolationResolution>>,
    pub matcher: Option<MatcherConfig>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Settings of the findings matcher.
#[derive(Debug, Deserialize, Default)]
pub struct MatcherConfig {
    pub tolerance_lines: Option<u32>,
}

impl ConfigFile {
    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.format
            .as_deref()
            .map(|format| format.parse().map_err(anyhow::Error::msg))
            .transpose()
    }

    pub fn severe_issue_threshold(&self) -> Result<Option<Severity>> {
        parse_severity(self.severe_issue_threshold.as_deref())
    }

    pub fn severe_rule_violation_threshold(&self) -> Result<Option<Severity>> {
        parse_severity(self.severe_rule_violation_threshold.as_deref())
    }

    pub fn tolerance_lines(&self) -> Option<u32> {
        self.matcher.as_ref().and_then(|matcher| matcher.tolerance_lines)
    }

    /// The excludes and resolutions of this file, to be merged into the
    /// configuration embedded in the analysis result.
    pub fn repository_configuration(&self) -> RepositoryConfiguration {
        RepositoryConfiguration {
            excludes: Excludes {
                paths: self.path_excludes.clone().unwrap_or_default(),
                scopes: self.scope_excludes.clone().unwrap_or_default(),
            },
            resolutions: Resolutions {
                issues: self.issue_resolutions.clone().unwrap_or_default(),
                rule_violations: self.rule_violation_resolutions.clone().unwrap_or_default(),
            },
        }
    }
}

fn parse_severity(value: Option<&str>) -> Result<Option<Severity>> {
    value
        .map(|severity| severity.parse().map_err(anyhow::Error::msg))
        .transpose()
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_checked_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    tracing::debug!(path = %config_path.display(), "discovered config file");
    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    config.output_format().context(
        "Invalid config: 'format'\n\n💡 Hint: Supported formats are 'json' and 'yaml'.",
    )?;
    config.severe_issue_threshold().context(
        "Invalid config: 'severe_issue_threshold'\n\n💡 Hint: Use 'hint', 'warning' or 'error'.",
    )?;
    config.severe_rule_violation_threshold().context(
        "Invalid config: 'severe_rule_violation_threshold'\n\n💡 Hint: Use 'hint', 'warning' or 'error'.",
    )?;

    if let Some(ref resolutions) = config.issue_resolutions {
        for (i, resolution) in resolutions.iter().enumerate() {
            if resolution.message.trim().is_empty() {
                bail!(
                    "Invalid config: issue_resolutions[{}].message must not be empty.\n\n\
                     💡 Hint: An empty pattern would only resolve issues without a message.",
                    i
                );
            }
        }
    }
    if let Some(ref resolutions) = config.rule_violation_resolutions {
        for (i, resolution) in resolutions.iter().enumerate() {
            if resolution.message.trim().is_empty() {
                bail!(
                    "Invalid config: rule_violation_resolutions[{}].message must not be empty.",
                    i
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "unknown config field will be ignored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evaluated_model::model_building::domain::{PathExcludeReason, ScopeExcludeReason};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
format: yaml
pretty: true
severe_issue_threshold: warning
severe_rule_violation_threshold: ERROR
path_excludes:
  - pattern: "test/**"
    reason: TEST_OF
    comment: "Test fixtures"
scope_excludes:
  - pattern: "devDependencies"
    reason: DEV_DEPENDENCY_OF
issue_resolutions:
  - message: "Timeout .*"
    reason: SCANNER_ISSUE
matcher:
  tolerance_lines: 8
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.output_format().unwrap(), Some(OutputFormat::Yaml));
        assert_eq!(config.pretty, Some(true));
        assert_eq!(config.severe_issue_threshold().unwrap(), Some(Severity::Warning));
        assert_eq!(
            config.severe_rule_violation_threshold().unwrap(),
            Some(Severity::Error)
        );
        assert_eq!(config.tolerance_lines(), Some(8));

        let repository = config.repository_configuration();
        assert_eq!(repository.excludes.paths[0].reason, PathExcludeReason::TestOf);
        assert_eq!(repository.excludes.paths[0].comment, "Test fixtures");
        assert_eq!(
            repository.excludes.scopes[0].reason,
            ScopeExcludeReason::DevDependencyOf
        );
        assert_eq!(repository.resolutions.issues.len(), 1);
        assert!(repository.resolutions.rule_violations.is_empty());
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "format: json\npretty: false\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.output_format().unwrap(), Some(OutputFormat::Json));
        assert_eq!(config.pretty, Some(false));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "format: markdown\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("Invalid config: 'format'"));
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "severe_issue_threshold: fatal\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("severe_issue_threshold"));
    }

    #[test]
    fn test_empty_resolution_message_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
issue_resolutions:
  - message: "   "
    reason: CANT_FIX_ISSUE
"#,
        )
        .unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("must not be empty"));
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
format: json
unknown_field: true
another_unknown: value
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("unknown_field"));
        assert!(config.unknown_fields.contains_key("another_unknown"));
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.output_format().unwrap().is_none());
        assert!(config.tolerance_lines().is_none());
        assert_eq!(
            config.repository_configuration(),
            RepositoryConfiguration::default()
        );
        assert!(config.unknown_fields.is_empty());
    }
}
