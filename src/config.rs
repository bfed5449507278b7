// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration for markupcheck

use crate::error::{Error, Result};
use crate::violation::Category;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Categories run by `check_all` and the CLI
    pub categories: Vec<Category>,
    /// Rule ids that are never evaluated
    pub disabled_rules: Vec<String>,
    /// Stop a category run at the first rule that reports violations
    pub fail_fast: bool,
    /// Reject documents the parser had to repair
    pub strict_parsing: bool,
    /// Directory names skipped while scanning
    pub exclude: Vec<String>,
    /// File extensions scanned
    pub extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: Category::ALL.to_vec(),
            disabled_rules: Vec::new(),
            fail_fast: false,
            strict_parsing: false,
            exclude: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                "target".to_string(),
                "dist".to_string(),
                "build".to_string(),
                "vendor".to_string(),
                "coverage".to_string(),
            ],
            extensions: vec!["html".to_string(), "htm".to_string()],
        }
    }
}

impl Config {
    /// Whether a rule id is enabled
    pub fn is_enabled(&self, rule_id: &str) -> bool {
        !self.disabled_rules.iter().any(|r| r == rule_id)
    }

    /// Check rule ids and categories against the catalog
    pub fn validate(&self) -> Result<()> {
        if let Some(unknown) = self
            .disabled_rules
            .iter()
            .find(|id| crate::rules::find(id).is_none())
        {
            return Err(Error::Config(format!("unknown rule in disabled_rules: {}", unknown)));
        }
        if self.categories.is_empty() {
            return Err(Error::Config("no categories enabled".to_string()));
        }
        Ok(())
    }
}

/// Load configuration from TOML or YAML; a missing file yields the defaults
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    let config: Config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::from_str(&content).map_err(|e| Error::Config(format!("TOML parse error: {}", e)))?
    } else {
        serde_yaml::from_str(&content)?
    };

    config.validate()?;
    Ok(config)
}

/// Write the default configuration to `path`
pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::to_string_pretty(&config)
            .map_err(|e| Error::Config(format!("TOML serialize error: {}", e)))?
    } else {
        serde_yaml::to_string(&config)?
    };

    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_config(Path::new("/nonexistent/markupcheck.toml")).expect("defaults");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("markupcheck.toml");
        std::fs::write(
            &path,
            "categories = [\"errors\", \"obsolete\"]\ndisabled_rules = [\"tel-href\"]\nfail_fast = true\n",
        )
        .unwrap();

        let config = load_config(&path).expect("valid config");
        assert_eq!(config.categories, vec![Category::Errors, Category::Obsolete]);
        assert!(!config.is_enabled("tel-href"));
        assert!(config.is_enabled("img-alt"));
        assert!(config.fail_fast);
        assert!(!config.strict_parsing);
    }

    #[test]
    fn test_load_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("markupcheck.yml");
        std::fs::write(&path, "strict_parsing: true\nexclude:\n  - generated\n").unwrap();

        let config = load_config(&path).expect("valid config");
        assert!(config.strict_parsing);
        assert_eq!(config.exclude, vec!["generated".to_string()]);
        assert_eq!(config.categories, Category::ALL.to_vec());
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("markupcheck.toml");
        std::fs::write(&path, "disabled_rules = [\"no-such-rule\"]\n").unwrap();
        assert!(matches!(load_config(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_write_default_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("markupcheck.toml");
        write_default_config(&path).expect("write");
        assert_eq!(load_config(&path).expect("load"), Config::default());
    }
}
