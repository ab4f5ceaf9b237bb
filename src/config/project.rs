//! Project configuration (.plinth/config.yaml) data structures
//!
//! Every field is optional. Command line flags and environment variables
//! take precedence over anything set here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PlinthError, Result, fs as fs_error};
use crate::resolver::OptionChoices;

/// Project configuration (.plinth/config.yaml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Catalog path, relative to the project root unless absolute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Units installed by a bare `plinth install`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub continue_on_error: bool,

    /// Option choices per unit, overridden by `--option`
    #[serde(default, skip_serializing_if = "OptionChoices::is_empty")]
    pub options: OptionChoices,
}

impl ProjectConfig {
    /// Parse project configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // A file with no keys is not a YAML mapping
        let blank = yaml.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if blank {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Serialize project configuration to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        if *self == Self::default() {
            return Ok(String::new());
        }
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| fs_error::read_failed(path, e))?;
        Self::from_yaml(&content).map_err(|e| match e {
            PlinthError::ConfigParseFailed { reason, .. } => PlinthError::ConfigParseFailed {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = format!("# Plinth project configuration\n{}", self.to_yaml()?);
        fs::write(path, content).map_err(|e| fs_error::write_failed(path, e))
    }

    /// Catalog path resolved against the project root
    pub fn catalog_path(&self, root: &Path) -> Option<PathBuf> {
        self.catalog.as_ref().map(|p| root.join(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(ProjectConfig::from_yaml("").unwrap(), ProjectConfig::default());
        assert_eq!(
            ProjectConfig::from_yaml("# only a comment\n").unwrap(),
            ProjectConfig::default()
        );
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r"
catalog: catalogs/team.yaml
units:
  - languages/python
  - tools/docker
continue_on_error: true
options:
  languages/python:
    linter: ruff
";
        let config = ProjectConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.catalog, Some(PathBuf::from("catalogs/team.yaml")));
        assert_eq!(config.units, vec!["languages/python", "tools/docker"]);
        assert!(config.continue_on_error);
        assert_eq!(config.options["languages/python"]["linter"], "ruff");
        assert_eq!(
            config.catalog_path(Path::new("/work")),
            Some(PathBuf::from("/work/catalogs/team.yaml"))
        );
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = ProjectConfig::from_yaml("unit: [a]\n").unwrap_err();
        assert!(matches!(err, PlinthError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_load_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "continue_on_error: maybe\n").unwrap();

        match ProjectConfig::load(&path).unwrap_err() {
            PlinthError::ConfigParseFailed { path: reported, .. } => {
                assert_eq!(reported, path.display().to_string());
            }
            other => panic!("expected ConfigParseFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_default() {
        let temp = TempDir::new().unwrap();
        let config = ProjectConfig::load(&temp.path().join("absent.yaml")).unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        let config = ProjectConfig {
            catalog: Some(PathBuf::from("plinth.catalog.yaml")),
            ..ProjectConfig::default()
        };
        config.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Plinth project configuration\n"));
        assert_eq!(ProjectConfig::load(&path).unwrap(), config);
    }
}
