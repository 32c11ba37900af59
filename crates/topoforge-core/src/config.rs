//! Configuration parsing
//!
//! This module handles loading the project configuration file.
//!
//! # Configuration File
//!
//! `topoforge.yaml`, every field optional:
//!
//! ```yaml
//! name: campus-lab
//! catalog: ./catalog.yaml
//! validation:
//!   reject_duplicate_links: false
//!   reject_slot_collisions: false
//!   exclusive_dhcp_and_static: false
//! generate:
//!   validate: true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::error::{Error, Result};

/// Root project configuration from `topoforge.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    #[serde(default = "default_name")]
    pub name: String,

    /// Catalog file; the embedded catalog is used when absent
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Optional validation rules
    #[serde(default)]
    pub validation: ValidationRules,

    /// Script generation settings
    #[serde(default)]
    pub generate: GenerateConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            catalog: None,
            validation: ValidationRules::default(),
            generate: GenerateConfig::default(),
        }
    }
}

fn default_name() -> String {
    "topoforge".to_string()
}

/// Opt-in validation rules.
///
/// All off by default; the baseline checks (unique device names, resolved
/// references, catalog membership) always run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// Report a link whose endpoints repeat an earlier link
    pub reject_duplicate_links: bool,

    /// Report a module placed in a slot already taken on the same device
    pub reject_slot_collisions: bool,

    /// Report PC configs that enable DHCP and also set static fields
    pub exclusive_dhcp_and_static: bool,
}

impl ValidationRules {
    /// Every optional rule enabled
    pub fn strict() -> Self {
        Self {
            reject_duplicate_links: true,
            reject_slot_collisions: true,
            exclusive_dhcp_and_static: true,
        }
    }
}

/// Script generation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Refuse to generate while validation reports problems
    #[serde(default = "default_validate")]
    pub validate: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            validate: default_validate(),
        }
    }
}

fn default_validate() -> bool {
    true
}

/// Main configuration container
#[derive(Debug, Clone)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Directory relative paths resolve against
    pub base_path: PathBuf,
}

impl Config {
    /// Load configuration from a directory or file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the project directory or topoforge.yaml file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (config_path, base_path) = Self::locate(path.as_ref());

        if !config_path.exists() {
            return Err(Error::NotFound {
                path: config_path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let project: ProjectConfig = serde_yaml::from_str(&contents)?;
        tracing::debug!(path = %config_path.display(), name = %project.name, "Loaded configuration");

        Ok(Self { project, base_path })
    }

    /// Like [`Config::load`], but fall back to defaults when the file is missing
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::load(path.as_ref()) {
            Err(Error::NotFound { path: missing }) => {
                tracing::debug!(path = %missing, "No configuration file, using defaults");
                let (_, base_path) = Self::locate(path.as_ref());
                Ok(Self {
                    project: ProjectConfig::default(),
                    base_path,
                })
            }
            other => other,
        }
    }

    /// Load the configured catalog, or the embedded one
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.project.catalog {
            Some(path) => Catalog::load(self.base_path.join(path)),
            None => Catalog::builtin(),
        }
    }

    fn locate(path: &Path) -> (PathBuf, PathBuf) {
        if path.is_dir() {
            (path.join("topoforge.yaml"), path.to_path_buf())
        } else {
            (
                path.to_path_buf(),
                path.parent().unwrap_or(Path::new(".")).to_path_buf(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogKind, ModelCatalog};

    #[test]
    fn test_parse_minimal_config() {
        let config: ProjectConfig = serde_yaml::from_str("name: lab\n").unwrap();
        assert_eq!(config.name, "lab");
        assert!(config.catalog.is_none());
        assert_eq!(config.validation, ValidationRules::default());
        assert!(config.generate.validate);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
name: campus
catalog: data/catalog.yaml
validation:
  reject_duplicate_links: true
  exclusive_dhcp_and_static: true
generate:
  validate: false
"#;
        let config: ProjectConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.catalog, Some(PathBuf::from("data/catalog.yaml")));
        assert!(config.validation.reject_duplicate_links);
        assert!(!config.validation.reject_slot_collisions);
        assert!(config.validation.exclusive_dhcp_and_static);
        assert!(!config.generate.validate);
    }

    #[test]
    fn test_default_rules_are_off() {
        let rules = ValidationRules::default();
        assert!(!rules.reject_duplicate_links);
        assert!(!rules.reject_slot_collisions);
        assert!(!rules.exclusive_dhcp_and_static);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("topoforge.yaml"), "name: from-dir\n").unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.project.name, "from-dir");
        assert_eq!(config.base_path, dir.path());
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(dir.path().join("topoforge.yaml"));
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_load_or_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("topoforge.yaml")).unwrap();
        assert_eq!(config.project, ProjectConfig::default());
        assert_eq!(config.base_path, dir.path());
    }

    #[test]
    fn test_load_or_default_propagates_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topoforge.yaml");
        std::fs::write(&path, "validation: [not, a, map]\n").unwrap();

        assert!(matches!(
            Config::load_or_default(&path),
            Err(Error::Yaml(_))
        ));
    }

    #[test]
    fn test_relative_catalog_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("topoforge.yaml"),
            "name: custom\ncatalog: my-catalog.yaml\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("my-catalog.yaml"),
            "devices:\n  Widget: {}\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        let catalog = config.load_catalog().unwrap();
        assert!(catalog.has_key(CatalogKind::Devices, "Widget"));
        assert!(!catalog.has_key(CatalogKind::Devices, "2811"));
    }

    #[test]
    fn test_default_catalog_is_builtin() {
        let config = Config {
            project: ProjectConfig::default(),
            base_path: PathBuf::from("."),
        };
        let catalog = config.load_catalog().unwrap();
        assert!(catalog.has_key(CatalogKind::Devices, "2811"));
    }
}
