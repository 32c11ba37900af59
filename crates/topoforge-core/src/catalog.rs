//! Catalog of valid device models, module models, and link types
//!
//! The catalog is a static YAML asset parsed once into immutable maps. The
//! validator only sees it through [`ModelCatalog`], so tests can swap in any
//! fixture.
//!
//! # Format
//!
//! ```yaml
//! devices:
//!   "2811": { category: router, description: "Cisco 2811" }
//! modules:
//!   "HWIC-2T": { description: "2-port serial WAN interface card" }
//! links:
//!   "Copper Straight-Through": {}
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result, ShapeError};

/// Largest accepted `limit` for [`ModelCatalog::list`]
pub const MAX_LIST_LIMIT: usize = 500;

const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.yaml");

/// Which catalog mapping to consult
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    /// Device models
    Devices,
    /// Module models
    Modules,
    /// Link (cable) types
    Links,
}

impl CatalogKind {
    /// All kinds, in catalog file order
    pub const ALL: [CatalogKind; 3] = [Self::Devices, Self::Modules, Self::Links];

    /// Lowercase name as used on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Devices => "devices",
            Self::Modules => "modules",
            Self::Links => "links",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "devices" => Ok(Self::Devices),
            "modules" => Ok(Self::Modules),
            "links" => Ok(Self::Links),
            other => Err(ShapeError::InvalidArguments {
                operation: "listCatalog".to_string(),
                message: format!("unknown catalog kind '{other}', expected devices, modules or links"),
            }),
        }
    }
}

/// Metadata attached to a catalog key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Coarse grouping, e.g. `router`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Result of a catalog listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogListing {
    /// Size of the whole mapping, before filtering
    pub total_known: usize,
    /// Matching keys, ascending, truncated to the limit
    pub entries: Vec<String>,
}

/// Read-only lookups the validator needs from a catalog
pub trait ModelCatalog {
    /// Whether `key` exists in the `kind` mapping
    fn has_key(&self, kind: CatalogKind, key: &str) -> bool;

    /// Keys of the `kind` mapping in ascending order
    fn keys(&self, kind: CatalogKind) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Number of keys in the `kind` mapping
    fn count(&self, kind: CatalogKind) -> usize;

    /// List keys starting with `starts_with` (case-insensitive).
    ///
    /// `limit` must be in `1..=500`.
    fn list(
        &self,
        kind: CatalogKind,
        limit: i64,
        starts_with: &str,
    ) -> std::result::Result<CatalogListing, ShapeError> {
        let max = usize::try_from(limit)
            .ok()
            .filter(|l| (1..=MAX_LIST_LIMIT).contains(l))
            .ok_or(ShapeError::LimitOutOfRange {
                limit,
                max: MAX_LIST_LIMIT,
            })?;

        let prefix = starts_with.to_lowercase();
        let mut entries: Vec<String> = self
            .keys(kind)
            .filter(|key| key.to_lowercase().starts_with(&prefix))
            .map(str::to_string)
            .collect();
        entries.sort();
        entries.truncate(max);

        Ok(CatalogListing {
            total_known: self.count(kind),
            entries,
        })
    }
}

/// The three catalog mappings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Device models
    #[serde(default)]
    pub devices: BTreeMap<String, Descriptor>,

    /// Module models
    #[serde(default)]
    pub modules: BTreeMap<String, Descriptor>,

    /// Link types
    #[serde(default)]
    pub links: BTreeMap<String, Descriptor>,
}

impl Catalog {
    /// The catalog embedded in this crate
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Load a catalog file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml(&contents)?;
        tracing::info!(
            path = %path.display(),
            devices = catalog.devices.len(),
            modules = catalog.modules.len(),
            links = catalog.links.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse catalog YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let catalog: Catalog = serde_yaml::from_str(yaml)?;

        for kind in CatalogKind::ALL {
            if catalog.mapping(kind).contains_key("") {
                return Err(Error::CatalogInvalid {
                    message: format!("{kind} contains an empty key"),
                });
            }
        }

        Ok(catalog)
    }

    fn mapping(&self, kind: CatalogKind) -> &BTreeMap<String, Descriptor> {
        match kind {
            CatalogKind::Devices => &self.devices,
            CatalogKind::Modules => &self.modules,
            CatalogKind::Links => &self.links,
        }
    }
}

impl ModelCatalog for Catalog {
    fn has_key(&self, kind: CatalogKind, key: &str) -> bool {
        self.mapping(kind).contains_key(key)
    }

    fn keys(&self, kind: CatalogKind) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.mapping(kind).keys().map(String::as_str))
    }

    fn count(&self, kind: CatalogKind) -> usize {
        self.mapping(kind).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn builtin() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = builtin();
        assert!(catalog.has_key(CatalogKind::Devices, "2811"));
        assert!(catalog.has_key(CatalogKind::Modules, "HWIC-2T"));
        assert!(catalog.has_key(CatalogKind::Links, "Copper Straight-Through"));
    }

    #[test]
    fn test_membership_is_exact() {
        let catalog = builtin();
        assert!(!catalog.has_key(CatalogKind::Devices, "pc-pt"));
        assert!(!catalog.has_key(CatalogKind::Devices, "2811 "));
        assert!(!catalog.has_key(CatalogKind::Links, "2811"));
    }

    #[test]
    fn test_list_with_prefix_and_limit() {
        let catalog = builtin();
        let listing = catalog.list(CatalogKind::Devices, 2, "29").unwrap();

        assert_eq!(listing.entries, ["2901", "2911"]);
        assert_eq!(listing.total_known, catalog.count(CatalogKind::Devices));
    }

    #[test]
    fn test_list_prefix_28() {
        let catalog = builtin();
        let listing = catalog.list(CatalogKind::Devices, 2, "28").unwrap();

        assert!(listing.entries.len() <= 2);
        assert!(listing.entries.iter().all(|e| e.starts_with("28")));
        assert_eq!(listing.total_known, catalog.count(CatalogKind::Devices));
    }

    #[test]
    fn test_list_is_case_insensitive() {
        let catalog = builtin();
        let listing = catalog.list(CatalogKind::Devices, 500, "pc").unwrap();
        assert_eq!(listing.entries, ["PC-PT"]);

        let listing = catalog.list(CatalogKind::Links, 500, "COPPER").unwrap();
        assert_eq!(
            listing.entries,
            ["Copper Cross-Over", "Copper Straight-Through"]
        );
    }

    #[test]
    fn test_list_empty_prefix_returns_everything_sorted() {
        let catalog = builtin();
        let listing = catalog.list(CatalogKind::Modules, 500, "").unwrap();

        assert_eq!(listing.entries.len(), catalog.count(CatalogKind::Modules));
        let mut sorted = listing.entries.clone();
        sorted.sort();
        assert_eq!(listing.entries, sorted);
    }

    #[test]
    fn test_list_no_match() {
        let catalog = builtin();
        let listing = catalog.list(CatalogKind::Links, 10, "zzz").unwrap();
        assert!(listing.entries.is_empty());
        assert_eq!(listing.total_known, catalog.count(CatalogKind::Links));
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    #[case(501)]
    fn test_list_rejects_limit_out_of_range(#[case] limit: i64) {
        let catalog = builtin();
        assert!(matches!(
            catalog.list(CatalogKind::Devices, limit, ""),
            Err(ShapeError::LimitOutOfRange { .. })
        ));
    }

    #[rstest]
    #[case("devices", CatalogKind::Devices)]
    #[case("Modules", CatalogKind::Modules)]
    #[case("LINKS", CatalogKind::Links)]
    fn test_kind_from_str(#[case] input: &str, #[case] expected: CatalogKind) {
        assert_eq!(input.parse::<CatalogKind>().unwrap(), expected);
    }

    #[test]
    fn test_kind_from_str_unknown() {
        assert!("cables".parse::<CatalogKind>().is_err());
    }

    #[test]
    fn test_from_yaml_rejects_empty_key() {
        let yaml = r#"
devices:
  "": { description: "nameless" }
"#;
        assert!(matches!(
            Catalog::from_yaml(yaml),
            Err(Error::CatalogInvalid { .. })
        ));
    }

    #[test]
    fn test_from_yaml_missing_sections_default_empty() {
        let catalog = Catalog::from_yaml("links:\n  Fiber: {}\n").unwrap();
        assert_eq!(catalog.count(CatalogKind::Devices), 0);
        assert_eq!(catalog.count(CatalogKind::Links), 1);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, "devices:\n  \"2811\": { category: router }\n").unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert!(catalog.has_key(CatalogKind::Devices, "2811"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Catalog::load(dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }
}
