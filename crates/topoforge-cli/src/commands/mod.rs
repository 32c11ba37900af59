//! CLI command implementations

pub mod catalog;
pub mod generate;
pub mod serve;
pub mod summary;
pub mod validate;

use anyhow::{Context as _, Result};
use std::path::Path;
use topoforge_core::{Catalog, Config, TopologyDocument, TopologyStore};

/// Configuration and catalog shared by every command
pub struct Context {
    /// Project configuration
    pub config: Config,
    /// Catalog loaded once at startup
    pub catalog: Catalog,
}

impl Context {
    /// Load configuration and the catalog.
    ///
    /// A catalog that fails to load stops the process here, before any
    /// command runs.
    pub fn load(config_path: &Path, catalog_override: Option<&Path>) -> Result<Self> {
        let config =
            Config::load_or_default(config_path).context("Failed to load configuration")?;

        let catalog = match catalog_override {
            Some(path) => Catalog::load(path),
            None => config.load_catalog(),
        }
        .context("Failed to load catalog")?;

        Ok(Self { config, catalog })
    }
}

/// Read a topology document into a fresh store
pub fn load_topology(path: &Path) -> Result<TopologyStore> {
    tracing::info!("Loading topology from {}", path.display());

    let store = TopologyDocument::load(path)
        .and_then(TopologyDocument::into_store)
        .with_context(|| format!("Failed to load topology {}", path.display()))?;

    Ok(store)
}
