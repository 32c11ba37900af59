//! Topology documents
//!
//! A topology document is a YAML (or JSON) file listing entities per
//! section. Loading replays every entity through [`TopologyStore`] appends,
//! so a document is subject to the same shape checks as tool calls.
//!
//! ```yaml
//! devices:
//!   - { name: R1, model: "2811", x: 100, y: 100 }
//! modules:
//!   - { deviceName: R1, slot: 0, model: HWIC-2T }
//! links:
//!   - device1Name: R1
//!     device1Interface: Fa0/0
//!     device2Name: S1
//!     device2Interface: Fa0/1
//!     linkType: Copper Straight-Through
//! pcConfigs:
//!   - { deviceName: PC1, dhcpEnabled: true }
//! iosConfigs:
//!   - deviceName: R1
//!     commands: |
//!       hostname R1
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result, ShapeError};
use crate::model::{Device, IosConfig, Link, Module, PcIpConfig};
use crate::store::TopologyStore;

/// Entities of a topology file, per section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TopologyDocument {
    /// Devices
    #[serde(default)]
    pub devices: Vec<Device>,
    /// Modules
    #[serde(default)]
    pub modules: Vec<Module>,
    /// Links
    #[serde(default)]
    pub links: Vec<Link>,
    /// PC IP configs
    #[serde(default)]
    pub pc_configs: Vec<PcIpConfig>,
    /// IOS configs
    #[serde(default)]
    pub ios_configs: Vec<IosConfig>,
}

impl TopologyDocument {
    /// Read a topology file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a topology from YAML or JSON text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Build a fresh store from the document.
    ///
    /// Fails on the first entity the store rejects, naming its section and
    /// position.
    pub fn into_store(self) -> Result<TopologyStore> {
        let mut store = TopologyStore::new();

        append_all(&mut store, "devices", self.devices, TopologyStore::append_device)?;
        append_all(&mut store, "modules", self.modules, TopologyStore::append_module)?;
        append_all(&mut store, "links", self.links, TopologyStore::append_link)?;
        append_all(
            &mut store,
            "pcConfigs",
            self.pc_configs,
            TopologyStore::append_pc_ip_config,
        )?;
        append_all(
            &mut store,
            "iosConfigs",
            self.ios_configs,
            TopologyStore::append_ios_config,
        )?;

        Ok(store)
    }
}

fn append_all<T>(
    store: &mut TopologyStore,
    section: &'static str,
    entities: Vec<T>,
    append: fn(&mut TopologyStore, T) -> std::result::Result<(), ShapeError>,
) -> Result<()> {
    for (index, entity) in entities.into_iter().enumerate() {
        append(store, entity).map_err(|source| Error::DocumentEntity {
            section,
            index,
            source,
        })?;
    }
    Ok(())
}
