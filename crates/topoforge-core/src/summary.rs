//! Topology summary for quick feedback

use serde::Serialize;

use crate::store::Topology;

/// Number of entities per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Counts {
    /// Devices
    pub devices: usize,
    /// Modules
    pub modules: usize,
    /// Links
    pub links: usize,
    /// PC IP configs
    pub pc_configs: usize,
    /// IOS configs
    pub ios_configs: usize,
}

/// Counts plus the device names in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Entity counts
    pub counts: Counts,
    /// Device names, duplicates included
    pub device_names: Vec<String>,
}

/// Summarize a topology
pub fn summarize(topology: &Topology) -> Summary {
    Summary {
        counts: Counts {
            devices: topology.devices.len(),
            modules: topology.modules.len(),
            links: topology.links.len(),
            pc_configs: topology.pc_configs.len(),
            ios_configs: topology.ios_configs.len(),
        },
        device_names: topology.device_names().map(str::to_string).collect(),
    }
}
