//! Statement generator
//!
//! Serializes a topology into statements in a fixed category order:
//! devices, modules, links, PC IP configs, IOS configs. Within a category
//! the store's insertion order is kept. The generator neither validates nor
//! consults the catalog; it writes out whatever the topology holds.

use topoforge_core::Topology;

use crate::statements::{self, Statement};

/// The single line emitted for a topology with nothing in it
pub const EMPTY_TOPOLOGY: &str = "// Empty topology: nothing to build";

/// Generates simulator statements from a topology
#[derive(Debug, Clone, Default)]
pub struct Generator;

impl Generator {
    /// Create a generator
    pub fn new() -> Self {
        Self
    }

    /// Generate one statement per entity.
    ///
    /// Never returns an empty list: an empty topology yields
    /// [`EMPTY_TOPOLOGY`].
    pub fn generate(&self, topology: &Topology) -> Vec<String> {
        let lines: Vec<String> = self
            .statements(topology)
            .map(|statement| statement.to_string())
            .collect();

        if lines.is_empty() {
            return vec![EMPTY_TOPOLOGY.to_string()];
        }
        lines
    }

    /// Statements in emission order, without the empty-topology sentinel
    pub fn statements<'a>(&self, topology: &'a Topology) -> impl Iterator<Item = Statement<'a>> {
        let devices = topology.devices.iter().map(statements::device);
        let modules = topology.modules.iter().map(statements::module);
        let links = topology.links.iter().map(statements::link);
        let pcs = topology.pc_configs.iter().map(statements::pc_ip_config);
        let ios = topology.ios_configs.iter().map(statements::ios_config);

        devices.chain(modules).chain(links).chain(pcs).chain(ios)
    }
}
