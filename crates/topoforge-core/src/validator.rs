//! Cross-reference and catalog validation
//!
//! [`validate`] scans a snapshot in a fixed order: devices, links, modules,
//! PC configs, IOS configs, each in insertion order. It returns one
//! human-readable diagnostic per problem; an empty list means the topology
//! is valid.
//!
//! Device references are order-independent: a device appended after the
//! link or module that names it still satisfies the reference.

use std::collections::{HashMap, HashSet};

use crate::catalog::{CatalogKind, ModelCatalog};
use crate::config::ValidationRules;
use crate::store::Topology;

/// Validate a topology against a catalog.
///
/// Pure: calling it twice on the same input yields identical output.
pub fn validate<C>(topology: &Topology, catalog: &C, rules: &ValidationRules) -> Vec<String>
where
    C: ModelCatalog + ?Sized,
{
    let mut pass = Pass {
        known_devices: topology.device_names().collect(),
        catalog,
        rules,
        diagnostics: Vec::new(),
    };

    pass.devices(topology);
    pass.links(topology);
    pass.modules(topology);
    pass.pc_configs(topology);
    pass.ios_configs(topology);

    tracing::debug!(count = pass.diagnostics.len(), "Validation finished");
    pass.diagnostics
}

struct Pass<'a, C: ?Sized> {
    known_devices: HashSet<&'a str>,
    catalog: &'a C,
    rules: &'a ValidationRules,
    diagnostics: Vec<String>,
}

impl<'a, C: ModelCatalog + ?Sized> Pass<'a, C> {
    fn devices(&mut self, topology: &'a Topology) {
        let mut seen = HashSet::new();
        for (i, device) in topology.devices.iter().enumerate() {
            if !seen.insert(device.name.as_str()) {
                self.report(format!(
                    "devices[{i}]: duplicate device name \"{}\"",
                    device.name
                ));
            }
            if !self.catalog.has_key(CatalogKind::Devices, &device.model) {
                self.report(format!(
                    "devices[{i}] \"{}\": unknown device model \"{}\"",
                    device.name, device.model
                ));
            }
        }
    }

    fn links(&mut self, topology: &'a Topology) {
        let mut seen: HashMap<[(&str, &str); 2], usize> = HashMap::new();
        for (i, link) in topology.links.iter().enumerate() {
            for (field, name) in [
                ("device1Name", &link.device1_name),
                ("device2Name", &link.device2_name),
            ] {
                if !self.known_devices.contains(name.as_str()) {
                    self.report(format!("links[{i}]: unknown device \"{name}\" ({field})"));
                }
            }
            if !self.catalog.has_key(CatalogKind::Links, &link.link_type) {
                self.report(format!(
                    "links[{i}]: unknown link type \"{}\"",
                    link.link_type
                ));
            }

            if self.rules.reject_duplicate_links {
                let mut key = link.endpoints();
                key.sort_unstable();
                if let Some(first) = seen.get(&key) {
                    self.report(format!(
                        "links[{i}]: duplicates links[{first}] between \"{}\" {} and \"{}\" {}",
                        link.device1_name,
                        link.device1_interface,
                        link.device2_name,
                        link.device2_interface
                    ));
                } else {
                    seen.insert(key, i);
                }
            }
        }
    }

    fn modules(&mut self, topology: &'a Topology) {
        let mut occupied: HashMap<(&str, u32), usize> = HashMap::new();
        for (i, module) in topology.modules.iter().enumerate() {
            if !self.known_devices.contains(module.device_name.as_str()) {
                self.report(format!(
                    "modules[{i}]: unknown device \"{}\"",
                    module.device_name
                ));
            }
            if !self.catalog.has_key(CatalogKind::Modules, &module.model) {
                self.report(format!(
                    "modules[{i}] on \"{}\": unknown module model \"{}\"",
                    module.device_name, module.model
                ));
            }

            if self.rules.reject_slot_collisions {
                let key = (module.device_name.as_str(), module.slot);
                if let Some(first) = occupied.get(&key) {
                    self.report(format!(
                        "modules[{i}] on \"{}\": slot {} already taken by modules[{first}]",
                        module.device_name, module.slot
                    ));
                } else {
                    occupied.insert(key, i);
                }
            }
        }
    }

    fn pc_configs(&mut self, topology: &'a Topology) {
        for (i, config) in topology.pc_configs.iter().enumerate() {
            if !self.known_devices.contains(config.device_name.as_str()) {
                self.report(format!(
                    "pcConfigs[{i}]: unknown device \"{}\"",
                    config.device_name
                ));
            }
            if self.rules.exclusive_dhcp_and_static
                && config.dhcp_enabled == Some(true)
                && config.has_static_fields()
            {
                self.report(format!(
                    "pcConfigs[{i}] on \"{}\": DHCP enabled together with static address fields",
                    config.device_name
                ));
            }
        }
    }

    fn ios_configs(&mut self, topology: &'a Topology) {
        for (i, config) in topology.ios_configs.iter().enumerate() {
            if !self.known_devices.contains(config.device_name.as_str()) {
                self.report(format!(
                    "iosConfigs[{i}]: unknown device \"{}\"",
                    config.device_name
                ));
            }
        }
    }

    fn report(&mut self, diagnostic: String) {
        self.diagnostics.push(diagnostic);
    }
}
