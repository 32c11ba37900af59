//! Topology store
//!
//! Holds the five ordered entity sequences of the topology being drafted.
//! Appends only check the shape of their input; references between entities
//! are left for the validator.
//!
//! Collections live behind an [`Arc`] and are mutated copy-on-write, so a
//! [`Snapshot`] is cheap to take and never observes a later append or reset.

use serde::Serialize;
use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::ShapeError;
use crate::model::{Device, IosConfig, Link, Module, PcIpConfig};

/// The full set of topology collections, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Topology {
    /// Devices
    pub devices: Vec<Device>,
    /// Modules
    pub modules: Vec<Module>,
    /// Links
    pub links: Vec<Link>,
    /// PC IP configurations
    pub pc_configs: Vec<PcIpConfig>,
    /// IOS configurations
    pub ios_configs: Vec<IosConfig>,
}

impl Topology {
    /// True when all five collections are empty
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
            && self.modules.is_empty()
            && self.links.is_empty()
            && self.pc_configs.is_empty()
            && self.ios_configs.is_empty()
    }

    /// Device names in insertion order, duplicates included
    pub fn device_names(&self) -> impl Iterator<Item = &str> {
        self.devices.iter().map(|d| d.name.as_str())
    }
}

/// Read-only view of the store at one instant
#[derive(Debug, Clone)]
pub struct Snapshot(Arc<Topology>);

impl Deref for Snapshot {
    type Target = Topology;

    fn deref(&self) -> &Topology {
        &self.0
    }
}

/// Append-only topology store
#[derive(Debug, Default)]
pub struct TopologyStore {
    topology: Arc<Topology>,
}

impl TopologyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty all five collections
    pub fn reset(&mut self) {
        self.topology = Arc::new(Topology::default());
        tracing::debug!("Topology store reset");
    }

    /// Append a device
    pub fn append_device(&mut self, device: Device) -> Result<(), ShapeError> {
        device.check_shape()?;
        tracing::debug!(name = %device.name, model = %device.model, "Appending device");
        self.topology_mut().devices.push(device);
        Ok(())
    }

    /// Append a module
    pub fn append_module(&mut self, module: Module) -> Result<(), ShapeError> {
        module.check_shape()?;
        tracing::debug!(
            device = %module.device_name,
            slot = module.slot,
            model = %module.model,
            "Appending module"
        );
        self.topology_mut().modules.push(module);
        Ok(())
    }

    /// Append a link
    pub fn append_link(&mut self, link: Link) -> Result<(), ShapeError> {
        link.check_shape()?;
        tracing::debug!(
            from = %link.device1_name,
            to = %link.device2_name,
            link_type = %link.link_type,
            "Appending link"
        );
        self.topology_mut().links.push(link);
        Ok(())
    }

    /// Append a PC IP configuration
    pub fn append_pc_ip_config(&mut self, config: PcIpConfig) -> Result<(), ShapeError> {
        config.check_shape()?;
        tracing::debug!(device = %config.device_name, "Appending PC IP config");
        self.topology_mut().pc_configs.push(config);
        Ok(())
    }

    /// Append an IOS configuration
    pub fn append_ios_config(&mut self, config: IosConfig) -> Result<(), ShapeError> {
        config.check_shape()?;
        tracing::debug!(
            device = %config.device_name,
            lines = config.commands.lines().count(),
            "Appending IOS config"
        );
        self.topology_mut().ios_configs.push(config);
        Ok(())
    }

    /// Take a snapshot of the current collections
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(Arc::clone(&self.topology))
    }

    /// Borrow the current collections
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    fn topology_mut(&mut self) -> &mut Topology {
        Arc::make_mut(&mut self.topology)
    }
}

/// A [`TopologyStore`] shared between concurrent callers.
///
/// Every operation runs inside one critical section guarding the whole
/// store, so no caller sees a partial append.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<TopologyStore>>,
}

impl SharedStore {
    /// Create an empty shared store
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty all five collections
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Append a device
    pub fn append_device(&self, device: Device) -> Result<(), ShapeError> {
        self.lock().append_device(device)
    }

    /// Append a module
    pub fn append_module(&self, module: Module) -> Result<(), ShapeError> {
        self.lock().append_module(module)
    }

    /// Append a link
    pub fn append_link(&self, link: Link) -> Result<(), ShapeError> {
        self.lock().append_link(link)
    }

    /// Append a PC IP configuration
    pub fn append_pc_ip_config(&self, config: PcIpConfig) -> Result<(), ShapeError> {
        self.lock().append_pc_ip_config(config)
    }

    /// Append an IOS configuration
    pub fn append_ios_config(&self, config: IosConfig) -> Result<(), ShapeError> {
        self.lock().append_ios_config(config)
    }

    /// Take a snapshot of the current collections
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    // Appends never panic while holding the lock, so a poisoned mutex still
    // guards a consistent store.
    fn lock(&self) -> MutexGuard<'_, TopologyStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
