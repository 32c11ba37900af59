//! Topology entities
//!
//! Every entity uses camelCase field names on the wire so the same shape is
//! accepted from tool calls and from topology documents.
//!
//! Entities carry no cross-references beyond device names. Whether those
//! names resolve is the validator's concern, not the model's.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ShapeError;

/// A 2-D layout coordinate.
///
/// Backed by a JSON number so integers stay integers and floats keep their
/// shortest round-trip form when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coordinate(serde_json::Number);

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

macro_rules! coordinate_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Coordinate {
                fn from(value: $t) -> Self {
                    Self(serde_json::Number::from(value))
                }
            }
        )*
    };
}

coordinate_from_int!(i32, i64, u32, u64);

impl TryFrom<f64> for Coordinate {
    type Error = ShapeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        serde_json::Number::from_f64(value)
            .map(Self)
            .ok_or_else(|| ShapeError::NonFiniteCoordinate {
                value: value.to_string(),
            })
    }
}

/// A device placed on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Device {
    /// Device name (intended unique)
    pub name: String,
    /// Device model, resolved against the device catalog
    pub model: String,
    /// Horizontal position
    pub x: Coordinate,
    /// Vertical position
    pub y: Coordinate,
}

impl Device {
    /// Create a device
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        x: impl Into<Coordinate>,
        y: impl Into<Coordinate>,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            x: x.into(),
            y: y.into(),
        }
    }

    pub(crate) fn check_shape(&self) -> Result<(), ShapeError> {
        require("device", "name", &self.name)?;
        require("device", "model", &self.model)
    }
}

/// A hardware module inserted into a device slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Module {
    /// Owning device
    pub device_name: String,
    /// Slot index
    pub slot: u32,
    /// Module model, resolved against the module catalog
    pub model: String,
}

impl Module {
    /// Create a module
    pub fn new(device_name: impl Into<String>, slot: u32, model: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
            slot,
            model: model.into(),
        }
    }

    pub(crate) fn check_shape(&self) -> Result<(), ShapeError> {
        require("module", "deviceName", &self.device_name)?;
        require("module", "model", &self.model)
    }
}

/// A cable between two device interfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Link {
    /// First endpoint device
    pub device1_name: String,
    /// First endpoint interface
    pub device1_interface: String,
    /// Second endpoint device
    pub device2_name: String,
    /// Second endpoint interface
    pub device2_interface: String,
    /// Cable type, resolved against the link catalog
    pub link_type: String,
}

impl Link {
    /// Create a link
    pub fn new(
        device1_name: impl Into<String>,
        device1_interface: impl Into<String>,
        device2_name: impl Into<String>,
        device2_interface: impl Into<String>,
        link_type: impl Into<String>,
    ) -> Self {
        Self {
            device1_name: device1_name.into(),
            device1_interface: device1_interface.into(),
            device2_name: device2_name.into(),
            device2_interface: device2_interface.into(),
            link_type: link_type.into(),
        }
    }

    /// Both endpoints as `(device, interface)` pairs
    pub fn endpoints(&self) -> [(&str, &str); 2] {
        [
            (&self.device1_name, &self.device1_interface),
            (&self.device2_name, &self.device2_interface),
        ]
    }

    pub(crate) fn check_shape(&self) -> Result<(), ShapeError> {
        require("link", "device1Name", &self.device1_name)?;
        require("link", "device1Interface", &self.device1_interface)?;
        require("link", "device2Name", &self.device2_name)?;
        require("link", "device2Interface", &self.device2_interface)?;
        require("link", "linkType", &self.link_type)
    }
}

/// IP settings for an end host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PcIpConfig {
    /// Target device
    pub device_name: String,
    /// Use DHCP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dhcp_enabled: Option<bool>,
    /// Static address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Static subnet mask
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_mask: Option<String>,
    /// Static default gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_gateway: Option<String>,
    /// DNS server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_server: Option<String>,
}

impl PcIpConfig {
    /// Create a config with every optional field unset
    pub fn new(device_name: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
            ..Default::default()
        }
    }

    /// Set `dhcpEnabled`
    pub fn with_dhcp(mut self, enabled: bool) -> Self {
        self.dhcp_enabled = Some(enabled);
        self
    }

    /// Set the static address and mask
    pub fn with_address(mut self, ip: impl Into<String>, mask: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self.subnet_mask = Some(mask.into());
        self
    }

    /// Set the default gateway
    pub fn with_gateway(mut self, gateway: impl Into<String>) -> Self {
        self.default_gateway = Some(gateway.into());
        self
    }

    /// Set the DNS server
    pub fn with_dns(mut self, dns: impl Into<String>) -> Self {
        self.dns_server = Some(dns.into());
        self
    }

    /// Whether any static addressing field is present
    pub fn has_static_fields(&self) -> bool {
        self.ip_address.is_some()
            || self.subnet_mask.is_some()
            || self.default_gateway.is_some()
            || self.dns_server.is_some()
    }

    pub(crate) fn check_shape(&self) -> Result<(), ShapeError> {
        require("pcIpConfig", "deviceName", &self.device_name)
    }
}

/// Raw IOS CLI commands for a device, one per line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IosConfig {
    /// Target device
    pub device_name: String,
    /// Newline-delimited commands, passed through verbatim
    pub commands: String,
}

impl IosConfig {
    /// Create an IOS config
    pub fn new(device_name: impl Into<String>, commands: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
            commands: commands.into(),
        }
    }

    pub(crate) fn check_shape(&self) -> Result<(), ShapeError> {
        require("iosConfig", "deviceName", &self.device_name)?;
        require("iosConfig", "commands", &self.commands)
    }
}

fn require(entity: &'static str, field: &'static str, value: &str) -> Result<(), ShapeError> {
    if value.is_empty() {
        return Err(ShapeError::EmptyField { entity, field });
    }
    Ok(())
}
