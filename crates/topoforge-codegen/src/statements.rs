//! Per-category statement builders
//!
//! Each entity maps to exactly one call with a fixed argument list:
//!
//! | category   | call                 | arguments                                               |
//! |------------|----------------------|---------------------------------------------------------|
//! | device     | `addDevice`          | name, model, x, y                                       |
//! | module     | `addModule`          | device, slot, model                                     |
//! | link       | `addLink`            | device1, interface1, device2, interface2, linkType      |
//! | PC config  | `configurePcIp`      | device, dhcp, ip, mask, gateway, dns                    |
//! | IOS config | `configureIosDevice` | device, commands                                        |

use std::fmt;

use topoforge_core::{Device, IosConfig, Link, Module, PcIpConfig};

use crate::literal::Literal;

/// Call name for device statements
pub const ADD_DEVICE: &str = "addDevice";
/// Call name for module statements
pub const ADD_MODULE: &str = "addModule";
/// Call name for link statements
pub const ADD_LINK: &str = "addLink";
/// Call name for PC IP config statements
pub const CONFIGURE_PC_IP: &str = "configurePcIp";
/// Call name for IOS config statements
pub const CONFIGURE_IOS_DEVICE: &str = "configureIosDevice";

/// A single call with positional arguments
#[derive(Debug, Clone, PartialEq)]
pub struct Statement<'a> {
    /// Function name
    pub call: &'static str,
    /// Positional arguments
    pub args: Vec<Literal<'a>>,
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.call)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(");")
    }
}

/// `addDevice(name, model, x, y);`
pub fn device(device: &Device) -> Statement<'_> {
    Statement {
        call: ADD_DEVICE,
        args: vec![
            (&device.name).into(),
            (&device.model).into(),
            (&device.x).into(),
            (&device.y).into(),
        ],
    }
}

/// `addModule(device, slot, model);`
pub fn module(module: &Module) -> Statement<'_> {
    Statement {
        call: ADD_MODULE,
        args: vec![
            (&module.device_name).into(),
            module.slot.into(),
            (&module.model).into(),
        ],
    }
}

/// `addLink(device1, interface1, device2, interface2, linkType);`
pub fn link(link: &Link) -> Statement<'_> {
    Statement {
        call: ADD_LINK,
        args: vec![
            (&link.device1_name).into(),
            (&link.device1_interface).into(),
            (&link.device2_name).into(),
            (&link.device2_interface).into(),
            (&link.link_type).into(),
        ],
    }
}

/// `configurePcIp(device, dhcp, ip, mask, gateway, dns);`
pub fn pc_ip_config(config: &PcIpConfig) -> Statement<'_> {
    Statement {
        call: CONFIGURE_PC_IP,
        args: vec![
            (&config.device_name).into(),
            config.dhcp_enabled.into(),
            config.ip_address.as_ref().into(),
            config.subnet_mask.as_ref().into(),
            config.default_gateway.as_ref().into(),
            config.dns_server.as_ref().into(),
        ],
    }
}

/// `configureIosDevice(device, commands);`
pub fn ios_config(config: &IosConfig) -> Statement<'_> {
    Statement {
        call: CONFIGURE_IOS_DEVICE,
        args: vec![(&config.device_name).into(), (&config.commands).into()],
    }
}
