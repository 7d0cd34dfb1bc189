//! Topology description types deserialized from TOML or JSON.
//!
//! A description mirrors the parts of an IP-XACT design the connectivity
//! graph needs: component instances with their address spaces, memory maps,
//! bus interfaces, bridges and channels, plus the design's interconnections.
//! An optional `top` component is the component the design implements; its
//! bus interfaces are reachable from inside the design through hierarchical
//! interconnections. Any instance may carry its own sub-design in the same
//! shape, whose `hier` targets are that instance's bus interfaces.

use memconn_common::InterfaceMode;
use serde::Deserialize;

/// A complete topology description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopologyFile {
    /// Name of the described design, used in reports.
    #[serde(default)]
    pub name: String,
    /// The component implemented by the design, if any.
    #[serde(default)]
    pub top: Option<ComponentDecl>,
    /// Component instances placed in the design.
    #[serde(default)]
    pub instances: Vec<InstanceDecl>,
    /// Bus interconnections between instance and top interfaces.
    #[serde(default)]
    pub interconnections: Vec<InterconnectionDecl>,
}

/// A component instance in the design.
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceDecl {
    /// Instance name, unique within the design.
    pub name: String,
    /// The instantiated component.
    #[serde(flatten)]
    pub component: ComponentDecl,
}

/// The parts of a component relevant to connectivity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentDecl {
    /// Vendor/library/name/version of the component as free text.
    #[serde(default)]
    pub vlnv: String,
    /// Address spaces referenced by master interfaces.
    #[serde(default)]
    pub address_spaces: Vec<AddressSpaceDecl>,
    /// Memory maps referenced by slave interfaces.
    #[serde(default)]
    pub memory_maps: Vec<MemoryMapDecl>,
    /// Bus interfaces of the component.
    #[serde(default)]
    pub bus_interfaces: Vec<BusInterfaceDecl>,
    /// Channels joining mirrored interfaces inside the component.
    #[serde(default)]
    pub channels: Vec<ChannelDecl>,
    /// The hierarchical implementation of the component, if any.
    #[serde(default)]
    pub design: Option<DesignDecl>,
}

/// A sub-design implementing a hierarchical component.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DesignDecl {
    /// Component instances placed in the sub-design.
    #[serde(default)]
    pub instances: Vec<InstanceDecl>,
    /// Interconnections of the sub-design; `hier` targets name bus
    /// interfaces of the enclosing component.
    #[serde(default)]
    pub interconnections: Vec<InterconnectionDecl>,
}

/// An address space, optionally carrying its own local memory map.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressSpaceDecl {
    /// Address space name.
    pub name: String,
    /// Name of the local memory map embedded in this address space.
    #[serde(default)]
    pub local_memory_map: Option<String>,
}

/// A memory map of a component.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryMapDecl {
    /// Memory map name.
    pub name: String,
}

/// A bus interface of a component.
#[derive(Debug, Clone, Deserialize)]
pub struct BusInterfaceDecl {
    /// Bus interface name, unique within the component.
    pub name: String,
    /// Interface mode; parsed case-insensitively.
    pub mode: InterfaceMode,
    /// Address space referenced by a master interface.
    #[serde(default)]
    pub address_space: Option<String>,
    /// Memory map referenced by a slave interface.
    #[serde(default)]
    pub memory_map: Option<String>,
    /// Master interfaces of the same component reached through transparent
    /// bridges from this slave interface.
    #[serde(default)]
    pub bridges: Vec<String>,
}

/// A channel connecting mirrored interfaces of one component.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelDecl {
    /// Channel name.
    pub name: String,
    /// Names of the bus interfaces joined by this channel.
    pub interfaces: Vec<String>,
}

/// A reference to a bus interface of a component instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InterfaceRef {
    /// Instance name.
    pub instance: String,
    /// Bus interface name on that instance.
    pub bus: String,
}

impl std::fmt::Display for InterfaceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.instance, self.bus)
    }
}

/// A bus interconnection from one start interface to one or more targets.
#[derive(Debug, Clone, Deserialize)]
pub struct InterconnectionDecl {
    /// Interconnection name.
    pub name: String,
    /// The start interface.
    pub start: InterfaceRef,
    /// Target interfaces on other instances.
    #[serde(default)]
    pub active: Vec<InterfaceRef>,
    /// Target bus interfaces of the top component.
    #[serde(default)]
    pub hier: Vec<String>,
}

impl TopologyFile {
    /// Returns the instance with the given name.
    pub fn instance(&self, name: &str) -> Option<&InstanceDecl> {
        self.instances.iter().find(|i| i.name == name)
    }

    /// Returns `true` if the description contains a design below the top component.
    pub fn has_design(&self) -> bool {
        !self.instances.is_empty() || !self.interconnections.is_empty()
    }
}

impl ComponentDecl {
    /// Returns the bus interface with the given name.
    pub fn bus_interface(&self, name: &str) -> Option<&BusInterfaceDecl> {
        self.bus_interfaces.iter().find(|b| b.name == name)
    }
}
