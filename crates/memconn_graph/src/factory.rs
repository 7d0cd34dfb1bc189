//! Lowering of a [`TopologyFile`] description into a [`TopologyGraph`].
//!
//! The lowering follows the memory designer's connectivity rules:
//!
//! - address spaces and memory maps become memory items of their instance;
//!   a local memory map becomes an extra memory map item
//! - a master interface is connected to its address space, a slave interface
//!   to its memory map
//! - a slave with transparent bridges is joined to each bridged master, and
//!   both ends are marked bridged
//! - a channel joins every pair of its interfaces
//! - an address space with a local memory map gets a self-loop connection on
//!   the interface referencing it, or on a synthetic interface when none does
//! - the top component's interfaces are hierarchical when a design is present,
//!   and hierarchical interconnections reach them by bus name
//! - an instance with a sub-design has all its bus interfaces marked
//!   hierarchical, and the sub-design is lowered below it with `hier`
//!   targets resolved against that instance's interfaces
//!
//! Instances of a sub-design are named `<parent>/<instance>` in the graph.

use std::collections::{BTreeMap, HashMap};

use crate::builder::GraphBuilder;
use crate::error::GraphError;
use crate::graph::{MemoryKind, TopologyGraph};
use crate::ids::{InstanceId, MemoryId, VertexId};
use memconn_common::{
    bridge_connection_name, local_interface_name, local_memory_map_connection_name,
    InterfaceMode,
};
use memconn_config::{
    ComponentDecl, InstanceDecl, InterconnectionDecl, InterfaceRef, TopologyFile,
};

/// Name of the instance representing the top component.
pub const TOP_INSTANCE_NAME: &str = "top";

/// Separator between an enclosing instance's name and a nested instance's name.
pub const HIERARCHY_SEPARATOR: char = '/';

/// Builds the connectivity graph described by `topology`.
///
/// Every name reference in the description must resolve; an unresolved
/// interface, address space, or memory map is reported as a [`GraphError`].
pub fn build_graph(topology: &TopologyFile) -> Result<TopologyGraph, GraphError> {
    let mut builder = GraphBuilder::new();

    let top_interfaces = match &topology.top {
        Some(top) => {
            let instance = builder.add_instance(TOP_INSTANCE_NAME, top.vlnv.clone());
            let interfaces = lower_component(&mut builder, instance, TOP_INSTANCE_NAME, top)?;
            if topology.has_design() {
                for &vertex in interfaces.values() {
                    builder.set_hierarchical(vertex)?;
                }
            }
            Some(interfaces)
        }
        None => None,
    };

    lower_design(
        &mut builder,
        None,
        &topology.instances,
        &topology.interconnections,
        top_interfaces.as_ref(),
    )?;

    builder.build()
}

/// Lowers the instances and interconnections of one design level.
///
/// `hier_interfaces` are the bus interfaces of the component the design
/// implements, if any.
fn lower_design(
    builder: &mut GraphBuilder,
    parent: Option<&str>,
    instances: &[InstanceDecl],
    interconnections: &[InterconnectionDecl],
    hier_interfaces: Option<&BTreeMap<String, VertexId>>,
) -> Result<(), GraphError> {
    let mut design_interfaces: HashMap<(&str, &str), VertexId> = HashMap::new();
    for decl in instances {
        let name = match parent {
            Some(parent) => format!("{parent}{HIERARCHY_SEPARATOR}{}", decl.name),
            None => decl.name.clone(),
        };
        let instance = builder.add_instance(name.as_str(), decl.component.vlnv.clone());
        let interfaces = lower_component(builder, instance, &name, &decl.component)?;
        for bus in &decl.component.bus_interfaces {
            design_interfaces.insert(
                (decl.name.as_str(), bus.name.as_str()),
                interfaces[&bus.name],
            );
        }
    }

    for ic in interconnections {
        let context = format!("interconnection '{}'", ic.name);
        let start = resolve_ref(&design_interfaces, &ic.start, &context)?;

        if !ic.hier.is_empty() {
            let hier = hier_interfaces
                .ok_or_else(|| GraphError::MissingTopComponent(ic.name.clone()))?;
            for bus in &ic.hier {
                let target =
                    hier.get(bus)
                        .copied()
                        .ok_or_else(|| GraphError::UnknownInterface {
                            reference: bus.clone(),
                            context: context.clone(),
                        })?;
                builder.add_connection(ic.name.as_str(), start, target);
            }
        }

        for target_ref in &ic.active {
            let target = resolve_ref(&design_interfaces, target_ref, &context)?;
            builder.add_connection(ic.name.as_str(), start, target);
        }
    }

    Ok(())
}

fn resolve_ref<'a>(
    interfaces: &HashMap<(&'a str, &'a str), VertexId>,
    reference: &'a InterfaceRef,
    context: &str,
) -> Result<VertexId, GraphError> {
    interfaces
        .get(&(reference.instance.as_str(), reference.bus.as_str()))
        .copied()
        .ok_or_else(|| GraphError::UnknownInterface {
            reference: reference.to_string(),
            context: context.to_string(),
        })
}

/// Adds the memories, interfaces, and internal connections of one instance.
///
/// Returns the instance's bus interfaces by name.
fn lower_component(
    builder: &mut GraphBuilder,
    instance: InstanceId,
    instance_name: &str,
    component: &ComponentDecl,
) -> Result<BTreeMap<String, VertexId>, GraphError> {
    tracing::debug!(instance = instance_name, vlnv = %component.vlnv, "lowering instance");

    let mut spaces: HashMap<&str, MemoryId> = HashMap::new();
    for space in &component.address_spaces {
        let id = builder.add_memory(space.name.as_str(), MemoryKind::AddressSpace, instance);
        spaces.insert(space.name.as_str(), id);
        if let Some(local_map) = &space.local_memory_map {
            builder.add_memory(local_map.as_str(), MemoryKind::MemoryMap, instance);
        }
    }

    let mut maps: HashMap<&str, MemoryId> = HashMap::new();
    for map in &component.memory_maps {
        let id = builder.add_memory(map.name.as_str(), MemoryKind::MemoryMap, instance);
        maps.insert(map.name.as_str(), id);
    }

    let mut interfaces = BTreeMap::new();
    for bus in &component.bus_interfaces {
        let vertex = builder.add_interface(bus.name.as_str(), bus.mode, instance);
        let reference = match bus.mode {
            InterfaceMode::Master => bus.address_space.as_deref().map(|r| (r, &spaces)),
            InterfaceMode::Slave => bus.memory_map.as_deref().map(|r| (r, &maps)),
            _ => None,
        };
        if let Some((memory_name, table)) = reference {
            let memory = table.get(memory_name).copied().ok_or_else(|| {
                GraphError::UnknownMemoryReference {
                    interface: format!("{instance_name}.{}", bus.name),
                    memory: memory_name.to_string(),
                }
            })?;
            builder.set_memory(vertex, memory)?;
        }
        interfaces.insert(bus.name.clone(), vertex);
    }

    let lookup = |bus: &str, context: &str| -> Result<VertexId, GraphError> {
        interfaces.get(bus).copied().ok_or_else(|| GraphError::UnknownInterface {
            reference: format!("{instance_name}.{bus}"),
            context: context.to_string(),
        })
    };

    for channel in &component.channels {
        let context = format!("channel '{}'", channel.name);
        for (i, start) in channel.interfaces.iter().enumerate() {
            let start = lookup(start.as_str(), &context)?;
            for target in &channel.interfaces[i + 1..] {
                let target = lookup(target.as_str(), &context)?;
                builder.add_connection(channel.name.as_str(), start, target);
            }
        }
    }

    for bus in component.bus_interfaces.iter().filter(|b| !b.bridges.is_empty()) {
        let context = format!("bridge of '{instance_name}.{}'", bus.name);
        let slave = lookup(bus.name.as_str(), &context)?;
        builder.set_bridged(slave)?;
        for master in &bus.bridges {
            let target = lookup(master.as_str(), &context)?;
            builder.set_bridged(target)?;
            builder.add_connection(bridge_connection_name(&bus.name, master), slave, target);
        }
    }

    for space in &component.address_spaces {
        let Some(local_map) = &space.local_memory_map else {
            continue;
        };
        let referencing = component
            .bus_interfaces
            .iter()
            .find(|b| b.address_space.as_deref() == Some(space.name.as_str()))
            .map(|b| interfaces[&b.name]);
        let vertex = match referencing {
            Some(vertex) => vertex,
            None => {
                let vertex = builder.add_interface(
                    local_interface_name(&space.name),
                    InterfaceMode::Undefined,
                    instance,
                );
                builder.set_memory(vertex, spaces[space.name.as_str()])?;
                vertex
            }
        };
        let name = local_memory_map_connection_name(&space.name, local_map);
        builder.add_connection(name, vertex, vertex);
    }

    if let Some(design) = &component.design {
        tracing::debug!(
            instance = instance_name,
            instances = design.instances.len(),
            "lowering sub-design"
        );
        for &vertex in interfaces.values() {
            builder.set_hierarchical(vertex)?;
        }
        lower_design(
            builder,
            Some(instance_name),
            &design.instances,
            &design.interconnections,
            Some(&interfaces),
        )?;
    }

    Ok(interfaces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use memconn_common::is_local_memory_map_connection;

    fn lower(src: &str) -> Result<TopologyGraph, GraphError> {
        let topology: TopologyFile = toml::from_str(src).unwrap();
        build_graph(&topology)
    }

    fn vertex(g: &TopologyGraph, instance: &str, bus: &str) -> VertexId {
        g.find_interface(instance, bus).unwrap()
    }

    #[test]
    fn master_and_slave_memories_are_attached() {
        let g = lower(
            r#"
[[instances]]
name = "cpu"
[[instances.address_spaces]]
name = "cpu_space"
[[instances.bus_interfaces]]
name = "axi_m"
mode = "master"
address_space = "cpu_space"

[[instances]]
name = "ram"
[[instances.memory_maps]]
name = "ram_map"
[[instances.bus_interfaces]]
name = "axi_s"
mode = "slave"
memory_map = "ram_map"

[[interconnections]]
name = "cpu_to_ram"
start = { instance = "cpu", bus = "axi_m" }
active = [{ instance = "ram", bus = "axi_s" }]
"#,
        )
        .unwrap();

        let m = vertex(&g, "cpu", "axi_m");
        let s = vertex(&g, "ram", "axi_s");
        assert_eq!(g.connected_memory(m).unwrap().kind, MemoryKind::AddressSpace);
        assert_eq!(g.connected_memory(s).unwrap().kind, MemoryKind::MemoryMap);
        assert_eq!(g.edge_count(), 1);
        let edge = g.edges().next().unwrap();
        assert_eq!((edge.first, edge.second), (m, s));
        assert_eq!(edge.name, "cpu_to_ram");
    }

    #[test]
    fn bridges_mark_both_ends_and_connect_them() {
        let g = lower(
            r#"
[[instances]]
name = "apb_bridge"
[[instances.bus_interfaces]]
name = "axi_s"
mode = "slave"
bridges = ["apb_m"]
[[instances.bus_interfaces]]
name = "apb_m"
mode = "master"
"#,
        )
        .unwrap();
        let s = vertex(&g, "apb_bridge", "axi_s");
        let m = vertex(&g, "apb_bridge", "apb_m");
        assert!(g.vertex(s).bridged);
        assert!(g.vertex(m).bridged);
        let edge = g.edges_of(s).next().unwrap();
        assert_eq!(edge.far_end(s), m);
        assert_eq!(edge.name, "axi_s_bridge_to_apb_m");
    }

    #[test]
    fn channel_joins_every_pair() {
        let g = lower(
            r#"
[[instances]]
name = "xbar"
[[instances.bus_interfaces]]
name = "m0"
mode = "mirroredMaster"
[[instances.bus_interfaces]]
name = "s0"
mode = "mirroredSlave"
[[instances.bus_interfaces]]
name = "s1"
mode = "mirroredSlave"
[[instances.channels]]
name = "xbar_channel"
interfaces = ["m0", "s0", "s1"]
"#,
        )
        .unwrap();
        assert_eq!(g.edge_count(), 3);
        let m0 = vertex(&g, "xbar", "m0");
        assert_eq!(g.edges_of(m0).count(), 2);
        assert!(g.edges().all(|e| e.name == "xbar_channel"));
    }

    #[test]
    fn local_memory_map_on_referencing_interface() {
        let g = lower(
            r#"
[[instances]]
name = "cpu"
[[instances.address_spaces]]
name = "cpu_space"
local_memory_map = "tcm"
[[instances.bus_interfaces]]
name = "axi_m"
mode = "master"
address_space = "cpu_space"
"#,
        )
        .unwrap();
        let m = vertex(&g, "cpu", "axi_m");
        let edge = g.edges_of(m).next().unwrap();
        assert!(edge.is_self_loop());
        assert_eq!(edge.name, "cpu_space_to_local_memory_map_tcm");
        assert!(g
            .memories()
            .any(|mem| mem.kind == MemoryKind::MemoryMap && mem.name == "tcm"));
    }

    #[test]
    fn local_memory_map_without_interface_gets_synthetic_vertex() {
        let g = lower(
            r#"
[[instances]]
name = "dsp"
[[instances.address_spaces]]
name = "dsp_space"
local_memory_map = "scratch"
"#,
        )
        .unwrap();
        let v = vertex(&g, "dsp", "dsp_space interface");
        assert_eq!(g.vertex(v).mode, InterfaceMode::Undefined);
        assert_eq!(g.connected_memory(v).unwrap().kind, MemoryKind::AddressSpace);
        let edge = g.edges_of(v).next().unwrap();
        assert!(edge.is_self_loop());
        assert!(is_local_memory_map_connection(&edge.name));
    }

    #[test]
    fn top_interfaces_become_hierarchical_with_design() {
        let g = lower(
            r#"
[top]
[[top.bus_interfaces]]
name = "ext"
mode = "master"

[[instances]]
name = "cpu"
[[instances.bus_interfaces]]
name = "axi_m"
mode = "master"

[[interconnections]]
name = "cpu_out"
start = { instance = "cpu", bus = "axi_m" }
hier = ["ext"]
"#,
        )
        .unwrap();
        let ext = vertex(&g, "top", "ext");
        let m = vertex(&g, "cpu", "axi_m");
        assert!(g.vertex(ext).hierarchical);
        assert!(!g.vertex(m).hierarchical);
        assert_eq!(g.edges_of(ext).next().unwrap().far_end(ext), m);
    }

    #[test]
    fn top_without_design_is_not_hierarchical() {
        let g = lower(
            r#"
[top]
[[top.bus_interfaces]]
name = "ext"
mode = "master"
"#,
        )
        .unwrap();
        assert!(!g.vertex(vertex(&g, "top", "ext")).hierarchical);
    }

    const NESTED: &str = r#"
[[instances]]
name = "cpu"
[[instances.address_spaces]]
name = "cpu_space"
[[instances.bus_interfaces]]
name = "axi_m"
mode = "master"
address_space = "cpu_space"

[[instances]]
name = "subsys"
[[instances.bus_interfaces]]
name = "ext_s"
mode = "slave"

[[instances.design.instances]]
name = "sram"
[[instances.design.instances.memory_maps]]
name = "sram_map"
[[instances.design.instances.bus_interfaces]]
name = "s"
mode = "slave"
memory_map = "sram_map"

[[instances.design.interconnections]]
name = "ext_to_sram"
start = { instance = "sram", bus = "s" }
hier = ["ext_s"]

[[interconnections]]
name = "cpu_to_subsys"
start = { instance = "cpu", bus = "axi_m" }
active = [{ instance = "subsys", bus = "ext_s" }]
"#;

    #[test]
    fn sub_design_is_lowered_below_its_instance() {
        let g = lower(NESTED).unwrap();
        let ext = vertex(&g, "subsys", "ext_s");
        let sram = vertex(&g, "subsys/sram", "s");
        assert!(g.vertex(ext).hierarchical);
        assert!(!g.vertex(sram).hierarchical);
        assert!(!g.vertex(vertex(&g, "cpu", "axi_m")).hierarchical);
        assert_eq!(g.connected_memory(sram).unwrap().name, "sram_map");

        let inner: Vec<_> = g.edges().filter(|e| e.name == "ext_to_sram").collect();
        assert_eq!(inner.len(), 1);
        assert_eq!((inner[0].first, inner[0].second), (sram, ext));
        assert_eq!(g.instances().count(), 3);
    }

    #[test]
    fn sub_design_hier_target_must_exist() {
        let err = lower(&NESTED.replace("hier = [\"ext_s\"]", "hier = [\"ext_m\"]")).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownInterface {
                reference: "ext_m".to_string(),
                context: "interconnection 'ext_to_sram'".to_string(),
            }
        );
    }

    #[test]
    fn outer_design_cannot_reach_nested_instances() {
        let err = lower(&format!(
            "{NESTED}\n[[interconnections]]\nname = \"direct\"\nstart = {{ instance = \"cpu\", bus = \"axi_m\" }}\nactive = [{{ instance = \"sram\", bus = \"s\" }}]\n"
        ))
        .unwrap_err();
        assert!(matches!(err, GraphError::UnknownInterface { reference, .. } if reference == "sram.s"));
    }

    #[test]
    fn unknown_active_interface_errors() {
        let err = lower(
            r#"
[[instances]]
name = "cpu"
[[instances.bus_interfaces]]
name = "axi_m"
mode = "master"

[[interconnections]]
name = "cpu_to_ram"
start = { instance = "cpu", bus = "axi_m" }
active = [{ instance = "ram", bus = "axi_s" }]
"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownInterface {
                reference: "ram.axi_s".to_string(),
                context: "interconnection 'cpu_to_ram'".to_string(),
            }
        );
    }

    #[test]
    fn hier_target_without_top_errors() {
        let err = lower(
            r#"
[[instances]]
name = "cpu"
[[instances.bus_interfaces]]
name = "axi_m"
mode = "master"

[[interconnections]]
name = "out"
start = { instance = "cpu", bus = "axi_m" }
hier = ["ext"]
"#,
        )
        .unwrap_err();
        assert_eq!(err, GraphError::MissingTopComponent("out".to_string()));
    }

    #[test]
    fn unknown_memory_reference_errors() {
        let err = lower(
            r#"
[[instances]]
name = "ram"
[[instances.bus_interfaces]]
name = "axi_s"
mode = "slave"
memory_map = "missing"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, GraphError::UnknownMemoryReference { memory, .. } if memory == "missing"));
    }

    #[test]
    fn unknown_bridge_master_errors() {
        let err = lower(
            r#"
[[instances]]
name = "br"
[[instances.bus_interfaces]]
name = "s"
mode = "slave"
bridges = ["nowhere"]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, GraphError::UnknownInterface { reference, .. } if reference == "br.nowhere"));
    }

    #[test]
    fn inert_modes_ignore_memory_references() {
        let g = lower(
            r#"
[[instances]]
name = "mon"
[[instances.bus_interfaces]]
name = "probe"
mode = "monitor"
memory_map = "not_checked"
"#,
        )
        .unwrap();
        assert!(g.connected_memory(vertex(&g, "mon", "probe")).is_none());
    }
}
