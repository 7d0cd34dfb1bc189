//! The immutable topology graph of bus interfaces and their connections.
//!
//! A [`TopologyGraph`] owns every interface vertex, connection edge,
//! component instance, and memory item of one analysis run. It is produced by
//! [`GraphBuilder::build`](crate::builder::GraphBuilder::build), which
//! guarantees that every handle stored inside the graph resolves, and it
//! exposes read accessors only. The graph is `Send + Sync`, so independent
//! searches may share it across threads.

use crate::arena::Arena;
use crate::ids::{EdgeId, InstanceId, MemoryId, VertexId};
use memconn_common::InterfaceMode;
use serde::{Deserialize, Serialize};

/// A topology graph of bus interfaces connected through components, bridges,
/// and interconnects.
#[derive(Debug, Clone)]
pub struct TopologyGraph {
    pub(crate) instances: Arena<InstanceId, ComponentInstance>,
    pub(crate) memories: Arena<MemoryId, MemoryItem>,
    pub(crate) vertices: Arena<VertexId, InterfaceVertex>,
    pub(crate) edges: Arena<EdgeId, ConnectionEdge>,
    /// Edges incident to each vertex, indexed by raw vertex handle, in
    /// insertion order. A self-loop appears once.
    pub(crate) incidence: Vec<Vec<EdgeId>>,
}

impl TopologyGraph {
    /// Iterates over all interface vertices in allocation order.
    pub fn vertices(&self) -> impl Iterator<Item = &InterfaceVertex> {
        self.vertices.values()
    }

    /// Iterates over all connection edges in allocation order.
    pub fn edges(&self) -> impl Iterator<Item = &ConnectionEdge> {
        self.edges.values()
    }

    /// Iterates over the edges whose `first` or `second` endpoint is `vertex`.
    ///
    /// The order is stable: edges are reported in the order they were added.
    pub fn edges_of(&self, vertex: VertexId) -> impl Iterator<Item = &ConnectionEdge> {
        self.incidence[vertex.as_raw() as usize]
            .iter()
            .map(move |&e| &self.edges[e])
    }

    /// Iterates over all component instances.
    pub fn instances(&self) -> impl Iterator<Item = &ComponentInstance> {
        self.instances.values()
    }

    /// Iterates over all memory items.
    pub fn memories(&self) -> impl Iterator<Item = &MemoryItem> {
        self.memories.values()
    }

    /// Returns the vertex with the given handle.
    pub fn vertex(&self, id: VertexId) -> &InterfaceVertex {
        &self.vertices[id]
    }

    /// Returns the instance with the given handle.
    pub fn instance(&self, id: InstanceId) -> &ComponentInstance {
        &self.instances[id]
    }

    /// Returns the memory item with the given handle.
    pub fn memory(&self, id: MemoryId) -> &MemoryItem {
        &self.memories[id]
    }

    /// Returns the memory item connected to `vertex`, if any.
    pub fn connected_memory(&self, vertex: VertexId) -> Option<&MemoryItem> {
        self.vertex(vertex).memory.map(|m| self.memory(m))
    }

    /// Returns the number of interface vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of connection edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Finds the interface named `interface` on the instance named `instance`.
    pub fn find_interface(&self, instance: &str, interface: &str) -> Option<VertexId> {
        self.vertices()
            .find(|v| v.name == interface && self.instance(v.instance).name == instance)
            .map(|v| v.id)
    }

    /// Returns `instance.interface` for display.
    pub fn qualified_name(&self, vertex: VertexId) -> String {
        let v = self.vertex(vertex);
        format!("{}.{}", self.instance(v.instance).name, v.name)
    }
}

/// One bus interface's role within the topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceVertex {
    /// The handle of this vertex.
    pub id: VertexId,
    /// Bus interface name.
    pub name: String,
    /// Bus interface mode.
    pub mode: InterfaceMode,
    /// The component instance owning this interface.
    pub instance: InstanceId,
    /// Linked to another interface of the same instance by a transparent bridge.
    pub bridged: bool,
    /// Pass-through boundary to the containing design.
    pub hierarchical: bool,
    /// The address space or memory map reachable through this interface.
    pub memory: Option<MemoryId>,
}

/// An undirected link between two interface vertices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEdge {
    /// The handle of this edge.
    pub id: EdgeId,
    /// Connection name.
    pub name: String,
    /// First endpoint.
    pub first: VertexId,
    /// Second endpoint; equal to `first` for a self-loop.
    pub second: VertexId,
}

impl ConnectionEdge {
    /// Returns `true` if both endpoints are the same vertex.
    pub fn is_self_loop(&self) -> bool {
        self.first == self.second
    }

    /// Returns `true` if `vertex` is one of the endpoints.
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.first == vertex || self.second == vertex
    }

    /// Returns the endpoint opposite to `vertex`.
    ///
    /// For a self-loop this is `vertex` itself.
    pub fn far_end(&self, vertex: VertexId) -> VertexId {
        if self.first == vertex {
            self.second
        } else {
            self.first
        }
    }
}

/// A component instance owning interfaces and memories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInstance {
    /// The handle of this instance.
    pub id: InstanceId,
    /// Instance name.
    pub name: String,
    /// Vendor/library/name/version of the instantiated component.
    pub vlnv: String,
}

/// An addressable memory region owned by a component instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryItem {
    /// The handle of this memory item.
    pub id: MemoryId,
    /// Address space or memory map name.
    pub name: String,
    /// What kind of memory this is.
    pub kind: MemoryKind,
    /// The instance owning this memory.
    pub instance: InstanceId,
}

/// The kind tag of a memory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemoryKind {
    /// A master's address space.
    AddressSpace,
    /// A slave's memory map; the only kind that terminates a path.
    MemoryMap,
}
