//! Incremental construction of a [`TopologyGraph`].
//!
//! The builder hands out handles as items are added and defers reference
//! checks to [`GraphBuilder::build`], which rejects any handle the builder did
//! not mint. A built graph is therefore closed: every edge endpoint, owning
//! instance, and connected memory resolves inside it.

use crate::arena::Arena;
use crate::error::GraphError;
use crate::graph::{
    ComponentInstance, ConnectionEdge, InterfaceVertex, MemoryItem, MemoryKind, TopologyGraph,
};
use crate::ids::{EdgeId, InstanceId, MemoryId, VertexId};
use memconn_common::InterfaceMode;

/// Accumulates instances, memories, interfaces, and connections.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    instances: Arena<InstanceId, ComponentInstance>,
    memories: Arena<MemoryId, MemoryItem>,
    vertices: Arena<VertexId, InterfaceVertex>,
    edges: Arena<EdgeId, ConnectionEdge>,
}

impl GraphBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component instance.
    pub fn add_instance(&mut self, name: impl Into<String>, vlnv: impl Into<String>) -> InstanceId {
        let id = self.instances.next_id();
        self.instances.alloc(ComponentInstance {
            id,
            name: name.into(),
            vlnv: vlnv.into(),
        })
    }

    /// Adds a memory item owned by `instance`.
    pub fn add_memory(
        &mut self,
        name: impl Into<String>,
        kind: MemoryKind,
        instance: InstanceId,
    ) -> MemoryId {
        let id = self.memories.next_id();
        self.memories.alloc(MemoryItem {
            id,
            name: name.into(),
            kind,
            instance,
        })
    }

    /// Adds an unbridged, non-hierarchical interface without connected memory.
    pub fn add_interface(
        &mut self,
        name: impl Into<String>,
        mode: InterfaceMode,
        instance: InstanceId,
    ) -> VertexId {
        let id = self.vertices.next_id();
        self.vertices.alloc(InterfaceVertex {
            id,
            name: name.into(),
            mode,
            instance,
            bridged: false,
            hierarchical: false,
            memory: None,
        })
    }

    /// Adds a connection between two interfaces. `first == second` adds a self-loop.
    pub fn add_connection(
        &mut self,
        name: impl Into<String>,
        first: VertexId,
        second: VertexId,
    ) -> EdgeId {
        let id = self.edges.next_id();
        self.edges.alloc(ConnectionEdge {
            id,
            name: name.into(),
            first,
            second,
        })
    }

    /// Marks an interface as linked by a transparent bridge.
    pub fn set_bridged(&mut self, vertex: VertexId) -> Result<(), GraphError> {
        self.vertex_mut(vertex)?.bridged = true;
        Ok(())
    }

    /// Marks an interface as a hierarchy boundary.
    pub fn set_hierarchical(&mut self, vertex: VertexId) -> Result<(), GraphError> {
        self.vertex_mut(vertex)?.hierarchical = true;
        Ok(())
    }

    /// Connects an interface to a memory item.
    pub fn set_memory(&mut self, vertex: VertexId, memory: MemoryId) -> Result<(), GraphError> {
        if !self.memories.contains(memory) {
            return Err(GraphError::UnknownMemory(memory.as_raw()));
        }
        self.vertex_mut(vertex)?.memory = Some(memory);
        Ok(())
    }

    fn vertex_mut(&mut self, vertex: VertexId) -> Result<&mut InterfaceVertex, GraphError> {
        self.vertices
            .try_get_mut(vertex)
            .ok_or(GraphError::UnknownVertex(vertex.as_raw()))
    }

    /// Validates every stored handle and freezes the graph.
    pub fn build(self) -> Result<TopologyGraph, GraphError> {
        for memory in self.memories.values() {
            if !self.instances.contains(memory.instance) {
                return Err(GraphError::UnknownInstance(memory.instance.as_raw()));
            }
        }
        for vertex in self.vertices.values() {
            if !self.instances.contains(vertex.instance) {
                return Err(GraphError::UnknownInstance(vertex.instance.as_raw()));
            }
        }

        let mut incidence = vec![Vec::new(); self.vertices.len()];
        for edge in self.edges.values() {
            for endpoint in [edge.first, edge.second] {
                if !self.vertices.contains(endpoint) {
                    return Err(GraphError::DanglingEndpoint {
                        edge: edge.id.as_raw(),
                        vertex: endpoint.as_raw(),
                    });
                }
            }
            incidence[edge.first.as_raw() as usize].push(edge.id);
            if !edge.is_self_loop() {
                incidence[edge.second.as_raw() as usize].push(edge.id);
            }
        }

        tracing::debug!(
            instances = self.instances.len(),
            interfaces = self.vertices.len(),
            connections = self.edges.len(),
            "topology graph built"
        );

        Ok(TopologyGraph {
            instances: self.instances,
            memories: self.memories,
            vertices: self.vertices,
            edges: self.edges,
            incidence,
        })
    }
}
