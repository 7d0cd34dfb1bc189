//! Routes found by the search and their display forms.

use memconn_common::InterfaceMode;
use memconn_graph::{MemoryKind, TopologyGraph, VertexId};
use serde::{Deserialize, Serialize};

/// An ordered sequence of interface handles from a master to a memory map.
///
/// A path never repeats a vertex, except the two-element local memory map
/// path `[v, v]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<VertexId>);

impl Path {
    /// Creates a path from its vertices in route order.
    pub fn new(vertices: Vec<VertexId>) -> Self {
        Self(vertices)
    }

    /// Creates the local memory map path `[vertex, vertex]`.
    pub fn local_memory_map(vertex: VertexId) -> Self {
        Self(vec![vertex, vertex])
    }

    /// Returns the vertices in route order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.0
    }

    /// Returns the starting vertex.
    pub fn first(&self) -> Option<VertexId> {
        self.0.first().copied()
    }

    /// Returns the terminal vertex.
    pub fn last(&self) -> Option<VertexId> {
        self.0.last().copied()
    }

    /// Returns the number of vertices.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the path has no vertices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` for the two-element path `[v, v]`.
    pub fn is_local_memory_map(&self) -> bool {
        matches!(self.0.as_slice(), [a, b] if a == b)
    }

    /// Returns `true` if this path's vertices are the trailing vertices of
    /// `other`.
    pub fn is_suffix_of(&self, other: &Path) -> bool {
        other.0.ends_with(&self.0)
    }

    /// Renders the path as `instance.interface -> instance.interface ...`.
    pub fn display(&self, graph: &TopologyGraph) -> String {
        self.0
            .iter()
            .map(|&v| graph.qualified_name(v))
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Builds the serializable report of this path.
    pub fn report(&self, graph: &TopologyGraph) -> PathReport {
        let hops = self
            .0
            .iter()
            .map(|&v| {
                let vertex = graph.vertex(v);
                Hop {
                    instance: graph.instance(vertex.instance).name.clone(),
                    interface: vertex.name.clone(),
                    mode: vertex.mode,
                }
            })
            .collect();
        let memory = self
            .last()
            .and_then(|v| graph.connected_memory(v))
            .map(|m| TerminalMemory {
                name: m.name.clone(),
                kind: m.kind,
                instance: graph.instance(m.instance).name.clone(),
            });
        PathReport {
            hops,
            memory,
            local: self.is_local_memory_map(),
        }
    }
}

/// A path resolved to names, suitable for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathReport {
    /// The interfaces on the route.
    pub hops: Vec<Hop>,
    /// The memory connected to the terminal interface.
    pub memory: Option<TerminalMemory>,
    /// Set for an address space's local memory map.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub local: bool,
}

/// One interface on a reported path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hop {
    /// Owning instance name.
    pub instance: String,
    /// Bus interface name.
    pub interface: String,
    /// Bus interface mode.
    pub mode: InterfaceMode,
}

/// The memory item a reported path ends in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalMemory {
    /// Memory name.
    pub name: String,
    /// Memory kind.
    pub kind: MemoryKind,
    /// Owning instance name.
    pub instance: String,
}
