//! Topology graph data model for connectivity path search.
//!
//! A [`TopologyGraph`] holds the bus interfaces of a design as vertices and
//! their connections as undirected edges, together with the component
//! instances and memory items the interfaces belong to. All entities live in
//! arenas and are referred to by copyable handles ([`VertexId`], [`EdgeId`],
//! [`InstanceId`], [`MemoryId`]).
//!
//! # Architecture
//!
//! - [`arena`] — append-only, handle-indexed storage
//! - [`ids`] — handle newtypes
//! - [`graph`] — the immutable graph and its element types
//! - [`builder`] — incremental construction with handle validation
//! - [`factory`] — lowering of a topology description into a graph
//! - [`error`] — construction errors

#![warn(missing_docs)]

pub mod arena;
pub mod builder;
pub mod error;
pub mod factory;
pub mod graph;
pub mod ids;

pub use builder::GraphBuilder;
pub use error::GraphError;
pub use factory::{build_graph, HIERARCHY_SEPARATOR, TOP_INSTANCE_NAME};
pub use graph::{
    ComponentInstance, ConnectionEdge, InterfaceVertex, MemoryItem, MemoryKind, TopologyGraph,
};
pub use ids::{EdgeId, InstanceId, MemoryId, VertexId};
