//! Errors raised while constructing a topology graph.
//!
//! Construction defects are reported here, before any search runs. The path
//! search itself has no failure modes.

/// Errors produced by the [`GraphBuilder`](crate::builder::GraphBuilder) and
/// the graph factory.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GraphError {
    /// A handle names an interface that the builder never allocated.
    #[error("unknown interface handle #{0}")]
    UnknownVertex(u32),

    /// A handle names an instance that the builder never allocated.
    #[error("unknown instance handle #{0}")]
    UnknownInstance(u32),

    /// A handle names a memory item that the builder never allocated.
    #[error("unknown memory handle #{0}")]
    UnknownMemory(u32),

    /// A connection endpoint is not part of the graph.
    #[error("connection #{edge} has an endpoint outside the graph (interface #{vertex})")]
    DanglingEndpoint {
        /// Raw handle of the offending connection.
        edge: u32,
        /// Raw handle of the missing endpoint.
        vertex: u32,
    },

    /// A description refers to a bus interface that does not exist.
    #[error("{context}: unknown bus interface '{reference}'")]
    UnknownInterface {
        /// The unresolved reference (`instance.bus` or `bus`).
        reference: String,
        /// Where the reference appeared.
        context: String,
    },

    /// A bus interface refers to an address space or memory map that does not exist.
    #[error("bus interface '{interface}' references unknown memory '{memory}'")]
    UnknownMemoryReference {
        /// The referencing interface (`instance.bus`).
        interface: String,
        /// The unresolved address space or memory map name.
        memory: String,
    },

    /// A hierarchical interconnection was declared without a top component.
    #[error("interconnection '{0}' targets the top component, but none is declared")]
    MissingTopComponent(String),
}
