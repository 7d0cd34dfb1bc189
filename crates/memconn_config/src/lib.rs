//! Loading of `memconn.toml` tool configuration and topology description files.
//!
//! The tool configuration selects search bounds and output settings. Topology
//! descriptions declare component instances, their bus interfaces and
//! memories, and the interconnections between them; the graph factory in
//! `memconn_graph` lowers them into a topology graph.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod topology;
pub mod types;

pub use error::ConfigError;
pub use loader::{
    load_config, load_config_file, load_config_from_str, load_topology, load_topology_from_str,
    TopologyFormat, CONFIG_FILE_NAME,
};
pub use topology::*;
pub use types::*;
