//! Shared foundational types used across the memconn workspace.
//!
//! This crate provides the closed set of bus interface modes and the naming
//! conventions that connect the graph factory with the path search engine.

#![warn(missing_docs)]

pub mod mode;
pub mod naming;

pub use mode::{InterfaceMode, ParseModeError};
pub use naming::{
    bridge_connection_name, is_local_memory_map_connection, local_interface_name,
    local_memory_map_connection_name, LOCAL_MEMORY_MAP_MARKER,
};
