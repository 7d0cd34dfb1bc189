//! Master-to-memory-map path search over a [`TopologyGraph`].
//!
//! The engine enumerates every route from a bus master's address space,
//! through interconnects and transparent bridges, down to a slave's memory
//! map. It is a pure function of the graph: it performs no I/O, raises no
//! errors, and keeps all intermediate state local to the call.
//!
//! # Usage
//!
//! ```ignore
//! use memconn_search::{find_master_slave_paths, group_path_sets};
//!
//! let paths = find_master_slave_paths(&graph);
//! for path in &paths {
//!     println!("{}", path.display(&graph));
//! }
//! let sets = group_path_sets(&graph, &paths);
//! ```
//!
//! # Architecture
//!
//! - [`rules`] — the legality rule between adjacent interfaces
//! - [`search`] — seed selection, depth-first walk, filtering and dedup
//! - [`path`] — route type and its text/JSON forms
//! - [`sets`] — grouping of routes that share memory

#![warn(missing_docs)]

pub mod path;
pub mod rules;
pub mod search;
pub mod sets;

pub use memconn_graph::TopologyGraph;
pub use path::{Hop, Path, PathReport, TerminalMemory};
pub use rules::can_connect;
pub use search::{
    find_master_slave_paths, find_master_slave_paths_with, master_seeds, SearchOptions,
};
pub use sets::{group_path_sets, PathSet, PathSetReport};
