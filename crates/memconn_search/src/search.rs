//! Depth-first enumeration of master-to-memory-map routes.
//!
//! The search runs in four steps:
//!
//! 1. seed every unbridged, memory-connected master interface
//! 2. walk simple paths from each seed, stepping only where [`can_connect`]
//!    allows, and record every route that cannot be extended
//! 3. add each local memory map self-loop as a `[v, v]` path
//! 4. drop routes that do not end at a memory map, then drop every route that
//!    is a trailing suffix of another route to the same terminal
//!
//! The accumulator lives in the call, so searches over one graph never share
//! state and may run on several threads at once.

use memconn_common::{is_local_memory_map_connection, InterfaceMode};
use memconn_graph::{ConnectionEdge, EdgeId, MemoryKind, TopologyGraph, VertexId};

use crate::path::Path;
use crate::rules::can_connect;

/// Tuning knobs for a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of vertices on a route. A route reaching the bound is
    /// treated as a dead end. `None` leaves the walk unbounded.
    pub max_depth: Option<usize>,
}

impl SearchOptions {
    /// Returns options bounding routes to `max_depth` vertices.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }
}

/// Finds every route from a master interface to a reachable memory map.
///
/// The result is deterministic: routes appear in seed order, then in the
/// order of each vertex's incident edges, followed by local memory map paths
/// in edge order. An empty result is not an error.
pub fn find_master_slave_paths(graph: &TopologyGraph) -> Vec<Path> {
    find_master_slave_paths_with(graph, &SearchOptions::default())
}

/// Like [`find_master_slave_paths`], with explicit [`SearchOptions`].
pub fn find_master_slave_paths_with(graph: &TopologyGraph, options: &SearchOptions) -> Vec<Path> {
    let mut found = Vec::new();

    for seed in master_seeds(graph) {
        tracing::debug!(seed = %graph.qualified_name(seed), "searching from master");
        let mut walker = Walker {
            graph,
            max_depth: options.max_depth,
            path: Vec::new(),
            on_path: vec![false; graph.vertex_count()],
            found: &mut found,
        };
        walker.walk(seed);
    }

    for edge in graph.edges() {
        if edge.is_self_loop() && is_local_memory_map_connection(&edge.name) {
            tracing::trace!(connection = %edge.name, "local memory map");
            found.push(Path::local_memory_map(edge.first));
        }
    }

    let candidates = found.len();
    let terminated: Vec<Path> = found
        .into_iter()
        .filter(|p| p.is_local_memory_map() || ends_at_memory_map(graph, p))
        .collect();
    let paths = remove_suffix_paths(terminated);

    tracing::debug!(candidates, paths = paths.len(), "path search finished");
    paths
}

/// Unbridged master interfaces with a connected memory, in vertex order.
///
/// Bridged masters are reached through their paired slave instead.
pub fn master_seeds(graph: &TopologyGraph) -> impl Iterator<Item = VertexId> + '_ {
    graph
        .vertices()
        .filter(|v| v.mode == InterfaceMode::Master && v.memory.is_some() && !v.bridged)
        .map(|v| v.id)
}

fn ends_at_memory_map(graph: &TopologyGraph, path: &Path) -> bool {
    path.last()
        .and_then(|v| graph.connected_memory(v))
        .is_some_and(|m| m.kind == MemoryKind::MemoryMap)
}

/// Removes every path that is a trailing suffix of another path.
///
/// Candidates are marked first and filtered afterwards, so no comparison is
/// skipped. Of two identical paths the earlier one is kept.
fn remove_suffix_paths(paths: Vec<Path>) -> Vec<Path> {
    let mut redundant = vec![false; paths.len()];
    for (i, shorter) in paths.iter().enumerate() {
        redundant[i] = paths.iter().enumerate().any(|(j, longer)| {
            j != i
                && shorter.last() == longer.last()
                && shorter.is_suffix_of(longer)
                && (shorter.len() < longer.len() || j < i)
        });
    }

    paths
        .into_iter()
        .zip(redundant)
        .filter_map(|(path, redundant)| (!redundant).then_some(path))
        .collect()
}

/// Walk state for one seed.
struct Walker<'g, 'f> {
    graph: &'g TopologyGraph,
    max_depth: Option<usize>,
    path: Vec<VertexId>,
    on_path: Vec<bool>,
    found: &'f mut Vec<Path>,
}

/// A vertex on the current route and its incident edges still to try.
struct Frame<I> {
    vertex: VertexId,
    arrived_by: Option<EdgeId>,
    edges: I,
    open: bool,
    extended: bool,
}

impl<'g> Walker<'g, '_> {
    /// Records every route from `seed` that cannot be extended.
    ///
    /// The walk keeps its own frame stack, so route length is not limited by
    /// the thread's call stack.
    fn walk(&mut self, seed: VertexId) {
        let graph = self.graph;
        let mut stack = vec![self.enter(seed, None)];

        while let Some(frame) = stack.last_mut() {
            let vertex = frame.vertex;
            let arrived_by = frame.arrived_by;
            let current = graph.vertex(vertex);
            let on_path = &self.on_path;
            let step = if frame.open {
                frame
                    .edges
                    .by_ref()
                    .filter(|e| Some(e.id) != arrived_by)
                    .map(|e| (e.id, e.far_end(vertex)))
                    .find(|&(_, next)| {
                        !on_path[next.as_raw() as usize]
                            && can_connect(current, graph.vertex(next))
                    })
            } else {
                None
            };

            match step {
                Some((edge, next)) => {
                    frame.extended = true;
                    let child = self.enter(next, Some(edge));
                    stack.push(child);
                }
                None => {
                    let dead_end = frame.open && !frame.extended;
                    stack.pop();
                    if dead_end && self.path.len() > 1 {
                        self.record();
                    }
                    self.leave();
                }
            }
        }
    }

    /// Puts `vertex` on the route. A vertex with no edge to leave by, or one
    /// at the depth bound, is recorded here and never expanded.
    fn enter(
        &mut self,
        vertex: VertexId,
        arrived_by: Option<EdgeId>,
    ) -> Frame<impl Iterator<Item = &'g ConnectionEdge>> {
        self.path.push(vertex);
        self.on_path[vertex.as_raw() as usize] = true;

        let graph = self.graph;
        let mut open = true;
        if !graph.edges_of(vertex).any(|e| Some(e.id) != arrived_by) {
            self.record();
            open = false;
        } else if self.max_depth.is_some_and(|max| self.path.len() >= max) {
            if self.path.len() > 1 {
                self.record();
            }
            open = false;
        }

        Frame {
            vertex,
            arrived_by,
            edges: graph.edges_of(vertex),
            open,
            extended: false,
        }
    }

    fn leave(&mut self) {
        if let Some(vertex) = self.path.pop() {
            self.on_path[vertex.as_raw() as usize] = false;
        }
    }

    fn record(&mut self) {
        let path = Path::new(self.path.clone());
        tracing::trace!(path = %path.display(self.graph), "route recorded");
        self.found.push(path);
    }
}
