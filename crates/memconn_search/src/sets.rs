//! Grouping of routes that share memory into path sets.
//!
//! Two routes belong to the same set when a memory-connected interface on one
//! reaches a memory item that some interface on the other is also connected
//! to. Membership is transitive: a route touching two existing sets merges
//! them.

use std::collections::HashSet;

use memconn_graph::{MemoryId, TopologyGraph};
use serde::Serialize;

use crate::path::{Path, PathReport};

/// Routes sharing address spaces or memory maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSet {
    /// Member routes in search order.
    pub paths: Vec<Path>,
}

impl PathSet {
    /// Builds the serializable report of this set.
    pub fn report(&self, graph: &TopologyGraph) -> PathSetReport {
        PathSetReport {
            paths: self.paths.iter().map(|p| p.report(graph)).collect(),
        }
    }
}

/// A path set resolved to names, suitable for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct PathSetReport {
    /// Member routes.
    pub paths: Vec<PathReport>,
}

/// Partitions `paths` into sets of routes sharing memory.
///
/// Routes keep their input order inside a set, and sets are ordered by their
/// first route.
pub fn group_path_sets(graph: &TopologyGraph, paths: &[Path]) -> Vec<PathSet> {
    let memories: Vec<HashSet<MemoryId>> = paths
        .iter()
        .map(|p| {
            p.vertices()
                .iter()
                .filter_map(|&v| graph.vertex(v).memory)
                .collect()
        })
        .collect();

    // Each group holds indices into `paths`, kept sorted.
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (index, touched) in memories.iter().enumerate() {
        let matching: Vec<usize> = groups
            .iter()
            .enumerate()
            .filter(|(_, group)| group.iter().any(|&m| !touched.is_disjoint(&memories[m])))
            .map(|(g, _)| g)
            .collect();

        match matching.split_first() {
            None => groups.push(vec![index]),
            Some((&first, rest)) => {
                for &g in rest.iter().rev() {
                    let merged = groups.remove(g);
                    groups[first].extend(merged);
                }
                groups[first].push(index);
                groups[first].sort_unstable();
            }
        }
    }

    tracing::debug!(paths = paths.len(), sets = groups.len(), "grouped path sets");

    groups
        .into_iter()
        .map(|group| PathSet {
            paths: group.into_iter().map(|i| paths[i].clone()).collect(),
        })
        .collect()
}
