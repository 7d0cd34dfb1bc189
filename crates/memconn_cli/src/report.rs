//! Text and JSON rendering of analysis results.

use memconn_search::{group_path_sets, Path as Route, PathReport, PathSetReport};
use serde::Serialize;

use crate::analysis::Analysis;

/// JSON document for one analyzed file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Topology file path.
    pub file: String,
    /// Design name.
    pub design: String,
    /// Routes found.
    pub paths: Vec<PathReport>,
    /// Routes grouped by shared memory, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<Vec<PathSetReport>>,
}

impl FileReport {
    /// Builds the report of `analysis`, grouping routes when `with_sets`.
    pub fn new(analysis: &Analysis, with_sets: bool) -> Self {
        let graph = &analysis.graph;
        let sets = with_sets.then(|| {
            group_path_sets(graph, &analysis.paths)
                .iter()
                .map(|set| set.report(graph))
                .collect()
        });
        Self {
            file: analysis.file.display().to_string(),
            design: analysis.name.clone(),
            paths: analysis.paths.iter().map(|p| p.report(graph)).collect(),
            sets,
        }
    }
}

/// Renders one route as text, followed by its terminal memory.
pub fn route_line(analysis: &Analysis, route: &Route) -> String {
    let graph = &analysis.graph;
    let memory = route.last().and_then(|v| graph.connected_memory(v));
    match memory {
        Some(m) if route.is_local_memory_map() => {
            format!("{}  [local memory map of {}]", route.display(graph), m.name)
        }
        Some(m) => format!("{}  [{}]", route.display(graph), m.name),
        None => route.display(graph),
    }
}

/// Renders the routes of `analysis` as text lines, grouped when `with_sets`.
pub fn text_lines(analysis: &Analysis, with_sets: bool) -> Vec<String> {
    if !with_sets {
        return analysis
            .paths
            .iter()
            .map(|p| format!("  {}", route_line(analysis, p)))
            .collect();
    }

    let mut lines = Vec::new();
    for (i, set) in group_path_sets(&analysis.graph, &analysis.paths)
        .iter()
        .enumerate()
    {
        lines.push(format!("  set {}:", i + 1));
        for path in &set.paths {
            lines.push(format!("    {}", route_line(analysis, path)));
        }
    }
    lines
}

/// Serializes `value` as pretty JSON, falling back to an empty array.
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "[]".to_string())
}
