//! Shared loading and search pipeline used by the CLI commands.
//!
//! Each topology file is analyzed independently: load, lower into a graph,
//! and optionally search. Files are processed in parallel with rayon, and
//! the results come back in argument order.

use std::error::Error;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use memconn_config::ToolConfig;
use memconn_graph::TopologyGraph;
use memconn_search::{find_master_slave_paths_with, Path as Route, SearchOptions};
use rayon::prelude::*;

use crate::GlobalArgs;

/// Error type of a single file's analysis; must cross rayon worker threads.
pub type AnalysisError = Box<dyn Error + Send + Sync>;

/// One analyzed topology file.
pub struct Analysis {
    /// The topology file.
    pub file: PathBuf,
    /// The design name declared in the file, or the file stem.
    pub name: String,
    /// The lowered graph.
    pub graph: TopologyGraph,
    /// Routes found by the search; empty when the search was not requested.
    pub paths: Vec<Route>,
}

/// Loads the tool configuration named by `--config`, or `memconn.toml` from
/// the current directory when present.
pub fn load_tool_config(global: &GlobalArgs) -> Result<ToolConfig, Box<dyn Error>> {
    let config = match &global.config {
        Some(path) => memconn_config::load_config_file(Path::new(path))?,
        None => memconn_config::load_config(&std::env::current_dir()?)?,
    };
    Ok(config)
}

/// Loads a topology file and lowers it into a graph.
pub fn load_graph(file: &Path) -> Result<(String, TopologyGraph), AnalysisError> {
    let topology = memconn_config::load_topology(file)?;
    let graph = memconn_graph::build_graph(&topology)?;
    let name = if topology.name.is_empty() {
        file.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        topology.name
    };
    Ok((name, graph))
}

/// Analyzes every file in parallel. `search` is `None` for load-only runs.
pub fn analyze_files(
    files: &[PathBuf],
    search: Option<&SearchOptions>,
) -> Vec<(PathBuf, Result<Analysis, AnalysisError>)> {
    files
        .par_iter()
        .map(|file| (file.clone(), analyze_file(file, search)))
        .collect()
}

fn analyze_file(file: &Path, search: Option<&SearchOptions>) -> Result<Analysis, AnalysisError> {
    let (name, graph) = load_graph(file)?;
    let paths = match search {
        Some(options) => find_master_slave_paths_with(&graph, options),
        None => Vec::new(),
    };
    tracing::info!(
        file = %file.display(),
        interfaces = graph.vertex_count(),
        connections = graph.edge_count(),
        paths = paths.len(),
        "analyzed topology"
    );
    Ok(Analysis {
        file: file.to_path_buf(),
        name,
        graph,
        paths,
    })
}

/// Splits results into successes, printing each failure. Returns the
/// successes and whether any file failed.
pub fn partition_results(
    results: Vec<(PathBuf, Result<Analysis, AnalysisError>)>,
) -> (Vec<Analysis>, bool) {
    let mut analyses = Vec::with_capacity(results.len());
    let mut failed = false;
    for (file, result) in results {
        match result {
            Ok(analysis) => analyses.push(analysis),
            Err(e) => {
                eprintln!("error: {}: {e}", file.display());
                failed = true;
            }
        }
    }
    (analyses, failed)
}

/// Combines `--max-depth` with `[search] max_depth`; the flag wins.
pub fn search_options(flag: Option<NonZeroUsize>, config: &ToolConfig) -> SearchOptions {
    SearchOptions {
        max_depth: flag.map(NonZeroUsize::get).or(config.search.max_depth),
    }
}
