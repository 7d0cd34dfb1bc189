//! `memconn check` — validate topology descriptions without searching.
//!
//! Each file is loaded and lowered into a graph; a summary of its size and
//! of the masters that would seed a search is printed.

use memconn_graph::TopologyGraph;
use memconn_search::master_seeds;
use serde::Serialize;

use crate::analysis::{analyze_files, load_tool_config, partition_results};
use crate::report::to_json;
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Size summary of one lowered topology.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CheckSummary {
    /// Topology file path.
    pub file: String,
    /// Design name.
    pub design: String,
    /// Number of component instances.
    pub instances: usize,
    /// Number of bus interfaces.
    pub interfaces: usize,
    /// Number of connections.
    pub connections: usize,
    /// Number of unbridged, memory-connected masters.
    pub masters: usize,
}

impl CheckSummary {
    fn new(file: String, design: String, graph: &TopologyGraph) -> Self {
        Self {
            file,
            design,
            instances: graph.instances().count(),
            interfaces: graph.vertex_count(),
            connections: graph.edge_count(),
            masters: master_seeds(graph).count(),
        }
    }
}

/// Runs the `memconn check` command.
///
/// Returns exit code 0 if every file loads and lowers, 1 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_tool_config(global)?;
    let format = args.format.unwrap_or_else(|| config.output.format.into());

    let (analyses, failed) = partition_results(analyze_files(&args.files, None));
    let summaries: Vec<CheckSummary> = analyses
        .iter()
        .map(|a| CheckSummary::new(a.file.display().to_string(), a.name.clone(), &a.graph))
        .collect();

    match format {
        ReportFormat::Text => {
            for s in &summaries {
                println!(
                    "{}: {} instance(s), {} interface(s), {} connection(s), {} master(s)",
                    s.file, s.instances, s.interfaces, s.connections, s.masters
                );
            }
            if !global.quiet {
                eprintln!(
                    "   Result: {} ok, {} failed",
                    summaries.len(),
                    args.files.len() - summaries.len()
                );
            }
        }
        ReportFormat::Json => println!("{}", to_json(&summaries)),
    }

    Ok(if failed { 1 } else { 0 })
}
