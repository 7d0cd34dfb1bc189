//! Conformance test helpers for the memconn analyzer.
//!
//! Provides shared pipeline functions that take a topology description
//! through the full pipeline (load → lower → search) and return structured
//! results for assertion in integration tests, plus small builders for the
//! reference topologies the search is checked against.

#![warn(missing_docs)]

use memconn_common::InterfaceMode;
use memconn_config::{load_topology_from_str, TopologyFormat};
use memconn_graph::{GraphBuilder, InstanceId, MemoryKind, TopologyGraph, VertexId};
use memconn_search::{find_master_slave_paths_with, group_path_sets, Path, SearchOptions};

/// Result of running the full load → lower → search pipeline.
pub struct PipelineResult {
    /// The lowered topology graph.
    pub graph: TopologyGraph,
    /// Routes found by the search.
    pub paths: Vec<Path>,
}

impl PipelineResult {
    /// Returns each route rendered as `instance.interface -> ...`.
    pub fn routes(&self) -> Vec<String> {
        route_names(&self.graph, &self.paths)
    }

    /// Returns the routes of each path set, rendered as text.
    pub fn sets(&self) -> Vec<Vec<String>> {
        group_path_sets(&self.graph, &self.paths)
            .iter()
            .map(|set| route_names(&self.graph, &set.paths))
            .collect()
    }

    /// Returns the handle of `instance.interface`.
    ///
    /// Panics if the interface does not exist.
    pub fn vertex(&self, instance: &str, interface: &str) -> VertexId {
        self.graph
            .find_interface(instance, interface)
            .unwrap_or_else(|| panic!("no interface {instance}.{interface}"))
    }
}

/// Runs the full pipeline on a TOML topology description.
///
/// Panics if the description does not load or lower.
pub fn full_pipeline_toml(source: &str) -> PipelineResult {
    full_pipeline(source, TopologyFormat::Toml, &SearchOptions::default())
}

/// Runs the full pipeline on a JSON topology description.
pub fn full_pipeline_json(source: &str) -> PipelineResult {
    full_pipeline(source, TopologyFormat::Json, &SearchOptions::default())
}

/// Runs the full pipeline with explicit search options.
pub fn full_pipeline(
    source: &str,
    format: TopologyFormat,
    options: &SearchOptions,
) -> PipelineResult {
    let topology = load_topology_from_str(source, format).expect("topology should load");
    let graph = memconn_graph::build_graph(&topology).expect("topology should lower");
    let paths = find_master_slave_paths_with(&graph, options);
    PipelineResult { graph, paths }
}

/// Renders each path as `instance.interface -> ...`.
pub fn route_names(graph: &TopologyGraph, paths: &[Path]) -> Vec<String> {
    paths.iter().map(|p| p.display(graph)).collect()
}

/// Incremental builder of small reference topologies.
///
/// Every instance gets a distinct name, every master its own address space,
/// and every slave its own memory map.
#[derive(Default)]
pub struct TopologyFixture {
    builder: GraphBuilder,
}

impl TopologyFixture {
    /// Creates an empty fixture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component instance.
    pub fn instance(&mut self, name: &str) -> InstanceId {
        self.builder.add_instance(name, "")
    }

    /// Adds a master interface connected to a fresh address space.
    pub fn master(&mut self, instance: InstanceId, name: &str) -> VertexId {
        let space = self.builder.add_memory(
            format!("{name}_space"),
            MemoryKind::AddressSpace,
            instance,
        );
        let vertex = self
            .builder
            .add_interface(name, InterfaceMode::Master, instance);
        self.connect_memory(vertex, space);
        vertex
    }

    /// Adds a slave interface connected to a fresh memory map.
    pub fn slave(&mut self, instance: InstanceId, name: &str) -> VertexId {
        let map = self
            .builder
            .add_memory(format!("{name}_map"), MemoryKind::MemoryMap, instance);
        let vertex = self
            .builder
            .add_interface(name, InterfaceMode::Slave, instance);
        self.connect_memory(vertex, map);
        vertex
    }

    /// Adds an interface without memory.
    pub fn interface(&mut self, instance: InstanceId, name: &str, mode: InterfaceMode) -> VertexId {
        self.builder.add_interface(name, mode, instance)
    }

    /// Marks `slave` and `master` as a transparent bridge pair and joins them.
    pub fn bridge(&mut self, slave: VertexId, master: VertexId) {
        for v in [slave, master] {
            self.builder
                .set_bridged(v)
                .expect("bridge ends belong to this fixture");
        }
        self.builder.add_connection("bridge", slave, master);
    }

    /// Marks an interface as a hierarchy boundary.
    pub fn hierarchical(&mut self, vertex: VertexId) {
        self.builder
            .set_hierarchical(vertex)
            .expect("vertex belongs to this fixture");
    }

    /// Joins two interfaces by a named connection.
    pub fn connect(&mut self, name: &str, first: VertexId, second: VertexId) {
        self.builder.add_connection(name, first, second);
    }

    /// Freezes the fixture into a graph.
    pub fn build(self) -> TopologyGraph {
        self.builder.build().expect("fixture handles are valid")
    }

    fn connect_memory(&mut self, vertex: VertexId, memory: memconn_graph::MemoryId) {
        self.builder
            .set_memory(vertex, memory)
            .expect("memory belongs to this fixture");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_on_empty_description() {
        let result = full_pipeline_toml("");
        assert_eq!(result.graph.vertex_count(), 0);
        assert!(result.paths.is_empty());
        assert!(result.sets().is_empty());
    }

    #[test]
    fn fixture_attaches_memories() {
        let mut f = TopologyFixture::new();
        let cpu = f.instance("cpu");
        let ram = f.instance("ram");
        let m = f.master(cpu, "m");
        let s = f.slave(ram, "s");
        f.connect("link", m, s);
        let g = f.build();
        assert_eq!(g.connected_memory(m).unwrap().name, "m_space");
        assert_eq!(g.connected_memory(s).unwrap().kind, MemoryKind::MemoryMap);
        assert_eq!(route_names(&g, &[Path::new(vec![m, s])]), ["cpu.m -> ram.s"]);
    }
}
