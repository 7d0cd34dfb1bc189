//! Configuration and topology file loading and validation.

use crate::error::ConfigError;
use crate::topology::{ComponentDecl, InstanceDecl, InterconnectionDecl, TopologyFile};
use crate::types::ToolConfig;
use std::collections::HashSet;
use std::path::Path;

/// File name of the tool configuration inside a project directory.
pub const CONFIG_FILE_NAME: &str = "memconn.toml";

/// Serialization format of a topology description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl TopologyFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(TopologyFormat::Toml),
            Some("json") => Ok(TopologyFormat::Json),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }
}

/// Loads `memconn.toml` from a directory.
///
/// A missing file is not an error: the defaults are returned instead.
pub fn load_config(dir: &Path) -> Result<ToolConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        return Ok(ToolConfig::default());
    }
    let content = read_file(&config_path)?;
    load_config_from_str(&content)
}

/// Loads a tool configuration from an explicit file path.
///
/// Unlike [`load_config`], the file must exist.
pub fn load_config_file(path: &Path) -> Result<ToolConfig, ConfigError> {
    let content = read_file(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `memconn.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<ToolConfig, ConfigError> {
    let config: ToolConfig = toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("{CONFIG_FILE_NAME}: {e}")))?;
    validate_config(&config)?;
    Ok(config)
}

/// Loads and validates a topology description, choosing the format by extension.
pub fn load_topology(path: &Path) -> Result<TopologyFile, ConfigError> {
    let format = TopologyFormat::from_path(path)?;
    let content = read_file(path)?;
    load_topology_from_str(&content, format)
        .map_err(|e| match e {
            ConfigError::ParseError(msg) => {
                ConfigError::ParseError(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
}

/// Parses and validates a topology description from a string.
pub fn load_topology_from_str(
    content: &str,
    format: TopologyFormat,
) -> Result<TopologyFile, ConfigError> {
    let topology: TopologyFile = match format {
        TopologyFormat::Toml => {
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?
        }
        TopologyFormat::Json => {
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?
        }
    };
    validate_topology(&topology)?;
    Ok(topology)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn validate_config(config: &ToolConfig) -> Result<(), ConfigError> {
    if config.search.max_depth == Some(0) {
        return Err(ConfigError::ValidationError(
            "search.max_depth must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Checks that names are non-empty and unique where the graph factory
/// resolves references by name.
fn validate_topology(topology: &TopologyFile) -> Result<(), ConfigError> {
    if topology.top.is_some() {
        if let Some(instance) = topology.instance("top") {
            return Err(ConfigError::ValidationError(format!(
                "instance name '{}' is reserved for the top component",
                instance.name
            )));
        }
    }
    if let Some(top) = &topology.top {
        if top.design.is_some() {
            return Err(ConfigError::ValidationError(
                "the top component's design is declared at the top level".to_string(),
            ));
        }
        validate_component("top", top)?;
    }
    validate_design(&topology.instances, &topology.interconnections)
}

fn validate_design(
    instances: &[InstanceDecl],
    interconnections: &[InterconnectionDecl],
) -> Result<(), ConfigError> {
    let mut instance_names = HashSet::new();
    for instance in instances {
        if instance.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "instance with an empty name".to_string(),
            ));
        }
        if !instance_names.insert(instance.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate instance '{}'",
                instance.name
            )));
        }
        validate_component(&instance.name, &instance.component)?;
    }

    for ic in interconnections {
        if ic.active.is_empty() && ic.hier.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "interconnection '{}' has no target interfaces",
                ic.name
            )));
        }
    }
    Ok(())
}

fn validate_component(owner: &str, component: &ComponentDecl) -> Result<(), ConfigError> {
    let mut bus_names = HashSet::new();
    for bus in &component.bus_interfaces {
        if bus.name.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "bus interface with an empty name in '{owner}'"
            )));
        }
        if !bus_names.insert(bus.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate bus interface '{}' in '{owner}'",
                bus.name
            )));
        }
    }
    match &component.design {
        Some(design) => validate_design(&design.instances, &design.interconnections),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutputFormat;

    #[test]
    fn parse_full_config() {
        let config = load_config_from_str(
            r#"
[search]
max_depth = 12

[output]
format = "json"
path_sets = true
"#,
        )
        .unwrap();
        assert_eq!(config.search.max_depth, Some(12));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.path_sets);
    }

    #[test]
    fn zero_depth_rejected() {
        let err = load_config_from_str("[search]\nmax_depth = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert!(config.search.max_depth.is_none());
    }

    #[test]
    fn config_file_read_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[search]\nmax_depth = 4\n").unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.search.max_depth, Some(4));
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        assert!(matches!(load_config_file(&path), Err(ConfigError::Io { .. })));
        std::fs::write(&path, "[output]\npath_sets = true\n").unwrap();
        assert!(load_config_file(&path).unwrap().output.path_sets);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            TopologyFormat::from_path(Path::new("soc.toml")).unwrap(),
            TopologyFormat::Toml
        );
        assert_eq!(
            TopologyFormat::from_path(Path::new("soc.json")).unwrap(),
            TopologyFormat::Json
        );
        assert!(matches!(
            TopologyFormat::from_path(Path::new("soc.xml")),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "xml"
        ));
        assert!(TopologyFormat::from_path(Path::new("soc")).is_err());
    }

    #[test]
    fn load_topology_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("soc.json");
        std::fs::write(
            &path,
            r#"{ "name": "soc", "instances": [ { "name": "cpu" } ] }"#,
        )
        .unwrap();
        let topo = load_topology(&path).unwrap();
        assert_eq!(topo.name, "soc");
        assert_eq!(topo.instances.len(), 1);
    }

    #[test]
    fn load_topology_missing_file() {
        let err = load_topology(Path::new("/nonexistent/soc.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn parse_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[[instances]]\nname = ").unwrap();
        match load_topology(&path).unwrap_err() {
            ConfigError::ParseError(msg) => assert!(msg.contains("broken.toml")),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_instance_rejected() {
        let err = load_topology_from_str(
            r#"
[[instances]]
name = "cpu"
[[instances]]
name = "cpu"
"#,
            TopologyFormat::Toml,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("duplicate instance")));
    }

    #[test]
    fn reserved_top_name_rejected() {
        let err = load_topology_from_str(
            r#"
[top]
[[instances]]
name = "top"
"#,
            TopologyFormat::Toml,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn duplicate_bus_interface_rejected() {
        let err = load_topology_from_str(
            r#"
[[instances]]
name = "cpu"
[[instances.bus_interfaces]]
name = "m"
mode = "master"
[[instances.bus_interfaces]]
name = "m"
mode = "slave"
"#,
            TopologyFormat::Toml,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("duplicate bus interface")));
    }

    #[test]
    fn nested_design_is_validated() {
        let err = load_topology_from_str(
            r#"
[[instances]]
name = "subsys"
[[instances.design.instances]]
name = "sram"
[[instances.design.instances]]
name = "sram"
"#,
            TopologyFormat::Toml,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg == "duplicate instance 'sram'"));
    }

    #[test]
    fn top_component_design_rejected() {
        let err = load_topology_from_str(
            r#"
[top]
[[top.design.instances]]
name = "cpu"
"#,
            TopologyFormat::Toml,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn nested_instance_may_reuse_outer_name() {
        let topology = load_topology_from_str(
            r#"
[[instances]]
name = "ram"
[[instances.design.instances]]
name = "ram"
"#,
            TopologyFormat::Toml,
        )
        .unwrap();
        assert!(topology.instances[0].component.design.is_some());
    }

    #[test]
    fn interconnection_without_targets_rejected() {
        let err = load_topology_from_str(
            r#"
[[interconnections]]
name = "dangling"
start = { instance = "cpu", bus = "m" }
"#,
            TopologyFormat::Toml,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
