//! Tool configuration types deserialized from `memconn.toml`.

use serde::Deserialize;

/// The top-level tool configuration parsed from `memconn.toml`.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ToolConfig {
    /// Path search settings.
    #[serde(default)]
    pub search: SearchConfig,
    /// Output settings for the command-line tool.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Path search settings.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of interfaces in a single path. Unbounded when absent.
    pub max_depth: Option<usize>,
}

/// Output settings for the command-line tool.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Output format for paths and path sets.
    #[serde(default)]
    pub format: OutputFormat,
    /// Whether `memconn paths` also prints path sets.
    #[serde(default)]
    pub path_sets: bool,
}

/// Output format for search results.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text, one path per line (default).
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}
