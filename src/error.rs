//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Problems with the plugin configuration. All of them abort the run.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Cannot read configuration {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid YAML or has the wrong shape.
    #[error("Invalid configuration at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A graph has no `graph_title`.
    #[error("Graph '{graph}' has no graph_title")]
    MissingTitle { graph: String },
}
