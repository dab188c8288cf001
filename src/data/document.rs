//! YAML plugin configuration.
//!
//! The document is a list of endpoints, either at the top level or under an
//! `endpoints` key:
//!
//! ```yaml
//! - url: http://localhost:8080/jolokia
//!   user: monitor
//!   password: secret
//!   graphs:
//!     wildfly_threads:
//!       graph_title: WildFly threads
//!       graph_category: appserver
//!       metrics:
//!         count:
//!           label: Live threads
//!           resource: java.lang:type=Threading
//!           attribute: ThreadCount
//! ```

use std::fs;
use std::path::Path;

use munin_jmx_types::Endpoint;
use serde::Deserialize;

use crate::error::ConfigError;

/// The parsed plugin configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginDocument {
    /// Endpoints in file order.
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Deserialize)]
struct Wrapped {
    #[serde(default)]
    endpoints: Vec<Endpoint>,
}

impl PluginDocument {
    /// Loads the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content)
    }

    /// Parses the configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // Peek at the shape first, then decode typed so errors keep their line.
        let shape: serde_yaml::Value = serde_yaml::from_str(yaml).map_err(parse_error)?;

        let endpoints = match shape {
            serde_yaml::Value::Null => Vec::new(),
            serde_yaml::Value::Sequence(_) => serde_yaml::from_str(yaml).map_err(parse_error)?,
            serde_yaml::Value::Mapping(_) => {
                let wrapped: Wrapped = serde_yaml::from_str(yaml).map_err(parse_error)?;
                wrapped.endpoints
            }
            _ => {
                return Err(ConfigError::Parse {
                    line: 1,
                    message: "expected a list of endpoints".to_string(),
                })
            }
        };

        Ok(Self { endpoints })
    }

    /// Number of graphs across all endpoints.
    pub fn graph_count(&self) -> usize {
        self.endpoints.iter().map(|e| e.graphs.len()).sum()
    }
}

fn parse_error(e: serde_yaml::Error) -> ConfigError {
    let line = e.location().map(|l| l.line()).unwrap_or(0);
    ConfigError::Parse {
        line,
        message: e.to_string(),
    }
}
