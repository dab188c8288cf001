//! File-based metric source.
//!
//! Serves attribute values from a JSON fixture instead of a live agent.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use munin_jmx_adapters::AdapterError;
use munin_jmx_types::{Endpoint, FetchedValue};

use super::MetricSource;
use crate::data::ValueStore;

/// A metric source that reads attribute values from a JSON file.
///
/// The file maps MBean names to attribute values, in the same shape the
/// values are cached in during a run:
///
/// ```json
/// {
///   "java.lang:type=Memory": {
///     "HeapMemoryUsage": {"used": 1024, "max": 4096}
///   }
/// }
/// ```
///
/// Every endpoint is served from the same document, which makes it easy to
/// check a configuration's output without a running application server.
#[derive(Debug)]
pub struct FileSource {
    path: Option<PathBuf>,
    description: String,
    values: ValueStore,
}

impl FileSource {
    /// Read the fixture at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Read error: {}", path.display()))?;
        let values = serde_json::from_str(&content)
            .with_context(|| format!("Parse error: {}", path.display()))?;

        Ok(Self {
            description: format!("file: {}", path.display()),
            path: Some(path),
            values,
        })
    }

    /// Build a source from fixture JSON held in memory.
    pub fn from_json(json: &str) -> Result<Self> {
        let values = serde_json::from_str(json).context("Parse error")?;
        Ok(Self {
            path: None,
            description: "inline fixture".to_string(),
            values,
        })
    }

    /// Returns the fixture path, if read from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The values served.
    pub fn values(&self) -> &ValueStore {
        &self.values
    }
}

#[async_trait]
impl MetricSource for FileSource {
    async fn fetch(
        &self,
        _endpoint: &Endpoint,
        resource: &str,
        attribute: &str,
    ) -> Result<FetchedValue, AdapterError> {
        self.values
            .get(resource, attribute)
            .cloned()
            .ok_or_else(|| AdapterError::Remote {
                mbean: resource.to_string(),
                attribute: attribute.to_string(),
                status: 404,
                message: "not in fixture".to_string(),
            })
    }

    fn description(&self) -> &str {
        &self.description
    }
}
