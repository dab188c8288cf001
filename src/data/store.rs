//! Fetched values for one endpoint pass, and metric resolution.

use std::collections::BTreeMap;

use munin_jmx_types::{FetchedValue, MetricDefinition, Scalar};
use serde::Deserialize;

/// Resource -> attribute -> fetched value.
///
/// Built fresh for every endpoint and dropped once its graphs are rendered.
/// Deserializes from a JSON object of the same shape, which is also the
/// fixture format read by [`FileSource`](crate::source::FileSource).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ValueStore {
    values: BTreeMap<String, BTreeMap<String, FetchedValue>>,
}

impl ValueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the value of one attribute.
    pub fn insert(&mut self, resource: &str, attribute: &str, value: FetchedValue) {
        self.values
            .entry(resource.to_string())
            .or_default()
            .insert(attribute.to_string(), value);
    }

    /// Look up the raw value of an attribute.
    pub fn get(&self, resource: &str, attribute: &str) -> Option<&FetchedValue> {
        self.values.get(resource)?.get(attribute)
    }

    /// Number of stored (resource, attribute) values.
    pub fn len(&self) -> usize {
        self.values.values().map(BTreeMap::len).sum()
    }

    /// Check if nothing was fetched.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extract a scalar from `resource`/`attribute`, following `path` if given.
    pub fn extract(&self, resource: &str, attribute: &str, path: Option<&str>) -> Option<&Scalar> {
        extract(self.get(resource, attribute)?, path)
    }

    /// Resolve the value a metric reports.
    ///
    /// `None` means the metric is left out of the value block.
    pub fn resolve(&self, metric: &MetricDefinition) -> Option<&Scalar> {
        let resource = metric.resource.as_deref()?;
        let attribute = metric.attribute.as_deref()?;
        self.extract(resource, attribute, metric.path())
    }
}

/// Walk `path` into `value` and return the scalar found there.
///
/// An empty or absent path takes `value` itself. Composites and nulls yield
/// `None`.
pub fn extract<'a>(value: &'a FetchedValue, path: Option<&str>) -> Option<&'a Scalar> {
    let target = match path.filter(|p| !p.is_empty()) {
        Some(path) => value.walk(path)?,
        None => value,
    };
    target.as_scalar().filter(|s| !s.is_null())
}
