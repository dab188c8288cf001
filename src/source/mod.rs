//! Metric source abstraction for fetching attribute values.
//!
//! This module provides a trait-based abstraction over where attribute
//! values come from: a live Jolokia agent, or a JSON fixture on disk.

mod file;
mod jolokia;

pub use file::FileSource;
pub use jolokia::JolokiaSource;

use std::fmt::Debug;

use async_trait::async_trait;
use munin_jmx_adapters::AdapterError;
use munin_jmx_types::{Endpoint, FetchedValue};
use tracing::warn;

use crate::data::{RequestPlan, ValueStore};

/// Trait for fetching attribute values for an endpoint.
///
/// # Example
///
/// ```
/// use munin_jmx::{plan, Endpoint, FileSource, MetricSource};
///
/// # tokio_test::block_on(async {
/// let source = FileSource::from_json(
///     r#"{"java.lang:type=Threading": {"ThreadCount": 42}}"#,
/// )
/// .unwrap();
///
/// let endpoint = Endpoint::builder("http://localhost:8080/jolokia")
///     .graph("threads", |g| {
///         g.metric("count", |m| m.resource("java.lang:type=Threading").attribute("ThreadCount"))
///     })
///     .build();
///
/// let store = source.fetch_plan(&endpoint, &plan(&endpoint.graphs)).await.unwrap();
/// assert_eq!(store.len(), 1);
/// # });
/// ```
#[async_trait]
pub trait MetricSource: Send + Sync + Debug {
    /// Fetch a single attribute from `endpoint`.
    async fn fetch(
        &self,
        endpoint: &Endpoint,
        resource: &str,
        attribute: &str,
    ) -> Result<FetchedValue, AdapterError>;

    /// Fetch every pair in `plan`.
    ///
    /// Reads the gateway rejects individually are logged and left out of the
    /// store. Any other error aborts the endpoint. The default issues one
    /// [`fetch`](MetricSource::fetch) per pair, in plan order.
    async fn fetch_plan(
        &self,
        endpoint: &Endpoint,
        plan: &RequestPlan,
    ) -> Result<ValueStore, AdapterError> {
        plan.validate()?;

        let mut store = ValueStore::new();
        for (resource, attribute) in plan.pairs() {
            match self.fetch(endpoint, resource, attribute).await {
                Ok(value) => store.insert(resource, attribute, value),
                Err(e @ AdapterError::Remote { .. }) => {
                    warn!(endpoint = %endpoint.url, "{}", e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(store)
    }

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::plan;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves fixed values and counts fetches.
    #[derive(Debug, Default)]
    struct CountingSource {
        values: ValueStore,
        calls: AtomicUsize,
        broken: bool,
    }

    #[async_trait]
    impl MetricSource for CountingSource {
        async fn fetch(
            &self,
            _endpoint: &Endpoint,
            resource: &str,
            attribute: &str,
        ) -> Result<FetchedValue, AdapterError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.broken {
                return Err(AdapterError::Connection("refused".to_string()));
            }
            self.values
                .get(resource, attribute)
                .cloned()
                .ok_or_else(|| AdapterError::Remote {
                    mbean: resource.to_string(),
                    attribute: attribute.to_string(),
                    status: 404,
                    message: "not found".to_string(),
                })
        }

        fn description(&self) -> &str {
            "counting"
        }
    }

    fn endpoint() -> Endpoint {
        Endpoint::builder("http://localhost:8080/jolokia")
            .graph("memory", |g| {
                g.metric("used", |m| {
                    m.resource("java.lang:type=Memory")
                        .attribute("HeapMemoryUsage")
                        .path("used")
                })
                .metric("max", |m| {
                    m.resource("java.lang:type=Memory")
                        .attribute("HeapMemoryUsage")
                        .path("max")
                })
            })
            .graph("threads", |g| {
                g.metric("count", |m| m.resource("java.lang:type=Threading").attribute("ThreadCount"))
            })
            .build()
    }

    #[tokio::test]
    async fn test_fetch_plan_fetches_each_pair_once() {
        let mut values = ValueStore::new();
        values.insert("java.lang:type=Memory", "HeapMemoryUsage", 1_i64.into());
        values.insert("java.lang:type=Threading", "ThreadCount", 2_i64.into());
        let source = CountingSource {
            values,
            ..Default::default()
        };

        let endpoint = endpoint();
        let store = source.fetch_plan(&endpoint, &plan(&endpoint.graphs)).await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_plan_skips_rejected_reads() {
        let mut values = ValueStore::new();
        values.insert("java.lang:type=Threading", "ThreadCount", 2_i64.into());
        let source = CountingSource {
            values,
            ..Default::default()
        };

        let endpoint = endpoint();
        let store = source.fetch_plan(&endpoint, &plan(&endpoint.graphs)).await.unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.get("java.lang:type=Memory", "HeapMemoryUsage").is_none());
    }

    #[tokio::test]
    async fn test_fetch_plan_aborts_on_transport_error() {
        let source = CountingSource {
            broken: true,
            ..Default::default()
        };

        let endpoint = endpoint();
        let err = source
            .fetch_plan(&endpoint, &plan(&endpoint.graphs))
            .await
            .unwrap_err();

        assert!(matches!(err, AdapterError::Connection(_)));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_plan_rejects_incomplete_metrics() {
        let source = CountingSource::default();
        let endpoint = Endpoint::builder("http://localhost:8080/jolokia")
            .graph("threads", |g| g.metric("count", |m| m.attribute("ThreadCount")))
            .build();

        let err = source
            .fetch_plan(&endpoint, &plan(&endpoint.graphs))
            .await
            .unwrap_err();

        assert!(matches!(err, AdapterError::MalformedRequest(_)));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }
}
