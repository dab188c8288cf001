//! Request planning: the distinct reads an endpoint needs.
//!
//! Several metrics, possibly in different graphs, often read the same
//! attribute (e.g. `used` and `max` of `HeapMemoryUsage`). The plan groups
//! attribute names by MBean so each pair is fetched once per endpoint pass.
//! Each pair still travels as its own read, so one unknown attribute cannot
//! take its neighbours on the same MBean down with it.

use std::collections::{BTreeMap, BTreeSet};

use munin_jmx_adapters::jolokia::ReadRequest;
use munin_jmx_adapters::AdapterError;
use munin_jmx_types::GraphDefinition;

/// MBean -> attribute names to read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPlan {
    reads: BTreeMap<String, BTreeSet<String>>,
    /// `graph.metric` names lacking a resource or attribute.
    incomplete: Vec<String>,
}

/// Plan the reads for one endpoint's graphs.
pub fn plan(graphs: &BTreeMap<String, GraphDefinition>) -> RequestPlan {
    RequestPlan::for_graphs(graphs)
}

impl RequestPlan {
    /// Scan every metric of every graph.
    pub fn for_graphs(graphs: &BTreeMap<String, GraphDefinition>) -> Self {
        let mut plan = RequestPlan::default();

        for (graph_name, graph) in graphs {
            for (metric_name, metric) in &graph.metrics {
                match (&metric.resource, &metric.attribute) {
                    (Some(resource), Some(attribute)) => plan.add(resource, attribute),
                    _ => plan.incomplete.push(format!("{}.{}", graph_name, metric_name)),
                }
            }
        }

        plan
    }

    /// Add a single pair.
    pub fn add(&mut self, resource: &str, attribute: &str) {
        self.reads
            .entry(resource.to_string())
            .or_default()
            .insert(attribute.to_string());
    }

    /// Check if there is nothing to fetch.
    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }

    /// Number of distinct (resource, attribute) pairs.
    pub fn len(&self) -> usize {
        self.reads.values().map(BTreeSet::len).sum()
    }

    /// MBeans to read, in name order.
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.reads.keys().map(String::as_str)
    }

    /// Attributes needed on `resource`.
    pub fn attributes(&self, resource: &str) -> Option<&BTreeSet<String>> {
        self.reads.get(resource)
    }

    /// Every (resource, attribute) pair once.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.reads.iter().flat_map(|(resource, attributes)| {
            attributes
                .iter()
                .map(move |attribute| (resource.as_str(), attribute.as_str()))
        })
    }

    /// Metrics that could not be planned.
    pub fn incomplete(&self) -> &[String] {
        &self.incomplete
    }

    /// Fail if any metric lacks a resource or attribute.
    pub fn validate(&self) -> Result<(), AdapterError> {
        if self.incomplete.is_empty() {
            return Ok(());
        }
        Err(AdapterError::MalformedRequest(format!(
            "missing resource or attribute for {}",
            self.incomplete.join(", ")
        )))
    }

    /// One Jolokia read per pair, in [`pairs`](Self::pairs) order.
    pub fn read_requests(&self) -> Vec<ReadRequest> {
        self.pairs()
            .map(|(resource, attribute)| ReadRequest::new(resource, attribute))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use munin_jmx_types::Endpoint;

    const MEMORY: &str = "java.lang:type=Memory";
    const THREADING: &str = "java.lang:type=Threading";

    fn wildfly() -> Endpoint {
        Endpoint::builder("http://localhost:8080/jolokia")
            .graph("wildfly_memory", |g| {
                g.attr("graph_title", "Memory")
                    .metric("heap_used", |m| {
                        m.resource(MEMORY).attribute("HeapMemoryUsage").path("used")
                    })
                    .metric("heap_max", |m| {
                        m.resource(MEMORY).attribute("HeapMemoryUsage").path("max")
                    })
                    .metric("nonheap_used", |m| {
                        m.resource(MEMORY).attribute("NonHeapMemoryUsage").path("used")
                    })
                    .metric("nonheap_max", |m| {
                        m.resource(MEMORY).attribute("NonHeapMemoryUsage").path("max")
                    })
            })
            .graph("wildfly_threads", |g| {
                g.attr("graph_title", "Threads")
                    .metric("count", |m| m.resource(THREADING).attribute("ThreadCount"))
                    .metric("daemon", |m| m.resource(THREADING).attribute("DaemonThreadCount"))
            })
            .build()
    }

    #[test]
    fn test_deduplicates_pairs() {
        let plan = plan(&wildfly().graphs);

        assert_eq!(plan.len(), 4);
        assert_eq!(plan.resources().collect::<Vec<_>>(), vec![MEMORY, THREADING]);
        assert_eq!(
            plan.attributes(MEMORY).unwrap().iter().collect::<Vec<_>>(),
            vec!["HeapMemoryUsage", "NonHeapMemoryUsage"]
        );
        assert!(plan.incomplete().is_empty());
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_same_pair_across_graphs() {
        let endpoint = Endpoint::builder("http://localhost:8080/jolokia")
            .graph("a", |g| g.metric("x", |m| m.resource(MEMORY).attribute("HeapMemoryUsage")))
            .graph("b", |g| g.metric("y", |m| m.resource(MEMORY).attribute("HeapMemoryUsage")))
            .build();

        let plan = plan(&endpoint.graphs);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.pairs().collect::<Vec<_>>(), vec![(MEMORY, "HeapMemoryUsage")]);
    }

    #[test]
    fn test_order_independent() {
        let forward = Endpoint::builder("http://localhost:8080/jolokia")
            .graph("first", |g| {
                g.metric("a", |m| m.resource(THREADING).attribute("ThreadCount"))
                    .metric("b", |m| m.resource(MEMORY).attribute("HeapMemoryUsage"))
            })
            .graph("second", |g| g.metric("c", |m| m.resource(MEMORY).attribute("NonHeapMemoryUsage")))
            .build();

        let permuted = Endpoint::builder("http://localhost:8080/jolokia")
            .graph("zz", |g| g.metric("c", |m| m.resource(MEMORY).attribute("NonHeapMemoryUsage")))
            .graph("aa", |g| {
                g.metric("b", |m| m.resource(MEMORY).attribute("HeapMemoryUsage"))
                    .metric("z", |m| m.resource(THREADING).attribute("ThreadCount"))
            })
            .build();

        assert_eq!(plan(&forward.graphs), plan(&permuted.graphs));
        assert_eq!(plan(&forward.graphs), plan(&forward.graphs));
    }

    #[test]
    fn test_incomplete_metric_fails_validation() {
        let endpoint = Endpoint::builder("http://localhost:8080/jolokia")
            .graph("threads", |g| {
                g.metric("count", |m| m.resource(THREADING).attribute("ThreadCount"))
                    .metric("broken", |m| m.resource(THREADING))
            })
            .build();

        let plan = plan(&endpoint.graphs);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.incomplete(), &["threads.broken".to_string()]);

        match plan.validate().unwrap_err() {
            AdapterError::MalformedRequest(message) => assert!(message.contains("threads.broken")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_read_requests_one_per_pair() {
        let requests = plan(&wildfly().graphs).read_requests();
        assert_eq!(
            requests,
            vec![
                ReadRequest::new(MEMORY, "HeapMemoryUsage"),
                ReadRequest::new(MEMORY, "NonHeapMemoryUsage"),
                ReadRequest::new(THREADING, "DaemonThreadCount"),
                ReadRequest::new(THREADING, "ThreadCount"),
            ]
        );
    }

    #[test]
    fn test_empty_plan() {
        let plan = plan(&BTreeMap::new());
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
        assert!(plan.read_requests().is_empty());
    }
}
