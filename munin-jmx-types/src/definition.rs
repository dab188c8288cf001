//! Plugin configuration model: endpoints, graphs and metrics.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// A display attribute value as written in the configuration.
///
/// Munin attributes are plain text on the wire, but YAML hands them over
/// typed (`graph_height: 200`, `min: 0`). Lists are joined with spaces,
/// which suits `graph_order`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum DisplayValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<DisplayValue>),
    /// Nested tables are accepted so unrelated keys don't break loading,
    /// but they never render.
    Map(BTreeMap<String, DisplayValue>),
    Null,
}

impl DisplayValue {
    /// Render the value as it appears after the attribute name.
    ///
    /// Returns `None` for values that have no Munin text form.
    pub fn render(&self) -> Option<String> {
        match self {
            DisplayValue::Bool(b) => Some(if *b { "yes" } else { "no" }.to_string()),
            DisplayValue::Integer(i) => Some(i.to_string()),
            DisplayValue::Float(x) => Some(x.to_string()),
            DisplayValue::Text(s) => Some(s.clone()),
            DisplayValue::List(items) => {
                let parts: Vec<String> = items.iter().filter_map(DisplayValue::render).collect();
                Some(parts.join(" "))
            }
            DisplayValue::Map(_) | DisplayValue::Null => None,
        }
    }
}

impl From<&str> for DisplayValue {
    fn from(s: &str) -> Self {
        DisplayValue::Text(s.to_string())
    }
}

impl From<String> for DisplayValue {
    fn from(s: String) -> Self {
        DisplayValue::Text(s)
    }
}

impl From<i64> for DisplayValue {
    fn from(i: i64) -> Self {
        DisplayValue::Integer(i)
    }
}

impl From<f64> for DisplayValue {
    fn from(x: f64) -> Self {
        DisplayValue::Float(x)
    }
}

impl From<bool> for DisplayValue {
    fn from(b: bool) -> Self {
        DisplayValue::Bool(b)
    }
}

/// One remote management interface reachable through a Jolokia agent.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Endpoint {
    /// Jolokia agent URL, e.g. `http://localhost:8080/jolokia`.
    pub url: String,

    /// HTTP basic auth user for the agent.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub user: Option<String>,

    /// HTTP basic auth password for the agent.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub password: Option<String>,

    /// JMX service the agent should proxy to, if any.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub target: Option<Target>,

    /// Request timeout in seconds, overriding the global setting.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub timeout: Option<u64>,

    /// Graphs served from this endpoint, keyed by graph name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub graphs: BTreeMap<String, GraphDefinition>,
}

impl Endpoint {
    /// Create a builder for an endpoint at `url`.
    pub fn builder(url: impl Into<String>) -> EndpointBuilder {
        EndpointBuilder::new(url)
    }

    /// Total number of metrics across all graphs.
    pub fn metric_count(&self) -> usize {
        self.graphs.values().map(|g| g.metrics.len()).sum()
    }
}

/// Proxy target for Jolokia's proxy mode.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    /// JMX service URL, e.g. `service:jmx:rmi:///jndi/rmi://host:9999/jmxrmi`.
    pub url: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub user: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub password: Option<String>,
}

/// A named collection of metrics drawn together.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphDefinition {
    /// Metrics in this graph, keyed by metric name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub metrics: BTreeMap<String, MetricDefinition>,

    /// Graph-level display attributes (`graph_title`, `graph_vlabel`, ...).
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub attributes: BTreeMap<String, DisplayValue>,
}

impl GraphDefinition {
    /// Create a builder for a graph definition.
    pub fn builder() -> GraphDefinitionBuilder {
        GraphDefinitionBuilder::new()
    }

    /// Get a display attribute.
    pub fn attr(&self, key: &str) -> Option<&DisplayValue> {
        self.attributes.get(key)
    }

    /// The graph title, if present and renderable.
    pub fn title(&self) -> Option<String> {
        self.attr(crate::GRAPH_TITLE).and_then(DisplayValue::render)
    }
}

/// A single data series within a graph.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricDefinition {
    /// Name of the MBean exposing the attribute.
    #[cfg_attr(
        feature = "serde",
        serde(default, alias = "mbean", skip_serializing_if = "Option::is_none")
    )]
    pub resource: Option<String>,

    /// Attribute to read on the MBean.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub attribute: Option<String>,

    /// Dot-separated path into the attribute value.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub path: Option<String>,

    /// Metric-level display attributes (`label`, `type`, `min`, ...).
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub attributes: BTreeMap<String, DisplayValue>,
}

impl MetricDefinition {
    /// Create a builder for a metric definition.
    pub fn builder() -> MetricDefinitionBuilder {
        MetricDefinitionBuilder::new()
    }

    /// Get a display attribute.
    pub fn attr(&self, key: &str) -> Option<&DisplayValue> {
        self.attributes.get(key)
    }

    /// The path, treating an empty string as absent.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}

/// Builder for constructing `Endpoint` instances.
#[derive(Debug)]
pub struct EndpointBuilder {
    endpoint: Endpoint,
}

impl EndpointBuilder {
    /// Create a new builder for an endpoint at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            endpoint: Endpoint {
                url: url.into(),
                ..Default::default()
            },
        }
    }

    /// Set HTTP basic auth credentials.
    pub fn credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.endpoint.user = Some(user.into());
        self.endpoint.password = Some(password.into());
        self
    }

    /// Set a proxy target.
    pub fn target(mut self, target: Target) -> Self {
        self.endpoint.target = Some(target);
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.endpoint.timeout = Some(secs);
        self
    }

    /// Add a graph using a builder function.
    pub fn graph<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(GraphDefinitionBuilder) -> GraphDefinitionBuilder,
    {
        let graph = f(GraphDefinitionBuilder::new()).build();
        self.endpoint.graphs.insert(name.into(), graph);
        self
    }

    /// Build the endpoint.
    pub fn build(self) -> Endpoint {
        self.endpoint
    }
}

/// Builder for constructing `GraphDefinition` instances.
#[derive(Debug, Default)]
pub struct GraphDefinitionBuilder {
    graph: GraphDefinition,
}

impl GraphDefinitionBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a display attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<DisplayValue>) -> Self {
        self.graph.attributes.insert(key.into(), value.into());
        self
    }

    /// Add a metric using a builder function.
    pub fn metric<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(MetricDefinitionBuilder) -> MetricDefinitionBuilder,
    {
        let metric = f(MetricDefinitionBuilder::new()).build();
        self.graph.metrics.insert(name.into(), metric);
        self
    }

    /// Build the graph definition.
    pub fn build(self) -> GraphDefinition {
        self.graph
    }
}

/// Builder for constructing `MetricDefinition` instances.
#[derive(Debug, Default)]
pub struct MetricDefinitionBuilder {
    metric: MetricDefinition,
}

impl MetricDefinitionBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the MBean name.
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.metric.resource = Some(resource.into());
        self
    }

    /// Set the attribute name.
    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.metric.attribute = Some(attribute.into());
        self
    }

    /// Set the path into the attribute value.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.metric.path = Some(path.into());
        self
    }

    /// Set a display attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<DisplayValue>) -> Self {
        self.metric.attributes.insert(key.into(), value.into());
        self
    }

    /// Build the metric definition.
    pub fn build(self) -> MetricDefinition {
        self.metric
    }
}
