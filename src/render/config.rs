//! `config` block rendering.

use std::collections::BTreeMap;

use munin_jmx_types::{
    DisplayValue, Endpoint, GraphDefinition, GRAPH_ATTRIBUTES, METRIC_ATTRIBUTES,
};

use super::multigraph;
use crate::error::ConfigError;

/// Render the `config` block for every endpoint, in endpoint order.
///
/// Nothing is returned unless every graph has a title.
pub fn render_config(endpoints: &[Endpoint]) -> Result<String, ConfigError> {
    let mut output = String::new();
    for endpoint in endpoints {
        output.push_str(&render_endpoint_config(&endpoint.graphs)?);
    }
    Ok(output)
}

/// Render the `config` block for one endpoint's graphs.
pub fn render_endpoint_config(
    graphs: &BTreeMap<String, GraphDefinition>,
) -> Result<String, ConfigError> {
    let mut output = String::new();

    for (graph_name, graph) in graphs {
        if graph.title().is_none() {
            return Err(ConfigError::MissingTitle {
                graph: graph_name.clone(),
            });
        }

        multigraph(&mut output, graph_name);

        for key in GRAPH_ATTRIBUTES {
            if let Some(value) = graph.attr(key).and_then(DisplayValue::render) {
                output.push_str(&format!("{} {}\n", key, value));
            }
        }

        for (metric_name, metric) in &graph.metrics {
            for key in METRIC_ATTRIBUTES {
                if let Some(value) = metric.attr(key).and_then(DisplayValue::render) {
                    output.push_str(&format!("{}.{} {}\n", metric_name, key, value));
                }
            }
        }

        output.push('\n');
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::wildfly_document;

    #[test]
    fn test_wildfly_config() {
        let document = wildfly_document();
        let output = render_config(&document.endpoints).unwrap();

        let expected = "\
multigraph wildfly_memory
graph_title WildFly memory
graph_category wildfly
graph_vlabel bytes
graph_args --base 1024 -l 0
graph_order heap_used heap_max nonheap_used nonheap_max
heap_max.label Heap max
heap_max.colour ff0000
heap_used.label Heap used
heap_used.draw AREA
heap_used.min 0
nonheap_max.label Non-heap max
nonheap_used.label Non-heap used
nonheap_used.draw STACK

multigraph wildfly_threads
graph_title WildFly threads
graph_category wildfly
graph_vlabel threads
graph_scale no
count.label Live threads
count.warning 500
daemon.label Daemon threads
daemon.info Threads not keeping the JVM alive

";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_one_section_per_graph() {
        let document = wildfly_document();
        let output = render_config(&document.endpoints).unwrap();

        assert_eq!(output.matches("multigraph ").count(), document.graph_count());
        let memory = output.find("multigraph wildfly_memory").unwrap();
        let threads = output.find("multigraph wildfly_threads").unwrap();
        assert!(memory < threads);
    }

    #[test]
    fn test_unknown_attributes_ignored() {
        let endpoint = Endpoint::builder("http://localhost:8080/jolokia")
            .graph("g", |g| {
                g.attr("graph_title", "G")
                    .attr("graph_colour", "blue")
                    .metric("m", |m| {
                        m.resource("r")
                            .attribute("a")
                            .attr("label", "M")
                            .attr("color", "red")
                    })
            })
            .build();

        let output = render_endpoint_config(&endpoint.graphs).unwrap();
        assert_eq!(output, "multigraph g\ngraph_title G\nm.label M\n\n");
    }

    #[test]
    fn test_allow_list_order_not_insertion_order() {
        let endpoint = Endpoint::builder("http://localhost:8080/jolokia")
            .graph("g", |g| {
                g.attr("graph_total", "Total")
                    .attr("graph_vlabel", "ops")
                    .attr("graph_title", "G")
                    .metric("m", |m| m.attr("max", 10_i64).attr("type", "DERIVE").attr("label", "M"))
            })
            .build();

        let output = render_endpoint_config(&endpoint.graphs).unwrap();
        assert_eq!(
            output,
            "multigraph g\ngraph_title G\ngraph_vlabel ops\ngraph_total Total\nm.label M\nm.type DERIVE\nm.max 10\n\n"
        );
    }

    #[test]
    fn test_graph_without_metrics() {
        let endpoint = Endpoint::builder("http://localhost:8080/jolokia")
            .graph("empty", |g| g.attr("graph_title", "Nothing yet"))
            .build();

        let output = render_endpoint_config(&endpoint.graphs).unwrap();
        assert_eq!(output, "multigraph empty\ngraph_title Nothing yet\n\n");
    }

    #[test]
    fn test_missing_title_is_fatal() {
        let endpoints = vec![
            Endpoint::builder("http://a:8080/jolokia")
                .graph("fine", |g| g.attr("graph_title", "Fine"))
                .build(),
            Endpoint::builder("http://b:8080/jolokia")
                .graph("untitled", |g| g.attr("graph_vlabel", "ops"))
                .build(),
        ];

        match render_config(&endpoints).unwrap_err() {
            ConfigError::MissingTitle { graph } => assert_eq!(graph, "untitled"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_null_title_is_missing() {
        let endpoint = Endpoint::builder("http://localhost:8080/jolokia")
            .graph("g", |g| g.attr("graph_title", DisplayValue::Null))
            .build();

        assert!(render_endpoint_config(&endpoint.graphs).is_err());
    }
}
