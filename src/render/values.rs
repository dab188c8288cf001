//! Value block rendering.

use std::collections::BTreeMap;

use munin_jmx_types::GraphDefinition;
use tracing::debug;

use super::multigraph;
use crate::data::ValueStore;

/// Render current values for one endpoint's graphs.
///
/// Metrics whose value cannot be resolved are left out.
pub fn render_values(graphs: &BTreeMap<String, GraphDefinition>, store: &ValueStore) -> String {
    let mut output = String::new();

    for (graph_name, graph) in graphs {
        multigraph(&mut output, graph_name);

        for (metric_name, metric) in &graph.metrics {
            match store.resolve(metric) {
                Some(value) => output.push_str(&format!("{}.value {}\n", metric_name, value)),
                None => debug!(graph = %graph_name, metric = %metric_name, "No value"),
            }
        }

        output.push('\n');
    }

    output
}
