//! Munin plugin protocol output.
//!
//! Both blocks are a sequence of `multigraph` sections, one per graph in name
//! order, each terminated by a blank line:
//!
//! ```text
//! multigraph wildfly_threads
//! graph_title WildFly threads
//! count.label Live threads
//!
//! multigraph wildfly_threads
//! count.value 42
//!
//! ```
//!
//! - [`config`]: Graph and metric display attributes (`config` invocation)
//! - [`values`]: Current metric values

pub mod config;
pub mod values;

pub use config::{render_config, render_endpoint_config};
pub use values::render_values;

/// Opening line of a graph section.
fn multigraph(output: &mut String, graph: &str) {
    output.push_str(&format!("multigraph {}\n", graph));
}
