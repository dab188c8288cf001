//! Munin display attributes recognised in config mode.
//!
//! Only these keys are ever written out. The order of each list is the order
//! in which the attributes appear in a `config` block.

/// The graph attribute every graph must carry.
pub const GRAPH_TITLE: &str = "graph_title";

/// Graph-level attributes, in output order.
pub const GRAPH_ATTRIBUTES: &[&str] = &[
    GRAPH_TITLE,
    "graph_category",
    "graph_info",
    "host_name",
    "update",
    "update_rate",
    "graph_vlabel",
    "graph_period",
    "graph_scale",
    "graph_printf",
    "graph_height",
    "graph_width",
    "graph_args",
    "graph_order",
    "graph_total",
];

/// Per-metric attributes, in output order.
pub const METRIC_ATTRIBUTES: &[&str] = &[
    "label", "type", "info", "extinfo", "cdef", "negative", "stack", "sum", "graph", "draw",
    "colour", "min", "max", "warning", "critical", "line",
];
