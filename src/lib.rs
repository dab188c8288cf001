//! # munin-jmx
//!
//! A Munin plugin reporting JMX attributes read through a Jolokia agent.
//!
//! The plugin reads a YAML file describing one or more Jolokia endpoints and
//! the graphs to draw from each. On every run it works out the distinct
//! (MBean, attribute) pairs each endpoint needs, reads them in one bulk
//! request, and prints Munin `multigraph` sections.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Plugin run                          │
//! │  ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌────────┐  │
//! │  │   data   │───▶│  source  │───▶│  render  │───▶│ stdout │  │
//! │  │ (config, │    │ (fetch)  │    │ (munin   │    │        │  │
//! │  │  plan)   │    │          │    │  text)   │    │        │  │
//! │  └──────────┘    └────┬─────┘    └──────────┘    └────────┘  │
//! │                       │                                      │
//! │                       ▼                                      │
//! │            JolokiaSource | FileSource                        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Invocation mode and the per-endpoint run loop
//! - **[`data`]**: YAML loading ([`PluginDocument`]), request planning
//!   ([`RequestPlan`]) and the per-endpoint value cache ([`ValueStore`])
//! - **[`source`]**: The [`MetricSource`] trait with a live Jolokia
//!   implementation and a JSON fixture implementation
//! - **[`render`]**: `config` and value blocks in the Munin plugin protocol
//! - **[`settings`]**: Runtime settings from the environment and command line
//!
//! ## Usage
//!
//! ### As a Munin plugin
//!
//! ```bash
//! ln -s /usr/local/bin/munin-jmx /etc/munin/plugins/jmx
//!
//! # /etc/munin/plugin-conf.d/jmx
//! [jmx]
//! env.MUNIN_JMX_CONFIG /etc/munin/jmx.yml
//!
//! munin-run jmx config
//! munin-run jmx
//! ```
//!
//! ### Checking a configuration offline
//!
//! ```bash
//! munin-jmx --config jmx.yml --values-file sample-values.json config
//! ```
//!
//! ### As a library
//!
//! ```
//! use munin_jmx::{App, FileSource, Mode, PluginDocument};
//!
//! # tokio_test::block_on(async {
//! let document = PluginDocument::parse(r#"
//! - url: http://localhost:8080/jolokia
//!   graphs:
//!     threads:
//!       graph_title: Threads
//!       metrics:
//!         count:
//!           label: Live threads
//!           resource: java.lang:type=Threading
//!           attribute: ThreadCount
//! "#).unwrap();
//!
//! let source = FileSource::from_json(r#"{"java.lang:type=Threading": {"ThreadCount": 42}}"#).unwrap();
//! let app = App::new(document, Mode::Values, Box::new(source));
//!
//! let mut out = Vec::new();
//! app.run(&mut out).await.unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "multigraph threads\ncount.value 42\n\n");
//! # });
//! ```

pub mod app;
pub mod data;
pub mod error;
pub mod render;
pub mod settings;
pub mod source;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use app::{App, Mode};
pub use data::{extract, plan, PluginDocument, RequestPlan, ValueStore};
pub use error::ConfigError;
pub use munin_jmx_types::{
    DisplayValue, Endpoint, FetchedValue, GraphDefinition, MetricDefinition, Scalar, Target,
};
pub use settings::Settings;
pub use source::{FileSource, JolokiaSource, MetricSource};
