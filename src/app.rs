//! Plugin invocation: mode selection and the per-endpoint run loop.

use std::io::Write;

use anyhow::{Context, Result};
use munin_jmx_adapters::AdapterError;
use munin_jmx_types::Endpoint;
use tracing::{debug, info};

use crate::data::{PluginDocument, RequestPlan, ValueStore};
use crate::render;
use crate::source::MetricSource;

/// How Munin invoked the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `config`: print graph configuration, then values.
    Config,
    /// Anything else: print values only.
    Values,
}

impl Mode {
    /// Interpret the optional positional argument.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("config") => Mode::Config,
            _ => Mode::Values,
        }
    }
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    document: PluginDocument,
    mode: Mode,
    source: Box<dyn MetricSource>,
}

impl App {
    /// Create an app over a loaded configuration.
    pub fn new(document: PluginDocument, mode: Mode, source: Box<dyn MetricSource>) -> Self {
        Self {
            document,
            mode,
            source,
        }
    }

    /// The invocation mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The loaded configuration.
    pub fn document(&self) -> &PluginDocument {
        &self.document
    }

    /// Write the plugin output to `out`.
    ///
    /// In config mode the whole config block is rendered before anything is
    /// written, so a graph without a title produces no output at all.
    /// Endpoints are then processed in order; a transport failure stops the
    /// run after the values of earlier endpoints have been written.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        info!(
            endpoints = self.document.endpoints.len(),
            graphs = self.document.graph_count(),
            source = self.source.description(),
            mode = ?self.mode,
            "Starting run"
        );

        if self.mode == Mode::Config {
            let config = render::render_config(&self.document.endpoints)?;
            out.write_all(config.as_bytes())?;
        }

        for (index, endpoint) in self.document.endpoints.iter().enumerate() {
            let store = self
                .collect(endpoint)
                .await
                .with_context(|| format!("Endpoint #{} ({}) failed", index + 1, endpoint.url))?;

            out.write_all(render::render_values(&endpoint.graphs, &store).as_bytes())?;
        }

        out.flush()?;
        Ok(())
    }

    /// Fetch everything one endpoint's graphs need.
    pub async fn collect(&self, endpoint: &Endpoint) -> Result<ValueStore, AdapterError> {
        let plan = RequestPlan::for_graphs(&endpoint.graphs);
        debug!(
            endpoint = %endpoint.url,
            pairs = plan.len(),
            metrics = endpoint.metric_count(),
            "Planned reads"
        );

        if plan.is_empty() && plan.incomplete().is_empty() {
            return Ok(ValueStore::new());
        }

        let store = self.source.fetch_plan(endpoint, &plan).await?;
        debug!(endpoint = %endpoint.url, fetched = store.len(), "Fetched values");
        Ok(store)
    }
}
