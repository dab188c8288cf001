//! Live metric source backed by a Jolokia agent.

use std::time::Duration;

use async_trait::async_trait;
use munin_jmx_adapters::jolokia::JolokiaClient;
use munin_jmx_adapters::AdapterError;
use munin_jmx_types::{Endpoint, FetchedValue};
use tracing::{debug, warn};

use super::MetricSource;
use crate::data::{RequestPlan, ValueStore};

/// Reads attributes from each endpoint's Jolokia agent.
///
/// A whole plan goes out as one bulk request with one read per
/// (MBean, attribute) pair.
#[derive(Debug)]
pub struct JolokiaSource {
    timeout: Duration,
    description: String,
}

impl JolokiaSource {
    /// Create a source using `timeout` for endpoints that don't set their own.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            description: "jolokia".to_string(),
        }
    }

    /// The timeout applied to `endpoint`.
    pub fn timeout_for(&self, endpoint: &Endpoint) -> Duration {
        endpoint
            .timeout
            .map(Duration::from_secs)
            .unwrap_or(self.timeout)
    }

    fn client(&self, endpoint: &Endpoint) -> Result<JolokiaClient, AdapterError> {
        let mut builder = JolokiaClient::builder()
            .endpoint(endpoint.url.as_str())
            .timeout(self.timeout_for(endpoint));

        builder = match (&endpoint.user, &endpoint.password) {
            (Some(user), Some(password)) => builder.credentials(user.as_str(), password.as_str()),
            (Some(user), None) => builder.username(user.as_str()),
            _ => builder,
        };

        if let Some(target) = &endpoint.target {
            builder = builder.target(target.clone());
        }

        builder.build()
    }
}

#[async_trait]
impl MetricSource for JolokiaSource {
    async fn fetch(
        &self,
        endpoint: &Endpoint,
        resource: &str,
        attribute: &str,
    ) -> Result<FetchedValue, AdapterError> {
        self.client(endpoint)?.read(resource, attribute).await
    }

    async fn fetch_plan(
        &self,
        endpoint: &Endpoint,
        plan: &RequestPlan,
    ) -> Result<ValueStore, AdapterError> {
        plan.validate()?;

        let requests = plan.read_requests();
        debug!(endpoint = %endpoint.url, reads = requests.len(), "Sending bulk read");

        let client = self.client(endpoint)?;
        let results = client.read_bulk(&requests).await?;

        let mut store = ValueStore::new();
        for (request, result) in requests.iter().zip(results) {
            match result {
                Ok(value) => store.insert(&request.mbean, &request.attribute, value),
                Err(e) => warn!(endpoint = %endpoint.url, "{}", e),
            }
        }

        Ok(store)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
