//! Jolokia adapter using the JSON-over-HTTP protocol.
//!
//! Jolokia exposes JMX through an HTTP agent, typically mounted at
//! `/jolokia` on the application server. Reads are POSTed as JSON; a JSON
//! array of requests is answered with an array of responses in the same
//! order, which lets an endpoint's reads travel in a single round trip.
//!
//! ## Wire Format
//!
//! ```text
//! POST /jolokia
//! [{"type":"read","mbean":"java.lang:type=Memory","attribute":"HeapMemoryUsage"},
//!  {"type":"read","mbean":"java.lang:type=Threading","attribute":"ThreadCount"}]
//!
//! [{"status":200,"value":{"used":123,"max":456},"request":{...}},
//!  {"status":200,"value":42,"request":{...}}]
//! ```
//!
//! Each entry names exactly one attribute. Jolokia rejects a whole entry when
//! any attribute in it is unknown, so a failed read only loses its own value.
//!
//! ## Example
//!
//! ```rust,no_run
//! use munin_jmx_adapters::jolokia::{JolokiaClient, ReadRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JolokiaClient::builder()
//!         .endpoint("http://localhost:8080/jolokia")
//!         .build()?;
//!
//!     let results = client
//!         .read_bulk(&[
//!             ReadRequest::new("java.lang:type=Memory", "HeapMemoryUsage"),
//!             ReadRequest::new("java.lang:type=Memory", "NonHeapMemoryUsage"),
//!         ])
//!         .await?;
//!
//!     for result in results {
//!         match result {
//!             Ok(value) => println!("{:?}", value.walk("used")),
//!             Err(e) => eprintln!("{}", e),
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use munin_jmx_types::{FetchedValue, Scalar, Target};

use crate::AdapterError;

/// The value of one attribute, or the reason its read failed.
pub type ReadResult = Result<FetchedValue, AdapterError>;

/// A read of a single attribute on a single MBean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRequest {
    pub mbean: String,
    pub attribute: String,
}

impl ReadRequest {
    /// Create a read request for `attribute` on `mbean`.
    pub fn new(mbean: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            mbean: mbean.into(),
            attribute: attribute.into(),
        }
    }
}

/// Jolokia client for reading MBean attributes.
#[derive(Debug, Clone)]
pub struct JolokiaClient {
    client: Client,
    endpoint: String,
    username: Option<String>,
    password: Option<String>,
    target: Option<Target>,
}

impl JolokiaClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> JolokiaClientBuilder {
        JolokiaClientBuilder::default()
    }

    /// The agent URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Read a single attribute.
    pub async fn read(&self, mbean: &str, attribute: &str) -> Result<FetchedValue, AdapterError> {
        let request = ReadRequest::new(mbean, attribute);
        self.read_bulk(std::slice::from_ref(&request))
            .await?
            .pop()
            .ok_or_else(|| AdapterError::Parse("Empty bulk response".to_string()))?
    }

    /// Send every request in one bulk POST.
    ///
    /// The outer error covers the HTTP exchange as a whole. Each entry of the
    /// returned vector corresponds to the request at the same index.
    pub async fn read_bulk(&self, requests: &[ReadRequest]) -> Result<Vec<ReadResult>, AdapterError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let body = bulk_body(requests, self.target.as_ref());

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_ref());
        }

        let response = request.send().await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdapterError::Auth("Invalid credentials".to_string()));
        }

        if !response.status().is_success() {
            return Err(AdapterError::Http(format!(
                "Agent returned status {}",
                response.status()
            )));
        }

        let entries: Vec<ReadResponse> = response
            .json()
            .await
            .map_err(|e| AdapterError::Parse(e.to_string()))?;

        if entries.len() != requests.len() {
            return Err(AdapterError::Parse(format!(
                "Expected {} responses, got {}",
                requests.len(),
                entries.len()
            )));
        }

        Ok(requests
            .iter()
            .zip(entries)
            .map(|(request, entry)| decode_entry(request, entry))
            .collect())
    }
}

/// Builder for JolokiaClient.
#[derive(Debug, Default)]
pub struct JolokiaClientBuilder {
    endpoint: Option<String>,
    username: Option<String>,
    password: Option<String>,
    target: Option<Target>,
    timeout: Option<Duration>,
}

impl JolokiaClientBuilder {
    /// Set the agent URL (e.g., "http://localhost:8080/jolokia").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the username and password for HTTP basic auth.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set only the username; the agent is sent no password.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Route reads through the agent to a remote JMX service (proxy mode).
    pub fn target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<JolokiaClient, AdapterError> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdapterError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(JolokiaClient {
            client,
            endpoint: self
                .endpoint
                .unwrap_or_else(|| "http://localhost:8080/jolokia".to_string()),
            username: self.username,
            password: self.password,
            target: self.target,
        })
    }
}

/// A single read as serialized into the bulk request.
#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    mbean: &'a str,
    attribute: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<&'a Target>,
}

fn bulk_body<'a>(requests: &'a [ReadRequest], target: Option<&'a Target>) -> Vec<WireRequest<'a>> {
    requests
        .iter()
        .map(|r| WireRequest {
            kind: "read",
            mbean: &r.mbean,
            attribute: &r.attribute,
            target,
        })
        .collect()
}

/// One entry of a bulk response.
#[derive(Debug, Deserialize)]
struct ReadResponse {
    status: u16,
    #[serde(default)]
    value: Option<FetchedValue>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_type: Option<String>,
}

fn decode_entry(request: &ReadRequest, entry: ReadResponse) -> ReadResult {
    if entry.status != 200 {
        let message = entry
            .error
            .or(entry.error_type)
            .unwrap_or_else(|| "no error message".to_string());
        return Err(AdapterError::Remote {
            mbean: request.mbean.clone(),
            attribute: request.attribute.clone(),
            status: entry.status,
            message,
        });
    }

    // serde maps `"value": null` to `None` as well.
    Ok(entry.value.unwrap_or(FetchedValue::Scalar(Scalar::Null)))
}
