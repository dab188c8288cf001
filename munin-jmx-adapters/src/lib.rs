//! # munin-jmx-adapters
//!
//! Transport adapters for reading JMX attributes from remote JVMs.
//!
//! ## Supported Gateways
//!
//! - **Jolokia** (`jolokia` feature, default) - Reads MBean attributes through
//!   the Jolokia JSON-over-HTTP protocol, batching every read for an endpoint
//!   into a single bulk request
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use munin_jmx_adapters::jolokia::{JolokiaClient, ReadRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JolokiaClient::builder()
//!         .endpoint("http://localhost:8080/jolokia")
//!         .credentials("monitor", "secret")
//!         .build()?;
//!
//!     let heap = client.read("java.lang:type=Memory", "HeapMemoryUsage").await?;
//!     println!("{:?}", heap.walk("used"));
//!
//!     let results = client
//!         .read_bulk(&[ReadRequest::new("java.lang:type=Threading", "ThreadCount")])
//!         .await?;
//!     println!("Read {} attributes", results.len());
//!     Ok(())
//! }
//! ```

pub mod error;

#[cfg(feature = "jolokia")]
pub mod jolokia;

pub use error::AdapterError;

// Re-export types for convenience
pub use munin_jmx_types::{FetchedValue, Scalar, Target};
