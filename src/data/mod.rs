//! Configuration loading, request planning and fetched values.
//!
//! ## Submodules
//!
//! - [`document`]: Loading the YAML plugin configuration ([`PluginDocument`])
//! - [`plan`]: Working out which (MBean, attribute) pairs an endpoint needs ([`RequestPlan`])
//! - [`store`]: Per-endpoint cache of fetched values and metric resolution ([`ValueStore`])
//!
//! ## Data Flow
//!
//! ```text
//! YAML file
//!     │
//!     ▼
//! PluginDocument::load()
//!     │
//!     └──▶ Endpoint ──▶ RequestPlan::for_graphs()
//!                              │
//!                              ▼
//!                      MetricSource::fetch_plan()
//!                              │
//!                              ▼
//!                      ValueStore::resolve() (one scalar per metric)
//! ```

pub mod document;
pub mod plan;
pub mod store;

pub use document::PluginDocument;
pub use plan::{plan, RequestPlan};
pub use store::{extract, ValueStore};
