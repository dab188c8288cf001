//! # munin-jmx-types
//!
//! Core types shared by the munin-jmx crates. This crate defines the plugin
//! configuration model (endpoints, graphs and metrics) and the dynamically
//! shaped values a JMX gateway hands back for an attribute read.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature to load configurations
//!   and decode gateway responses
//! - **Transport agnostic**: Nothing here knows how values are fetched
//! - **Ergonomic builders**: Fluent API for constructing endpoint definitions
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: Deserialization of configurations and fetched values via serde
//!
//! ## Example
//!
//! ```rust
//! use munin_jmx_types::{Endpoint, FetchedValue, Scalar};
//! use std::collections::BTreeMap;
//!
//! let endpoint = Endpoint::builder("http://localhost:8080/jolokia")
//!     .graph("wildfly_threads", |g| {
//!         g.attr("graph_title", "WildFly threads")
//!             .metric("count", |m| {
//!                 m.resource("java.lang:type=Threading")
//!                     .attribute("ThreadCount")
//!                     .attr("label", "Threads")
//!             })
//!     })
//!     .build();
//!
//! assert_eq!(endpoint.graphs.len(), 1);
//!
//! let mut usage = BTreeMap::new();
//! usage.insert("used".to_string(), FetchedValue::from(1024_i64));
//! let value = FetchedValue::Mapping(usage);
//!
//! assert_eq!(value.walk("used").and_then(FetchedValue::as_scalar), Some(&Scalar::Integer(1024)));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod attributes;
mod definition;
mod value;

pub use attributes::*;
pub use definition::*;
pub use value::*;
