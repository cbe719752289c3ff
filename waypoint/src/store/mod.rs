//! Key-value namespace abstraction and backends.
//!
//! The collection layer talks to its backing store through the
//! [`KvNamespaceProvider`] trait, a minimal contract of three operations:
//! prefix listing with cursor pagination, point reads, and point writes with
//! optional expiry and a listing metadata sidecar. Any sorted key-value store
//! can sit behind it.
//!
//! Waypoint bundles one backend:
//! - **In-Memory**: [`memory::InMemoryKvNamespace`] for testing and temporary
//!   data.
//!
//! No operation is retried here; failures surface to the caller as resource
//! errors and retry policy stays with the application.

mod kv_namespace;
pub mod memory;

pub use kv_namespace::*;
