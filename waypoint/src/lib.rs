//! # Waypoint - Route Patterns & Indexed Collections
//!
//! Waypoint is a small library with two cooperating subsystems:
//!
//! - **Path matching**: route pattern strings such as `/users/:id` or
//!   `/files/*` are compiled once into immutable matchers that extract named
//!   and wildcard parameters from request pathnames.
//! - **Indexed collections**: a hierarchical key namespace over a sorted
//!   key-value store, maintaining primary and secondary indexes so documents
//!   can be listed in key order, fetched by id, and located by field value
//!   without native secondary indexes or transactions in the backing store.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use waypoint::collection::Collection;
//! use waypoint::paths::{match_path, PathPattern};
//! use waypoint::store::{memory::InMemoryKvNamespace, KvNamespace};
//!
//! # fn main() -> waypoint::errors::WaypointResult<()> {
//! // Match an inbound pathname against a route pattern
//! let pattern = PathPattern::new("/users/:id")?;
//! if let Some(matched) = match_path(&pattern, "/users/42") {
//!     assert_eq!(matched.params["id"], "42");
//! }
//!
//! // Persist a document and its index entries
//! let kv = KvNamespace::new(InMemoryKvNamespace::new());
//! let users = Collection::new(kv, "users")?;
//! users.initialize()?;
//! let doc = users.create_document_reference("alice");
//! doc.put_value(&serde_json::json!({"status": "active"}), &Default::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Document collections, metadata sidecars, and document references
//! - [`common`] - Shared constants including the key-naming scheme
//! - [`errors`] - Error types and result definitions
//! - [`paths`] - Route pattern compilation and matching
//! - [`store`] - Key-value namespace abstraction and the in-memory backend
//!
//! ## Consistency Model
//!
//! There is no cross-document locking or transaction support: two writers
//! targeting the same document id race, and the backing store's last-write-wins
//! semantics determine the outcome. Index writes fail fast; a failed write
//! means indexes may be partially written and the caller must retry or repair.

pub mod collection;
pub mod common;
pub mod errors;
pub mod paths;
pub mod store;
