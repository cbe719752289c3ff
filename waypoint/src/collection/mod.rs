//! Document collections with maintained indexes.
//!
//! A [`Collection`] manages a hierarchical key namespace rooted at a
//! collection path. Every document write maintains two mandatory index
//! entries (by id, by document path) and zero-or-more secondary field
//! indexes, each carrying the same serialized [`DocumentMetadata`] sidecar so
//! a reader can resolve a document via any index without reading its body.
//!
//! ```rust,ignore
//! use waypoint::collection::Collection;
//! use waypoint::store::{memory::InMemoryKvNamespace, KvNamespace};
//!
//! let kv = KvNamespace::new(InMemoryKvNamespace::new());
//! let users = Collection::new(kv, "users")?;
//! users.register_index("status")?;
//! users.initialize()?;
//!
//! let alice = users.create_document_reference("alice");
//! alice.put_value(&serde_json::json!({"status": "active"}), &Default::default())?;
//!
//! let listing = users.fetch_documents(&Default::default())?;
//! assert_eq!(listing.documents.len(), 1);
//! ```
//!
//! Secondary indexes must be registered before `initialize()` runs; the
//! field mapping is populated once per collection handle and read-only
//! afterwards.

mod collection;
mod document_metadata;
mod document_reference;
mod fetch_options;

pub use collection::*;
pub use document_metadata::*;
pub use document_reference::*;
pub use fetch_options::*;
