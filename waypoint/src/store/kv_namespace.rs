use crate::errors::WaypointResult;
use serde_json::Value;
use std::ops::Deref;
use std::sync::Arc;

/// Options for a prefix listing.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Only keys whose names start with this prefix are returned.
    pub prefix: String,
    /// Maximum number of keys per page. Backends apply their own default
    /// when absent.
    pub limit: Option<u64>,
    /// Opaque pagination cursor from a previous [`ListResult`].
    pub cursor: Option<String>,
}

/// A single key surfaced by a listing.
#[derive(Debug, Clone)]
pub struct ListedKey {
    pub name: String,
    /// The metadata sidecar attached at write time, if any.
    pub metadata: Option<Value>,
}

/// One page of a prefix listing, in key order.
#[derive(Debug, Clone, Default)]
pub struct ListResult {
    pub keys: Vec<ListedKey>,
    /// Cursor for the next page; `None` when the listing is complete.
    pub cursor: Option<String>,
    pub list_complete: bool,
}

/// Options for a point write.
#[derive(Debug, Clone, Default)]
pub struct PutOptions {
    /// Absolute expiry (seconds since epoch), forwarded to the backend.
    pub expiration: Option<u64>,
    /// Relative expiry in seconds, forwarded to the backend.
    pub expiration_ttl: Option<u64>,
    /// Metadata sidecar surfaced by listings without reading the value.
    pub metadata: Option<Value>,
}

/// Low-level interface for key-value namespace backends.
///
/// # Purpose
/// Defines the contract the collection layer requires from its backing store.
/// Implementers provide concrete storage operations, such as in-memory
/// storage or an adapter over a remote key-value service.
///
/// # Key Methods
/// - **Listing**: `list()` returns keys under a prefix in key order, one page
///   at a time with an opaque cursor
/// - **Point Reads**: `get()` retrieves a value by key
/// - **Point Writes**: `put()` stores a value with optional expiry and a
///   metadata sidecar
///
/// # Consistency
/// Backends are expected to provide last-write-wins semantics per key and
/// lexicographic key ordering in listings. No transactional guarantees are
/// required or assumed.
///
/// # Thread Safety
/// Implementers must be `Send + Sync` for safe use in concurrent contexts.
pub trait KvNamespaceProvider: Send + Sync {
    /// Lists keys under a prefix.
    ///
    /// # Arguments
    /// * `options` - The prefix, page size, and pagination cursor
    ///
    /// # Returns
    /// * `Ok(ListResult)` with one page of keys in key order
    /// * `Err(WaypointError)` if the operation fails
    fn list(&self, options: &ListOptions) -> WaypointResult<ListResult>;

    /// Retrieves the value stored at a key.
    ///
    /// # Arguments
    /// * `key` - The key to retrieve
    ///
    /// # Returns
    /// * `Ok(Some(value))` if the key exists
    /// * `Ok(None)` if the key does not exist
    /// * `Err(WaypointError)` if the operation fails
    fn get(&self, key: &str) -> WaypointResult<Option<String>>;

    /// Inserts or replaces the value stored at a key.
    ///
    /// # Arguments
    /// * `key` - The key to write
    /// * `value` - The value to store
    /// * `options` - Expiry and metadata options
    ///
    /// # Returns
    /// * `Ok(())` if the operation was successful
    /// * `Err(WaypointError)` if the operation fails
    fn put(&self, key: &str, value: &str, options: &PutOptions) -> WaypointResult<()>;
}

/// A cloneable handle to a key-value namespace.
///
/// `KvNamespace` wraps any [`KvNamespaceProvider`] implementation behind a
/// shared reference, so collections and document references can hold cheap
/// clones of the same backend.
#[derive(Clone)]
pub struct KvNamespace {
    inner: Arc<dyn KvNamespaceProvider>,
}

impl KvNamespace {
    /// Creates a new `KvNamespace` from a provider implementation.
    pub fn new<T: KvNamespaceProvider + 'static>(inner: T) -> Self {
        KvNamespace {
            inner: Arc::new(inner),
        }
    }
}

impl std::fmt::Debug for KvNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvNamespace").finish_non_exhaustive()
    }
}

impl Deref for KvNamespace {
    type Target = Arc<dyn KvNamespaceProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
