use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use waypoint::errors::{ErrorKind, WaypointError, WaypointResult};
use waypoint::store::memory::InMemoryKvNamespace;
use waypoint::store::{KvNamespace, KvNamespaceProvider, ListOptions, ListResult, PutOptions};

/// A test context holding a fresh in-memory namespace and a handle to it.
#[derive(Clone)]
pub struct TestContext {
    store: InMemoryKvNamespace,
    kv: KvNamespace,
}

impl TestContext {
    pub fn new() -> Self {
        let store = InMemoryKvNamespace::new();
        let kv = KvNamespace::new(store.clone());
        Self { store, kv }
    }

    /// The namespace handle collections are built on.
    pub fn kv(&self) -> KvNamespace {
        self.kv.clone()
    }

    /// Direct access to the backing store, for poking at raw keys.
    pub fn store(&self) -> InMemoryKvNamespace {
        self.store.clone()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn create_test_context() -> WaypointResult<TestContext> {
    Ok(TestContext::new())
}

/// A namespace wrapper that rejects writes to keys under a configured
/// prefix, for exercising index write failure paths.
pub struct FailingKvNamespace {
    inner: KvNamespace,
    fail_put_prefix: String,
    rejected_puts: Arc<AtomicUsize>,
}

impl FailingKvNamespace {
    pub fn new(inner: KvNamespace, fail_put_prefix: &str) -> Self {
        Self {
            inner,
            fail_put_prefix: fail_put_prefix.to_string(),
            rejected_puts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Counter of rejected writes, shared with clones of this wrapper.
    pub fn rejected_puts(&self) -> Arc<AtomicUsize> {
        self.rejected_puts.clone()
    }
}

impl KvNamespaceProvider for FailingKvNamespace {
    fn list(&self, options: &ListOptions) -> WaypointResult<ListResult> {
        self.inner.list(options)
    }

    fn get(&self, key: &str) -> WaypointResult<Option<String>> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &str, options: &PutOptions) -> WaypointResult<()> {
        if key.starts_with(&self.fail_put_prefix) {
            self.rejected_puts.fetch_add(1, Ordering::SeqCst);
            return Err(WaypointError::new(
                &format!("Injected write failure for `{}`", key),
                ErrorKind::ResourceError,
            ));
        }
        self.inner.put(key, value, options)
    }
}

/// A namespace wrapper that clamps every listing to a tiny page size,
/// forcing callers through their pagination paths.
pub struct SmallPageKvNamespace {
    inner: KvNamespace,
    page_size: u64,
}

impl SmallPageKvNamespace {
    pub fn new(inner: KvNamespace, page_size: u64) -> Self {
        Self { inner, page_size }
    }
}

impl KvNamespaceProvider for SmallPageKvNamespace {
    fn list(&self, options: &ListOptions) -> WaypointResult<ListResult> {
        let clamped = ListOptions {
            prefix: options.prefix.clone(),
            limit: Some(options.limit.unwrap_or(self.page_size).min(self.page_size)),
            cursor: options.cursor.clone(),
        };
        self.inner.list(&clamped)
    }

    fn get(&self, key: &str) -> WaypointResult<Option<String>> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &str, options: &PutOptions) -> WaypointResult<()> {
        self.inner.put(key, value, options)
    }
}
