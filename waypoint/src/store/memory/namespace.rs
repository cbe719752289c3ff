use crate::common::DEFAULT_LIST_LIMIT;
use crate::errors::WaypointResult;
use crate::store::{KvNamespaceProvider, ListOptions, ListResult, ListedKey, PutOptions};
use crossbeam_skiplist::SkipMap;
use serde_json::Value;
use std::collections::Bound::{Excluded, Included, Unbounded};
use std::sync::Arc;

/// In-memory key-value namespace backed by a concurrent skip list.
///
/// # Purpose
/// `InMemoryKvNamespace` provides a sorted, thread-safe namespace entirely in
/// memory. The skip list keeps keys in lexicographic order, which is what
/// gives listings their key ordering and makes prefix scans cheap.
///
/// # Characteristics
/// - **Thread-Safe**: can be cloned and shared across threads
/// - **Sorted**: listings return keys in lexicographic order
/// - **Paginated**: listings respect `limit` and hand back an opaque cursor
/// - **No Expiry Enforcement**: expiration options are recorded but entries
///   are never evicted; suitable for tests and temporary data only
#[derive(Clone, Default)]
pub struct InMemoryKvNamespace {
    inner: Arc<InMemoryKvNamespaceInner>,
}

impl InMemoryKvNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.entries.contains_key(key)
    }
}

impl KvNamespaceProvider for InMemoryKvNamespace {
    fn list(&self, options: &ListOptions) -> WaypointResult<ListResult> {
        self.inner.list(options)
    }

    fn get(&self, key: &str) -> WaypointResult<Option<String>> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &str, options: &PutOptions) -> WaypointResult<()> {
        self.inner.put(key, value, options)
    }
}

#[derive(Clone)]
struct StoredEntry {
    value: String,
    metadata: Option<Value>,
    #[allow(dead_code)]
    expiration: Option<u64>,
    #[allow(dead_code)]
    expiration_ttl: Option<u64>,
}

struct InMemoryKvNamespaceInner {
    entries: SkipMap<String, StoredEntry>,
}

impl Default for InMemoryKvNamespaceInner {
    fn default() -> Self {
        InMemoryKvNamespaceInner {
            entries: SkipMap::new(),
        }
    }
}

impl InMemoryKvNamespaceInner {
    fn list(&self, options: &ListOptions) -> WaypointResult<ListResult> {
        let limit = options.limit.unwrap_or(DEFAULT_LIST_LIMIT).max(1) as usize;

        // All keys sharing a prefix form a contiguous range in the skip list,
        // so the scan starts at the prefix (or just past the cursor) and stops
        // at the first non-matching key.
        let lower = match &options.cursor {
            Some(cursor) => Excluded(cursor.clone()),
            None => Included(options.prefix.clone()),
        };

        let mut keys = Vec::new();
        let mut truncated = false;

        for entry in self.entries.range((lower, Unbounded)) {
            if !entry.key().starts_with(&options.prefix) {
                break;
            }
            if keys.len() == limit {
                truncated = true;
                break;
            }
            keys.push(ListedKey {
                name: entry.key().clone(),
                metadata: entry.value().metadata.clone(),
            });
        }

        let cursor = if truncated {
            keys.last().map(|key| key.name.clone())
        } else {
            None
        };

        Ok(ListResult {
            keys,
            cursor,
            list_complete: !truncated,
        })
    }

    fn get(&self, key: &str) -> WaypointResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().value.clone()))
    }

    fn put(&self, key: &str, value: &str, options: &PutOptions) -> WaypointResult<()> {
        self.entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                metadata: options.metadata.clone(),
                expiration: options.expiration,
                expiration_ttl: options.expiration_ttl,
            },
        );
        Ok(())
    }
}
