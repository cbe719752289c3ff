use crate::collection::{
    DeserializeAs, DocumentMetadata, DocumentReference, FetchListOptions,
};
use crate::common::{
    COLLECTION_INDEX_PREFIXES, DOCUMENTS_KEY, INDEXES_DOCUMENT_PATH_PREFIX, INDEXES_ID_PREFIX,
    RESERVED_SEGMENTS,
};
use crate::errors::{ErrorKind, WaypointError, WaypointResult};
use crate::paths::resolve_path_segments;
use crate::store::{KvNamespace, ListOptions, ListResult, PutOptions};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// One page of relative document paths, projected from the id index.
#[derive(Debug, Clone, Default)]
pub struct DocumentPathsList {
    /// Relative document paths in id order. `None` where an index entry's
    /// metadata sidecar was missing or malformed.
    pub paths: Vec<Option<String>>,
    pub cursor: Option<String>,
    pub list_complete: bool,
}

/// One page of document references, constructed from the id index.
#[derive(Clone, Debug)]
pub struct DocumentReferencesList {
    pub documents: Vec<DocumentReference>,
    pub cursor: Option<String>,
    pub list_complete: bool,
}

/// A collection of documents with maintained indexes over a key-value
/// namespace.
///
/// # Purpose
/// `Collection` manages a hierarchical key namespace rooted at a collection
/// path, keeping primary and secondary indexes consistent so documents can be
/// listed in primary-key order, fetched by id, and located by indexed field
/// value, without native secondary indexes or transactions in the backing
/// store.
///
/// # Key Layout
/// All keys derive from the collection path:
/// - `{path}/documents/{relativeDocPath}` - document bodies
/// - `{path}/collection/indexes/id/{id}` - the mandatory id index
/// - `{path}/collection/indexes/by-path/{relativeDocPath}` - the mandatory
///   document-path index
/// - `{path}/collection/index-prefixes/{field}` - secondary-index
///   registrations; each registered key's name is itself the prefix under
///   which that field's index entries are written
///
/// # Consistency
/// Index writes are not transactional. The two mandatory index writes
/// complete-or-fail as a group before any secondary-index write begins, and
/// secondary-index writes fail fast on the first error. A failed write means
/// indexes may be partially written; the caller must retry or repair.
///
/// # Examples
///
/// ```rust,ignore
/// use waypoint::collection::Collection;
/// use waypoint::store::{memory::InMemoryKvNamespace, KvNamespace};
///
/// let kv = KvNamespace::new(InMemoryKvNamespace::new());
/// let users = Collection::new(kv, "users")?;
/// users.register_index("status")?;
/// users.initialize()?;
///
/// let doc = users.create_document_reference("alice");
/// doc.put_value(&serde_json::json!({"status": "active"}), &Default::default())?;
/// ```
#[derive(Clone, Debug)]
pub struct Collection {
    inner: Arc<CollectionInner>,
}

impl Collection {
    /// Creates a collection rooted at the given slash-delimited path.
    ///
    /// The path is normalized (outer slashes trimmed) and validated: it must
    /// not be empty, must not contain empty segments, and must not contain
    /// the reserved internal segments (`documents`, `collection`).
    ///
    /// # Errors
    /// Returns a `ValidationError` when the path violates any invariant.
    pub fn new(kv: KvNamespace, collection_path: &str) -> WaypointResult<Self> {
        let collection_path = validate_collection_path(collection_path)?;

        let inner = CollectionInner {
            documents_path: resolve_path_segments([collection_path.as_str(), DOCUMENTS_KEY]),
            index_prefixes_path: resolve_path_segments([
                collection_path.as_str(),
                COLLECTION_INDEX_PREFIXES,
            ]),
            index_by_id_path: resolve_path_segments([collection_path.as_str(), INDEXES_ID_PREFIX]),
            index_by_doc_path: resolve_path_segments([
                collection_path.as_str(),
                INDEXES_DOCUMENT_PATH_PREFIX,
            ]),
            kv,
            collection_path,
            index_path_by_field: OnceLock::new(),
        };

        Ok(Collection {
            inner: Arc::new(inner),
        })
    }

    pub(crate) fn from_inner(inner: Arc<CollectionInner>) -> Self {
        Collection { inner }
    }

    /// The normalized collection path this collection is rooted at.
    pub fn collection_path(&self) -> &str {
        &self.inner.collection_path
    }

    /// The namespace root under which document bodies are stored.
    pub fn documents_path(&self) -> &str {
        &self.inner.documents_path
    }

    /// Registers a secondary index for a document field.
    ///
    /// Registration writes a key into the collection's index-prefix
    /// namespace; it takes effect the next time `initialize()` runs on a
    /// fresh collection handle. Registering after `initialize()` does not
    /// alter the already-populated field mapping.
    ///
    /// # Errors
    /// Returns a `ValidationError` for an empty field name or one containing
    /// a path separator, or a `ResourceError` if the store write fails.
    pub fn register_index(&self, field_name: &str) -> WaypointResult<()> {
        self.inner.register_index(field_name)
    }

    /// Populates the field-to-index-prefix mapping from the store.
    ///
    /// Lists the collection's index-prefix namespace, following the cursor
    /// until the listing is exhausted, and records each key's trailing path
    /// segment as an indexed field name. Must complete before any write or
    /// query that depends on secondary indexes. Calling it again is a no-op:
    /// the mapping is populated once and read-only afterwards.
    pub fn initialize(&self) -> WaypointResult<()> {
        self.inner.initialize()
    }

    /// Field names with a registered secondary index, in name order.
    /// Empty before `initialize()` has run.
    pub fn indexed_fields(&self) -> Vec<String> {
        self.inner.indexed_fields()
    }

    /// Fetches a page of the id index, the raw primary-key-ordered listing of
    /// this collection's documents. The store's pagination cursor is returned
    /// untouched.
    pub fn fetch_documents_list_by_id(
        &self,
        options: &FetchListOptions,
    ) -> WaypointResult<ListResult> {
        self.inner.fetch_documents_list_by_id(options)
    }

    /// Fetches a page of the id index, projecting each entry down to its
    /// relative document path.
    pub fn fetch_documents_list(
        &self,
        options: &FetchListOptions,
    ) -> WaypointResult<DocumentPathsList> {
        self.inner.fetch_documents_list(options)
    }

    /// Fetches a document's metadata via the document-path index.
    ///
    /// This is used to determine a document's deserialization ahead of
    /// fetching its body. Returns `Ok(None)` when no document exists at the
    /// given relative path.
    pub fn fetch_document_metadata_by_path(
        &self,
        relative_doc_path: &str,
    ) -> WaypointResult<Option<DocumentMetadata>> {
        self.inner.fetch_document_metadata_by_path(relative_doc_path)
    }

    /// Fetches a page of [`DocumentReference`] handles from the id index.
    ///
    /// Every listed index entry must carry a decodable metadata sidecar;
    /// an entry without one indicates an index written outside the write path
    /// and fails the whole call with a `MissingMetadata` error.
    pub fn fetch_documents(
        &self,
        options: &FetchListOptions,
    ) -> WaypointResult<DocumentReferencesList> {
        let listing = self.inner.fetch_documents_list_by_id(options)?;

        let mut documents = Vec::with_capacity(listing.keys.len());
        for key in &listing.keys {
            let sidecar = key.metadata.as_ref().ok_or_else(|| {
                WaypointError::new(
                    &format!(
                        "Key `{}` does not include the expected metadata. Consider deleting this key.",
                        key.name
                    ),
                    ErrorKind::MissingMetadata,
                )
            })?;

            let metadata = DocumentMetadata::from_value(sidecar).map_err(|err| {
                WaypointError::new_with_cause(
                    &format!("Key `{}` carries malformed metadata", key.name),
                    ErrorKind::MissingMetadata,
                    err,
                )
            })?;

            documents.push(DocumentReference::attached(
                self.inner.kv.clone(),
                &metadata.relative_doc_path,
                &metadata.absolute_doc_path,
                Arc::downgrade(&self.inner),
            ));
        }

        Ok(DocumentReferencesList {
            documents,
            cursor: listing.cursor,
            list_complete: listing.list_complete,
        })
    }

    /// Creates a [`DocumentReference`] for the document at the given
    /// *relative* path, whether or not a document exists there yet.
    pub fn create_document_reference(&self, relative_doc_path: &str) -> DocumentReference {
        let absolute_doc_path =
            resolve_path_segments([self.inner.documents_path.as_str(), relative_doc_path]);

        DocumentReference::attached(
            self.inner.kv.clone(),
            relative_doc_path,
            &absolute_doc_path,
            Arc::downgrade(&self.inner),
        )
    }

    /// Writes index entries for a document.
    ///
    /// The serialized metadata is written to the two mandatory index keys (by
    /// id, by document path) as a group; if either write fails the whole call
    /// fails and no secondary-index write is attempted. For JSON documents,
    /// one further index entry is then written per registered field carrying
    /// a non-falsy value on `entry`, failing fast on the first error without
    /// attempting the remaining fields and without cleaning up the
    /// already-written mandatory indexes.
    ///
    /// # Errors
    /// Returns a `ResourceError` (status 500) on any store write failure.
    /// After a failure the indexes may be partially written; the caller must
    /// retry or repair.
    pub fn add_entry_to_indexes(
        &self,
        entry: &Value,
        metadata: &DocumentMetadata,
    ) -> WaypointResult<()> {
        self.inner.add_entry_to_indexes(entry, metadata)
    }

    /// Looks up documents by an indexed field value.
    ///
    /// Not implemented yet; always fails with an `InvalidOperation` error
    /// rather than silently returning nothing.
    pub fn query(&self, _field_name: &str, _value: &Value) -> WaypointResult<ListResult> {
        Err(WaypointError::new(
            "`query` is not implemented",
            ErrorKind::InvalidOperation,
        ))
    }

    /// Deletes the collection and everything under its namespace.
    ///
    /// Not implemented yet; always fails with an `InvalidOperation` error
    /// rather than silently no-op-ing.
    pub fn permanently_delete(&self) -> WaypointResult<()> {
        Err(WaypointError::new(
            "`permanently_delete` is not implemented",
            ErrorKind::InvalidOperation,
        ))
    }
}

#[derive(Debug)]
pub(crate) struct CollectionInner {
    kv: KvNamespace,
    collection_path: String,
    documents_path: String,
    index_prefixes_path: String,
    index_by_id_path: String,
    index_by_doc_path: String,
    index_path_by_field: OnceLock<BTreeMap<String, String>>,
}

impl CollectionInner {
    fn register_index(&self, field_name: &str) -> WaypointResult<()> {
        if field_name.is_empty() || field_name.contains('/') {
            return Err(WaypointError::new(
                &format!("`{}` is not a valid index field name", field_name),
                ErrorKind::ValidationError,
            ));
        }

        let registration_key =
            resolve_path_segments([self.index_prefixes_path.as_str(), field_name]);

        self.kv
            .put(&registration_key, "", &PutOptions::default())
            .map_err(|err| {
                WaypointError::new_with_cause(
                    &format!(
                        "An error occurred while registering the `{}` index for `{}`",
                        field_name, self.collection_path
                    ),
                    ErrorKind::ResourceError,
                    err,
                )
            })
    }

    fn initialize(&self) -> WaypointResult<()> {
        if self.index_path_by_field.get().is_some() {
            return Ok(());
        }

        let index_prefixes = self.fetch_index_prefixes()?;
        let mut index_path_by_field = BTreeMap::new();

        for index_prefix in index_prefixes {
            let field_name = index_prefix.rsplit('/').next().unwrap_or_default();

            if field_name.is_empty() {
                log::warn!(
                    "Skipping index prefix `{}` with an empty trailing segment",
                    index_prefix
                );
                continue;
            }

            index_path_by_field.insert(field_name.to_string(), index_prefix);
        }

        // A concurrent initialize keeps whichever mapping landed first; both
        // were built from the same namespace.
        let _ = self.index_path_by_field.set(index_path_by_field);
        Ok(())
    }

    fn fetch_index_prefixes(&self) -> WaypointResult<Vec<String>> {
        let mut names = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self.kv.list(&ListOptions {
                prefix: self.index_prefixes_path.clone(),
                limit: None,
                cursor: cursor.take(),
            })?;

            names.extend(page.keys.into_iter().map(|key| key.name));

            if page.list_complete || page.cursor.is_none() {
                break;
            }
            cursor = page.cursor;
        }

        Ok(names)
    }

    fn indexed_fields(&self) -> Vec<String> {
        match self.index_path_by_field.get() {
            Some(mapping) => mapping.keys().cloned().collect(),
            None => Vec::new(),
        }
    }

    fn fetch_documents_list_by_id(
        &self,
        options: &FetchListOptions,
    ) -> WaypointResult<ListResult> {
        self.kv.list(&options.to_list_options(&self.index_by_id_path))
    }

    fn fetch_documents_list(&self, options: &FetchListOptions) -> WaypointResult<DocumentPathsList> {
        let result = self.fetch_documents_list_by_id(options)?;

        let paths = result
            .keys
            .iter()
            .map(|key| {
                let sidecar = key.metadata.as_ref()?;
                match DocumentMetadata::from_value(sidecar) {
                    Ok(metadata) => Some(metadata.relative_doc_path),
                    Err(err) => {
                        log::warn!("Key `{}` carries malformed metadata: {}", key.name, err);
                        None
                    }
                }
            })
            .collect();

        Ok(DocumentPathsList {
            paths,
            cursor: result.cursor,
            list_complete: result.list_complete,
        })
    }

    pub(crate) fn fetch_document_metadata_by_path(
        &self,
        relative_doc_path: &str,
    ) -> WaypointResult<Option<DocumentMetadata>> {
        let index_key = resolve_path_segments([self.index_by_doc_path.as_str(), relative_doc_path]);

        match self.kv.get(&index_key)? {
            None => Ok(None),
            Some(payload) => {
                let metadata = DocumentMetadata::from_json(&payload).map_err(|err| {
                    WaypointError::new_with_cause(
                        &format!("Malformed metadata for document `{}`", relative_doc_path),
                        ErrorKind::EncodingError,
                        err,
                    )
                })?;
                Ok(Some(metadata))
            }
        }
    }

    pub(crate) fn add_entry_to_indexes(
        &self,
        entry: &Value,
        metadata: &DocumentMetadata,
    ) -> WaypointResult<()> {
        let serialized_metadata = metadata.to_json()?;
        let sidecar = serde_json::to_value(metadata)?;

        let put_options = PutOptions {
            expiration: metadata.expiration,
            expiration_ttl: metadata.expiration_ttl,
            metadata: Some(sidecar),
        };

        let mandatory_indexes = [
            resolve_path_segments([self.index_by_id_path.as_str(), metadata.id.as_str()]),
            resolve_path_segments([
                self.index_by_doc_path.as_str(),
                metadata.relative_doc_path.as_str(),
            ]),
        ];

        for index_path in &mandatory_indexes {
            if let Err(err) = self.kv.put(index_path, &serialized_metadata, &put_options) {
                log::error!("{:?}", err);
                return Err(WaypointError::new_with_status(
                    &format!(
                        "An error occurred while creating indexes for `{}`",
                        metadata.absolute_doc_path
                    ),
                    ErrorKind::ResourceError,
                    500,
                ));
            }
        }

        if metadata.deserialize_as != DeserializeAs::Json {
            return Ok(());
        }

        // Field indexes carry the serialized metadata as their value only;
        // the listing sidecar stays on the mandatory indexes.
        let field_put_options = PutOptions {
            expiration: metadata.expiration,
            expiration_ttl: metadata.expiration_ttl,
            metadata: None,
        };

        let Some(index_path_by_field) = self.index_path_by_field.get() else {
            return Ok(());
        };

        for (field_name, index_path) in index_path_by_field {
            let Some(value) = entry.get(field_name) else {
                continue;
            };
            if is_falsy(value) {
                continue;
            }

            let serialized_value = serde_json::to_string(value)?;
            let index_key = resolve_path_segments([
                index_path.as_str(),
                metadata.id.as_str(),
                serialized_value.as_str(),
            ]);

            if let Err(err) = self.kv.put(&index_key, &serialized_metadata, &field_put_options) {
                log::error!("{:?}", err);
                return Err(WaypointError::new_with_status(
                    &format!(
                        "An error occurred while creating the `{}` index for `{}`",
                        field_name, metadata.absolute_doc_path
                    ),
                    ErrorKind::ResourceError,
                    500,
                ));
            }
        }

        Ok(())
    }
}

fn validate_collection_path(collection_path: &str) -> WaypointResult<String> {
    let normalized = collection_path.trim_matches('/');

    if normalized.is_empty() {
        return Err(WaypointError::new(
            "Collection path must not be empty",
            ErrorKind::ValidationError,
        ));
    }

    for segment in normalized.split('/') {
        if segment.is_empty() {
            return Err(WaypointError::new(
                &format!("Collection path `{}` contains an empty segment", collection_path),
                ErrorKind::ValidationError,
            ));
        }
        if RESERVED_SEGMENTS.contains(&segment) {
            return Err(WaypointError::new(
                &format!(
                    "Collection path `{}` contains the reserved segment `{}`",
                    collection_path, segment
                ),
                ErrorKind::ValidationError,
            ));
        }
    }

    Ok(normalized.to_string())
}

/// A JSON value is skipped for secondary indexing when absent or falsy:
/// null, `false`, numeric zero, or the empty string.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|v| v == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::KvNamespaceProvider;
    use crate::store::memory::InMemoryKvNamespace;
    use serde_json::json;

    #[ctor::ctor]
    fn init() {
        colog::init();
    }

    fn test_collection(path: &str) -> (Collection, InMemoryKvNamespace) {
        let store = InMemoryKvNamespace::new();
        let collection = Collection::new(KvNamespace::new(store.clone()), path).unwrap();
        (collection, store)
    }

    #[test]
    fn test_rejects_empty_collection_path() {
        let store = KvNamespace::new(InMemoryKvNamespace::new());
        let err = Collection::new(store.clone(), "").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ValidationError);

        let err = Collection::new(store, "///").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ValidationError);
    }

    #[test]
    fn test_rejects_reserved_segments() {
        let store = KvNamespace::new(InMemoryKvNamespace::new());
        for path in ["documents", "users/documents", "collection/users"] {
            let err = Collection::new(store.clone(), path).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::ValidationError, "path `{}`", path);
        }
    }

    #[test]
    fn test_rejects_empty_interior_segment() {
        let store = KvNamespace::new(InMemoryKvNamespace::new());
        let err = Collection::new(store, "users//archived").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ValidationError);
    }

    #[test]
    fn test_normalizes_outer_slashes() {
        let (collection, _) = test_collection("/users/");
        assert_eq!(collection.collection_path(), "users");
        assert_eq!(collection.documents_path(), "users/documents");
    }

    #[test]
    fn test_derived_paths_follow_key_layout() {
        let (collection, _) = test_collection("users");
        assert_eq!(collection.inner.index_by_id_path, "users/collection/indexes/id");
        assert_eq!(
            collection.inner.index_by_doc_path,
            "users/collection/indexes/by-path"
        );
        assert_eq!(
            collection.inner.index_prefixes_path,
            "users/collection/index-prefixes"
        );
    }

    #[test]
    fn test_register_index_rejects_invalid_field_names() {
        let (collection, _) = test_collection("users");
        assert_eq!(
            collection.register_index("").unwrap_err().kind(),
            &ErrorKind::ValidationError
        );
        assert_eq!(
            collection.register_index("nested/field").unwrap_err().kind(),
            &ErrorKind::ValidationError
        );
    }

    #[test]
    fn test_initialize_populates_indexed_fields() {
        let (collection, _) = test_collection("users");
        collection.register_index("status").unwrap();
        collection.register_index("email").unwrap();

        assert!(collection.indexed_fields().is_empty());
        collection.initialize().unwrap();
        assert_eq!(collection.indexed_fields(), vec!["email", "status"]);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (collection, _) = test_collection("users");
        collection.register_index("status").unwrap();
        collection.initialize().unwrap();

        // Registrations after initialize are not picked up by this handle.
        collection.register_index("email").unwrap();
        collection.initialize().unwrap();
        assert_eq!(collection.indexed_fields(), vec!["status"]);
    }

    #[test]
    fn test_initialize_skips_prefix_with_empty_trailing_segment() {
        let (collection, store) = test_collection("users");
        store
            .put("users/collection/index-prefixes/", "", &PutOptions::default())
            .unwrap();
        collection.initialize().unwrap();
        assert!(collection.indexed_fields().is_empty());
    }

    #[test]
    fn test_add_entry_writes_mandatory_and_field_indexes() {
        let (collection, store) = test_collection("users");
        collection.register_index("status").unwrap();
        collection.initialize().unwrap();

        let metadata = DocumentMetadata::generate(
            "alice",
            "users/documents/alice",
            DeserializeAs::Json,
            None,
            None,
        );
        let entry = json!({"status": "active", "name": "Alice"});
        collection.add_entry_to_indexes(&entry, &metadata).unwrap();

        let id_key = format!("users/collection/indexes/id/{}", metadata.id);
        let path_key = "users/collection/indexes/by-path/alice".to_string();
        let field_key = format!(
            "users/collection/index-prefixes/status/{}/\"active\"",
            metadata.id
        );

        for key in [&id_key, &path_key, &field_key] {
            let payload = store.get(key).unwrap().unwrap_or_else(|| panic!("missing `{}`", key));
            let stored = DocumentMetadata::from_json(&payload).unwrap();
            assert_eq!(stored.id, metadata.id);
        }
    }

    #[test]
    fn test_add_entry_skips_falsy_field_values() {
        let (collection, store) = test_collection("users");
        collection.register_index("status").unwrap();
        collection.initialize().unwrap();

        for entry in [
            json!({"status": null}),
            json!({"status": false}),
            json!({"status": 0}),
            json!({"status": ""}),
            json!({"name": "no status field"}),
        ] {
            let metadata = DocumentMetadata::generate(
                "bob",
                "users/documents/bob",
                DeserializeAs::Json,
                None,
                None,
            );
            collection.add_entry_to_indexes(&entry, &metadata).unwrap();
        }

        let listing = store
            .list(&ListOptions {
                prefix: "users/collection/index-prefixes/status/".to_string(),
                ..Default::default()
            })
            .unwrap();
        assert!(listing.keys.is_empty());
    }

    #[test]
    fn test_raw_entries_skip_secondary_indexes() {
        let (collection, store) = test_collection("users");
        collection.register_index("status").unwrap();
        collection.initialize().unwrap();

        let metadata = DocumentMetadata::generate(
            "blob",
            "users/documents/blob",
            DeserializeAs::Raw,
            None,
            None,
        );
        collection
            .add_entry_to_indexes(&json!({"status": "active"}), &metadata)
            .unwrap();

        let listing = store
            .list(&ListOptions {
                prefix: "users/collection/index-prefixes/status/".to_string(),
                ..Default::default()
            })
            .unwrap();
        assert!(listing.keys.is_empty());
        assert!(store.contains_key(&format!("users/collection/indexes/id/{}", metadata.id)));
    }

    #[test]
    fn test_fetch_document_metadata_by_path() {
        let (collection, _) = test_collection("users");
        collection.initialize().unwrap();

        assert!(collection
            .fetch_document_metadata_by_path("missing")
            .unwrap()
            .is_none());

        let metadata = DocumentMetadata::generate(
            "alice",
            "users/documents/alice",
            DeserializeAs::Json,
            None,
            None,
        );
        collection
            .add_entry_to_indexes(&json!({}), &metadata)
            .unwrap();

        let fetched = collection
            .fetch_document_metadata_by_path("alice")
            .unwrap()
            .expect("expected metadata");
        assert_eq!(fetched, metadata);
    }

    #[test]
    fn test_fetch_document_metadata_rejects_malformed_payload() {
        let (collection, store) = test_collection("users");
        store
            .put(
                "users/collection/indexes/by-path/corrupt",
                "{not json",
                &PutOptions::default(),
            )
            .unwrap();

        let err = collection
            .fetch_document_metadata_by_path("corrupt")
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::EncodingError);
        assert!(err.cause().is_some());
    }

    #[test]
    fn test_unimplemented_operations_fail_explicitly() {
        let (collection, _) = test_collection("users");

        let err = collection.query("status", &json!("active")).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidOperation);

        let err = collection.permanently_delete().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_is_falsy_policy() {
        assert!(is_falsy(&json!(null)));
        assert!(is_falsy(&json!(false)));
        assert!(is_falsy(&json!(0)));
        assert!(is_falsy(&json!("")));
        assert!(!is_falsy(&json!(true)));
        assert!(!is_falsy(&json!(1)));
        assert!(!is_falsy(&json!("active")));
        assert!(!is_falsy(&json!([])));
        assert!(!is_falsy(&json!({})));
    }
}
