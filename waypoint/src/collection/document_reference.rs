use crate::collection::collection::CollectionInner;
use crate::collection::{Collection, DeserializeAs, DocumentMetadata};
use crate::errors::{ErrorKind, WaypointError, WaypointResult};
use crate::store::{KvNamespace, PutOptions};
use serde_json::Value;
use std::fmt::{Debug, Formatter};
use std::sync::Weak;

/// Options for writing a document through a [`DocumentReference`].
#[derive(Debug, Clone, Default)]
pub struct DocumentPutOptions {
    /// Absolute expiry (seconds since epoch), forwarded to the store.
    pub expiration: Option<u64>,
    /// Relative expiry in seconds, forwarded to the store.
    pub expiration_ttl: Option<u64>,
}

/// A handle to a single document within a collection's namespace.
///
/// A reference identifies a document by its absolute path and holds a weak
/// back-reference to the owning collection - a back-reference, not ownership;
/// dropping the collection does not keep it alive through its references.
/// Writes through an attached reference maintain the collection's index
/// invariant: the document body plus two mandatory index entries plus any
/// registered secondary field indexes.
#[derive(Clone)]
pub struct DocumentReference {
    kv: KvNamespace,
    relative_doc_path: String,
    absolute_doc_path: String,
    collection: Weak<CollectionInner>,
}

impl DocumentReference {
    /// Creates a detached reference from an absolute document path.
    ///
    /// A detached reference can read and write the document body but cannot
    /// resolve metadata or maintain indexes. Its relative path is taken to be
    /// the absolute path.
    pub fn new(kv: KvNamespace, absolute_doc_path: &str) -> Self {
        DocumentReference {
            kv,
            relative_doc_path: absolute_doc_path.to_string(),
            absolute_doc_path: absolute_doc_path.to_string(),
            collection: Weak::new(),
        }
    }

    pub(crate) fn attached(
        kv: KvNamespace,
        relative_doc_path: &str,
        absolute_doc_path: &str,
        collection: Weak<CollectionInner>,
    ) -> Self {
        DocumentReference {
            kv,
            relative_doc_path: relative_doc_path.to_string(),
            absolute_doc_path: absolute_doc_path.to_string(),
            collection,
        }
    }

    pub fn relative_doc_path(&self) -> &str {
        &self.relative_doc_path
    }

    pub fn absolute_doc_path(&self) -> &str {
        &self.absolute_doc_path
    }

    /// The owning collection, if it is still alive.
    pub fn collection(&self) -> Option<Collection> {
        self.collection.upgrade().map(Collection::from_inner)
    }

    /// Fetches this document's metadata sidecar via the owning collection's
    /// document-path index.
    ///
    /// # Errors
    /// Returns a `NotFound` error when the reference is detached from its
    /// collection; without one the sidecar cannot be located.
    pub fn fetch_metadata(&self) -> WaypointResult<Option<DocumentMetadata>> {
        let collection = self.collection.upgrade().ok_or_else(|| {
            WaypointError::new(
                &format!(
                    "Document reference `{}` is not attached to a collection",
                    self.absolute_doc_path
                ),
                ErrorKind::NotFound,
            )
        })?;

        collection.fetch_document_metadata_by_path(&self.relative_doc_path)
    }

    /// Reads the document body as stored text. `Ok(None)` when absent.
    pub fn fetch_value(&self) -> WaypointResult<Option<String>> {
        self.kv.get(&self.absolute_doc_path)
    }

    /// Reads and parses the document body as JSON. `Ok(None)` when absent.
    pub fn fetch_json(&self) -> WaypointResult<Option<Value>> {
        match self.fetch_value()? {
            None => Ok(None),
            Some(body) => {
                let value = serde_json::from_str(&body).map_err(|err| {
                    WaypointError::new(
                        &format!(
                            "Document `{}` does not contain valid JSON: {}",
                            self.absolute_doc_path, err
                        ),
                        ErrorKind::EncodingError,
                    )
                })?;
                Ok(Some(value))
            }
        }
    }

    /// Writes a JSON document at this reference's path.
    ///
    /// Fresh metadata is generated for the write (new id, `Json` decoding
    /// tag), the body is stored, and - when the owning collection is alive -
    /// its indexes are updated via `add_entry_to_indexes`. Returns the
    /// generated metadata.
    pub fn put_value(&self, entry: &Value, options: &DocumentPutOptions) -> WaypointResult<DocumentMetadata> {
        let body = serde_json::to_string(entry)?;
        self.put_serialized(entry, &body, DeserializeAs::Json, options)
    }

    /// Writes an opaque text document at this reference's path.
    ///
    /// Raw documents get the mandatory indexes but no secondary field
    /// indexes, since there are no fields to read.
    pub fn put_raw(&self, body: &str, options: &DocumentPutOptions) -> WaypointResult<DocumentMetadata> {
        self.put_serialized(&Value::Null, body, DeserializeAs::Raw, options)
    }

    fn put_serialized(
        &self,
        entry: &Value,
        body: &str,
        deserialize_as: DeserializeAs,
        options: &DocumentPutOptions,
    ) -> WaypointResult<DocumentMetadata> {
        let metadata = DocumentMetadata::generate(
            &self.relative_doc_path,
            &self.absolute_doc_path,
            deserialize_as,
            options.expiration,
            options.expiration_ttl,
        );

        let put_options = PutOptions {
            expiration: options.expiration,
            expiration_ttl: options.expiration_ttl,
            metadata: None,
        };

        self.kv
            .put(&self.absolute_doc_path, body, &put_options)
            .map_err(|err| {
                WaypointError::new_with_cause(
                    &format!(
                        "An error occurred while writing the document at `{}`",
                        self.absolute_doc_path
                    ),
                    ErrorKind::ResourceError,
                    err,
                )
            })?;

        if let Some(collection) = self.collection.upgrade() {
            collection.add_entry_to_indexes(entry, &metadata)?;
        }

        Ok(metadata)
    }
}

impl Debug for DocumentReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentReference")
            .field("absolute_doc_path", &self.absolute_doc_path)
            .field("attached", &(self.collection.strong_count() > 0))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Collection;
    use crate::store::KvNamespaceProvider;
    use crate::store::memory::InMemoryKvNamespace;
    use serde_json::json;

    fn test_collection() -> (Collection, InMemoryKvNamespace) {
        let store = InMemoryKvNamespace::new();
        let collection = Collection::new(KvNamespace::new(store.clone()), "users").unwrap();
        collection.initialize().unwrap();
        (collection, store)
    }

    #[test]
    fn test_put_value_writes_body_and_returns_metadata() {
        let (collection, store) = test_collection();
        let doc = collection.create_document_reference("alice");

        let metadata = doc
            .put_value(&json!({"name": "Alice"}), &DocumentPutOptions::default())
            .unwrap();

        assert_eq!(metadata.relative_doc_path, "alice");
        assert_eq!(metadata.absolute_doc_path, "users/documents/alice");
        assert_eq!(metadata.deserialize_as, DeserializeAs::Json);
        assert!(store.contains_key("users/documents/alice"));
    }

    #[test]
    fn test_put_value_maintains_indexes() {
        let (collection, store) = test_collection();
        let doc = collection.create_document_reference("alice");

        let metadata = doc
            .put_value(&json!({"name": "Alice"}), &DocumentPutOptions::default())
            .unwrap();

        assert!(store.contains_key(&format!("users/collection/indexes/id/{}", metadata.id)));
        assert!(store.contains_key("users/collection/indexes/by-path/alice"));
    }

    #[test]
    fn test_fetch_value_and_json_round_trip() {
        let (collection, _) = test_collection();
        let doc = collection.create_document_reference("alice");

        assert!(doc.fetch_value().unwrap().is_none());
        assert!(doc.fetch_json().unwrap().is_none());

        doc.put_value(&json!({"name": "Alice"}), &DocumentPutOptions::default())
            .unwrap();

        let body = doc.fetch_json().unwrap().expect("expected a document");
        assert_eq!(body["name"], "Alice");
    }

    #[test]
    fn test_fetch_metadata_through_collection() {
        let (collection, _) = test_collection();
        let doc = collection.create_document_reference("alice");
        doc.put_value(&json!({"name": "Alice"}), &DocumentPutOptions::default())
            .unwrap();

        let metadata = doc.fetch_metadata().unwrap().expect("expected metadata");
        assert_eq!(metadata.relative_doc_path, "alice");
    }

    #[test]
    fn test_detached_reference_cannot_resolve_metadata() {
        let store = KvNamespace::new(InMemoryKvNamespace::new());
        let doc = DocumentReference::new(store, "users/documents/alice");

        assert!(doc.collection().is_none());
        let err = doc.fetch_metadata().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NotFound);
    }

    #[test]
    fn test_reference_outliving_collection_detaches() {
        let (collection, _) = test_collection();
        let doc = collection.create_document_reference("alice");
        assert!(doc.collection().is_some());

        drop(collection);
        assert!(doc.collection().is_none());
    }

    #[test]
    fn test_put_raw_skips_field_indexing() {
        let (collection, store) = test_collection();
        let doc = collection.create_document_reference("blob");

        let metadata = doc.put_raw("opaque bytes", &DocumentPutOptions::default()).unwrap();

        assert_eq!(metadata.deserialize_as, DeserializeAs::Raw);
        assert_eq!(
            store.get("users/documents/blob").unwrap().as_deref(),
            Some("opaque bytes")
        );
        assert!(store.contains_key(&format!("users/collection/indexes/id/{}", metadata.id)));
    }
}
