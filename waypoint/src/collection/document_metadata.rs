use crate::errors::{ErrorKind, WaypointError, WaypointResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// How a document's stored bytes should be decoded when read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeserializeAs {
    /// The body is a JSON document; secondary indexing applies.
    Json,
    /// The body is opaque text; only the mandatory indexes are maintained.
    #[default]
    Raw,
}

/// The metadata sidecar stored with every index entry.
///
/// Each of a document's index entries (by id, by document path, and any
/// secondary field indexes) carries this same serialized record, so a reader
/// can resolve a document's location and decoding without touching the
/// document body. The serialized form is part of the deployment's stable
/// key-value format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Unique identifier within the collection, assigned at write time.
    pub id: String,
    /// Location of the document relative to the collection's documents root.
    pub relative_doc_path: String,
    /// Full key of the document body in the backing namespace.
    pub absolute_doc_path: String,
    /// Decoding tag for the stored bytes.
    pub deserialize_as: DeserializeAs,
    /// Absolute expiry (seconds since epoch), forwarded to the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<u64>,
    /// Relative expiry in seconds, forwarded to the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_ttl: Option<u64>,
}

impl DocumentMetadata {
    /// Generates metadata for a new document write, assigning a fresh id.
    pub fn generate(
        relative_doc_path: &str,
        absolute_doc_path: &str,
        deserialize_as: DeserializeAs,
        expiration: Option<u64>,
        expiration_ttl: Option<u64>,
    ) -> Self {
        DocumentMetadata {
            id: Uuid::new_v4().to_string(),
            relative_doc_path: relative_doc_path.to_string(),
            absolute_doc_path: absolute_doc_path.to_string(),
            deserialize_as,
            expiration,
            expiration_ttl,
        }
    }

    /// Serializes this metadata to its stable JSON form.
    pub fn to_json(&self) -> WaypointResult<String> {
        let payload = serde_json::to_string(self)?;
        Ok(payload)
    }

    /// Parses metadata from its serialized JSON form.
    pub fn from_json(payload: &str) -> WaypointResult<Self> {
        serde_json::from_str(payload).map_err(|err| {
            WaypointError::new(
                &format!("Malformed document metadata: {}", err),
                ErrorKind::EncodingError,
            )
        })
    }

    /// Parses metadata from a listing's metadata sidecar value.
    pub fn from_value(value: &Value) -> WaypointResult<Self> {
        serde_json::from_value(value.clone()).map_err(|err| {
            WaypointError::new(
                &format!("Malformed document metadata: {}", err),
                ErrorKind::EncodingError,
            )
        })
    }
}
