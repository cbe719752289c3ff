// key namespace constants
pub const PATH_SEPARATOR: &str = "/";
pub const DOCUMENTS_KEY: &str = "documents";
pub const COLLECTION_KEY: &str = "collection";
pub const COLLECTION_INDEX_PREFIXES: &str = "collection/index-prefixes";
pub const INDEXES_ID_PREFIX: &str = "collection/indexes/id";
pub const INDEXES_DOCUMENT_PATH_PREFIX: &str = "collection/indexes/by-path";

/// Segments that may not appear inside a collection path. Both roots of the
/// internal namespace live directly under the collection path, so a user
/// segment with the same name would alias document keys into index space.
pub const RESERVED_SEGMENTS: [&str; 2] = [DOCUMENTS_KEY, COLLECTION_KEY];

// store constants
pub const DEFAULT_LIST_LIMIT: u64 = 1000;

pub const WAYPOINT_VERSION: &str = env!("CARGO_PKG_VERSION");
