//! Common types and constants shared across Waypoint.
//!
//! The key-naming constants in this module are the de-facto wire format of the
//! collection layer: they decide where documents, indexes, and index-prefix
//! registrations live inside the backing namespace. They must remain stable
//! within one deployment, otherwise existing index entries are orphaned.

mod constants;

pub use constants::*;
