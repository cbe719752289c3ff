//! Route pattern compilation and path matching.
//!
//! A route pattern is a path template using `:name` segments and an optional
//! trailing `*` wildcard:
//!
//! ```rust,ignore
//! use waypoint::paths::{match_path, PathPattern};
//!
//! let pattern = PathPattern::new("/users/:id")?;
//! let matched = match_path(&pattern, "/users/42").unwrap();
//! assert_eq!(matched.params["id"], "42");
//!
//! let files = PathPattern::new("/files/*")?;
//! let matched = match_path(&files, "/files/a/b.txt").unwrap();
//! assert_eq!(matched.params["*"], "a/b.txt");
//! assert_eq!(matched.pathname_base, "/files");
//! ```
//!
//! Patterns are compiled exactly once, at construction, into an immutable
//! matcher. Selecting among multiple competing patterns (specificity
//! ordering) is the responsibility of an external router; this module matches
//! a single pattern per call.

mod path_match;
mod path_pattern;
mod segments;

pub use path_match::*;
pub use path_pattern::*;
pub use segments::*;
