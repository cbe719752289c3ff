use crate::common::PATH_SEPARATOR;

/// Joins path segments with single slashes.
///
/// Leading and trailing separators on each segment are trimmed, and segments
/// that are empty after trimming are skipped, so callers can mix bare names
/// and pre-joined fragments freely:
///
/// ```rust,ignore
/// use waypoint::paths::resolve_path_segments;
///
/// let path = resolve_path_segments(["users", "collection/indexes/id", "42"]);
/// assert_eq!(path, "users/collection/indexes/id/42");
/// ```
pub fn resolve_path_segments<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut resolved = String::new();

    for segment in segments {
        let trimmed = segment.as_ref().trim_matches('/');
        if trimmed.is_empty() {
            continue;
        }
        if !resolved.is_empty() {
            resolved.push_str(PATH_SEPARATOR);
        }
        resolved.push_str(trimmed);
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_segments_with_single_slashes() {
        let path = resolve_path_segments(["users", "documents", "alice"]);
        assert_eq!(path, "users/documents/alice");
    }

    #[test]
    fn test_trims_redundant_separators() {
        let path = resolve_path_segments(["/users/", "/documents/", "alice/"]);
        assert_eq!(path, "users/documents/alice");
    }

    #[test]
    fn test_skips_empty_segments() {
        let path = resolve_path_segments(["users", "", "/", "alice"]);
        assert_eq!(path, "users/alice");
    }

    #[test]
    fn test_preserves_interior_slashes() {
        let path = resolve_path_segments(["users", "collection/indexes/id", "42"]);
        assert_eq!(path, "users/collection/indexes/id/42");
    }

    #[test]
    fn test_empty_input_yields_empty_path() {
        let segments: [&str; 0] = [];
        assert_eq!(resolve_path_segments(segments), "");
    }
}
