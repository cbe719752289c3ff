use crate::store::ListOptions;

/// Options for controlling paginated listings of a collection.
///
/// `FetchListOptions` carries the page size and pagination cursor for the
/// collection's listing operations. It supports method chaining for
/// convenient configuration.
///
/// # Examples
///
/// ```rust,ignore
/// use waypoint::collection::FetchListOptions;
///
/// let options = FetchListOptions::new().limit(50);
///
/// // Continue from a previous page
/// let options = FetchListOptions::new().cursor("users/collection/indexes/id/0192...");
///
/// // Use convenience functions
/// let options = limit_to(100);
/// let options = from_cursor("users/collection/indexes/id/0192...");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FetchListOptions {
    pub(crate) limit: Option<u64>,
    pub(crate) cursor: Option<String>,
}

/// Creates `FetchListOptions` with a page size limit.
pub fn limit_to(limit: u64) -> FetchListOptions {
    FetchListOptions {
        limit: Some(limit),
        cursor: None,
    }
}

/// Creates `FetchListOptions` resuming from a pagination cursor.
pub fn from_cursor(cursor: &str) -> FetchListOptions {
    FetchListOptions {
        limit: None,
        cursor: Some(cursor.to_string()),
    }
}

impl FetchListOptions {
    /// Creates a new `FetchListOptions` with default settings: the backend's
    /// default page size, starting from the first page.
    pub fn new() -> Self {
        FetchListOptions::default()
    }

    /// Sets the maximum number of entries per page.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the pagination cursor returned by a previous listing.
    pub fn cursor(mut self, cursor: &str) -> Self {
        self.cursor = Some(cursor.to_string());
        self
    }

    pub(crate) fn to_list_options(&self, prefix: &str) -> ListOptions {
        ListOptions {
            prefix: prefix.to_string(),
            limit: self.limit,
            cursor: self.cursor.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_unbounded() {
        let options = FetchListOptions::new();
        assert!(options.limit.is_none());
        assert!(options.cursor.is_none());
    }

    #[test]
    fn test_chaining_sets_fields() {
        let options = FetchListOptions::new().limit(25).cursor("abc");
        assert_eq!(options.limit, Some(25));
        assert_eq!(options.cursor.as_deref(), Some("abc"));
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(limit_to(10).limit, Some(10));
        assert_eq!(from_cursor("xyz").cursor.as_deref(), Some("xyz"));
    }

    #[test]
    fn test_to_list_options_carries_prefix() {
        let options = FetchListOptions::new().limit(5).to_list_options("users/collection/indexes/id");
        assert_eq!(options.prefix, "users/collection/indexes/id");
        assert_eq!(options.limit, Some(5));
    }
}
