use crate::errors::{ErrorKind, WaypointError, WaypointResult};
use fancy_regex::Regex;
use std::fmt::{Debug, Formatter};

/// A route pattern compiled into an immutable matcher.
///
/// # Purpose
/// `PathPattern` turns a path template such as `/users/:id` or `/files/*`
/// into a regular expression plus the ordered list of parameter names it
/// captures. Compilation happens exactly once, at construction; the matcher is
/// never mutated afterwards and the pattern can be cloned and shared freely.
///
/// # Template Syntax
/// - `:name` matches one path segment (one-or-more non-slash characters) and
///   captures it under `name`.
/// - A trailing `*` matches the remainder of the path and captures it under
///   the literal parameter name `*`.
/// - All other characters match literally.
///
/// # Flags
/// - `case_sensitive` (default `false`): whether literal portions match
///   case-sensitively.
/// - `end` (default `true`): whether the pattern must consume the entire
///   pathname. With `end` disabled, matching stops at a segment boundary so a
///   pattern like `/home` cannot accidentally match `/home2`.
#[derive(Clone)]
pub struct PathPattern {
    path: String,
    case_sensitive: bool,
    end: bool,
    matcher: Regex,
    param_names: Vec<String>,
}

impl PathPattern {
    /// Compiles a pattern with the default flags (`case_sensitive` off,
    /// `end` on).
    pub fn new(path: &str) -> WaypointResult<Self> {
        Self::with_options(path, false, true)
    }

    /// Compiles a pattern with explicit flags.
    ///
    /// # Errors
    /// Returns an error if the generated expression fails to compile. With all
    /// literal portions escaped this indicates a bug rather than bad input.
    pub fn with_options(path: &str, case_sensitive: bool, end: bool) -> WaypointResult<Self> {
        let (matcher, param_names) = compile_path(path, case_sensitive, end)?;

        Ok(PathPattern {
            path: path.to_string(),
            case_sensitive,
            end,
            matcher,
            param_names,
        })
    }

    /// The original pattern string this matcher was compiled from.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn end(&self) -> bool {
        self.end
    }

    /// Parameter names in capture-group order. A trailing wildcard appears as
    /// the literal name `*`.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    pub(crate) fn matcher(&self) -> &Regex {
        &self.matcher
    }
}

impl Debug for PathPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathPattern")
            .field("path", &self.path)
            .field("case_sensitive", &self.case_sensitive)
            .field("end", &self.end)
            .finish()
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.case_sensitive == other.case_sensitive
            && self.end == other.end
    }
}

fn compile_path(path: &str, case_sensitive: bool, end: bool) -> WaypointResult<(Regex, Vec<String>)> {
    if !(path == "*" || !path.ends_with('*') || path.ends_with("/*")) {
        let suggested = format!("{}/*", path.trim_end_matches('*'));
        log::warn!(
            "Route path \"{}\" will be treated as if it were \"{}\" because the `*` character must always follow a `/` in the pattern. To get rid of this warning, please change the route path to \"{}\".",
            path,
            suggested,
            suggested
        );
    }

    // Ignore trailing / and /*, handled below; make sure there is a leading /.
    let stripped = path.strip_suffix('*').unwrap_or(path);
    let stripped = stripped.trim_end_matches('/');
    let normalized = format!("/{}", stripped.trim_start_matches('/'));

    let mut param_names: Vec<String> = Vec::new();
    let mut source = String::from("^");

    let mut rest = normalized.as_str();
    while let Some(colon) = rest.find(':') {
        push_escaped(&mut source, &rest[..colon]);
        let after = &rest[colon + 1..];
        let name_len = after
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .count();

        if name_len == 0 {
            // a lone `:` with no word characters after it is literal
            source.push(':');
            rest = after;
            continue;
        }

        param_names.push(after[..name_len].to_string());
        source.push_str("([^/]+)");
        rest = &after[name_len..];
    }
    push_escaped(&mut source, rest);

    if path.ends_with('*') {
        param_names.push("*".to_string());
        if path == "*" || path == "/*" {
            // Already matched the initial /, just match the rest
            source.push_str("(.*)$");
        } else {
            // Don't include the / in params["*"]
            source.push_str("(?:/(.+)|/*)$");
        }
    } else if end {
        // When matching to the end, ignore trailing slashes
        source.push_str("/*$");
    } else {
        // Otherwise, match a word boundary or a proceeding /. The word
        // boundary restricts parent patterns to matching only their own words
        // and nothing more, e.g. "/home" should not match "/home2".
        // Additionally, allow paths starting with `.`, `-`, `~`, and
        // url-encoded entities, but do not consume the character in the
        // matched path so they can match against nested paths.
        source.push_str("(?:(?=[.~-]|%[0-9A-F]{2})|\\b|/|$)");
    }

    let source = if case_sensitive {
        source
    } else {
        format!("(?i){}", source)
    };

    let matcher = Regex::new(&source).map_err(|err| {
        WaypointError::new(
            &format!("Failed to compile route pattern \"{}\": {}", path, err),
            ErrorKind::InternalError,
        )
    })?;

    Ok((matcher, param_names))
}

fn push_escaped(source: &mut String, literal: &str) {
    for c in literal.chars() {
        if matches!(
            c,
            '\\' | '.' | '*' | '+' | '^' | '$' | '?' | '{' | '}' | '|' | '(' | ')' | '[' | ']'
        ) {
            source.push('\\');
        }
        source.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiles_literal_pattern() {
        let pattern = PathPattern::new("/about").unwrap();
        assert_eq!(pattern.path(), "/about");
        assert!(pattern.param_names().is_empty());
        assert!(!pattern.case_sensitive());
        assert!(pattern.end());
    }

    #[test]
    fn test_records_param_names_in_order() {
        let pattern = PathPattern::new("/orgs/:org/repos/:repo").unwrap();
        assert_eq!(pattern.param_names(), &["org".to_string(), "repo".to_string()]);
    }

    #[test]
    fn test_wildcard_appends_literal_star_name() {
        let pattern = PathPattern::new("/files/*").unwrap();
        assert_eq!(pattern.param_names(), &["*".to_string()]);

        let bare = PathPattern::new("*").unwrap();
        assert_eq!(bare.param_names(), &["*".to_string()]);
    }

    #[test]
    fn test_params_and_wildcard_combine() {
        let pattern = PathPattern::new("/users/:id/*").unwrap();
        assert_eq!(pattern.param_names(), &["id".to_string(), "*".to_string()]);
    }

    #[test]
    fn test_ambiguous_trailing_star_still_compiles() {
        // "/files*" gets the permissive warning but compiles fine
        let pattern = PathPattern::new("/files*").unwrap();
        assert_eq!(pattern.param_names(), &["*".to_string()]);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let pattern = PathPattern::new("/v1.0/items").unwrap();
        assert!(pattern.matcher().is_match("/v1.0/items").unwrap());
        assert!(!pattern.matcher().is_match("/v1x0/items").unwrap());
    }

    #[test]
    fn test_lone_colon_is_literal() {
        let pattern = PathPattern::new("/time/12:30").unwrap();
        assert!(pattern.param_names().is_empty());
        assert!(pattern.matcher().is_match("/time/12:30").unwrap());
    }

    #[test]
    fn test_equality_ignores_compiled_matcher() {
        let a = PathPattern::new("/users/:id").unwrap();
        let b = PathPattern::new("/users/:id").unwrap();
        let c = PathPattern::with_options("/users/:id", true, true).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
