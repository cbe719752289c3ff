use crate::paths::PathPattern;
use std::collections::HashMap;

/// The result of a successful match of a pathname against a [`PathPattern`].
///
/// Created fresh per match attempt and never mutated; callers consume it and
/// let it drop.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMatch {
    /// Parameter values keyed by name. A wildcard capture is stored under the
    /// literal key `*`. Values are percent-decoded where possible.
    pub params: HashMap<String, String>,
    /// The full matched portion of the pathname.
    pub pathname: String,
    /// The matched portion with trailing slashes trimmed; for wildcard
    /// matches, truncated to exclude the captured suffix. This is the base a
    /// nested router would resolve child patterns against.
    pub pathname_base: String,
    /// The originating pattern, for display and debugging.
    pub pattern: PathPattern,
}

/// Performs pattern matching on a URL pathname and returns information about
/// the match, or `None` if the pathname does not match.
///
/// Captured parameter values are percent-decoded; a value that fails to
/// decode (malformed percent encoding) is passed through raw with a warning
/// rather than rejecting the match.
pub fn match_path(pattern: &PathPattern, pathname: &str) -> Option<PathMatch> {
    let captures = match pattern.matcher().captures(pathname) {
        Ok(Some(captures)) => captures,
        Ok(None) => return None,
        Err(err) => {
            log::warn!(
                "Route pattern \"{}\" could not be evaluated against \"{}\": {}",
                pattern.path(),
                pathname,
                err
            );
            return None;
        }
    };

    let matched_pathname = captures.get(0).map(|m| m.as_str()).unwrap_or_default();
    let mut pathname_base = trim_trailing_slashes(matched_pathname).to_string();

    let mut params = HashMap::with_capacity(pattern.param_names().len());
    for (index, param_name) in pattern.param_names().iter().enumerate() {
        let raw_value = captures.get(index + 1).map(|m| m.as_str()).unwrap_or("");

        // The pathname base is computed from the raw splat value rather than
        // params["*"], which has been decoded by then.
        if param_name == "*" {
            let splat_start = matched_pathname.len() - raw_value.len();
            pathname_base = trim_trailing_slashes(&matched_pathname[..splat_start]).to_string();
        }

        params.insert(param_name.clone(), safely_decode_component(raw_value, param_name));
    }

    Some(PathMatch {
        params,
        pathname: matched_pathname.to_string(),
        pathname_base,
        pattern: pattern.clone(),
    })
}

/// Trims trailing slashes but keeps a bare `/` intact.
fn trim_trailing_slashes(value: &str) -> &str {
    let trimmed = value.trim_end_matches('/');
    if trimmed.is_empty() && !value.is_empty() {
        &value[..1]
    } else {
        trimmed
    }
}

fn safely_decode_component(value: &str, param_name: &str) -> String {
    match urlencoding::decode(value) {
        Ok(decoded) => decoded.into_owned(),
        Err(err) => {
            log::warn!(
                "The value for the route parameter \"{}\" will not be decoded because the string \"{}\" is a malformed percent-encoded segment ({}).",
                param_name,
                value,
                err
            );
            value.to_string()
        }
    }
}
